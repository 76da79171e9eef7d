//! # GTR Motors store public API
//!
//! The `store_api` module exposes the programmatic API for the store engine. The API is modular: the catalog and
//! order-flow halves can be handed to different parts of a server, or backed by different databases.
//!
//! * [`catalog_api`] serves and administers products, brands, manufacturers and categories, and applies the
//!   in-memory sort orders the storefront offers.
//! * [`order_flow_api`] assembles carts into priced orders and records verified payments against them. It owns
//!   the cart validation rules and the legacy product-id compatibility shim.
//!
//! # API usage
//!
//! An API instance is created by supplying a database backend that implements the backend traits the API needs.
//!
//! ```rust,ignore
//! use gtr_store_engine::{CartLine, OrderFlowApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/gtr_motors.db", 25).await?;
//! // SqliteDatabase implements ShopOrderManagement
//! let api = OrderFlowApi::new(db);
//! let order = api.place_order(&[CartLine::new("prod_1", 2)]).await?;
//! ```
pub mod catalog_api;
pub mod order_flow_api;
pub mod order_objects;

pub use catalog_api::CatalogApi;
pub use order_flow_api::OrderFlowApi;
pub use order_objects::{LineItem, OrderWithItems, ProductQueryFilter, SortOrder};
