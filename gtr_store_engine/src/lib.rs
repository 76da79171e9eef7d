//! # GTR Motors store engine
//!
//! This crate provides the persistence and business logic for the GTR Motors car-parts store. It is deliberately
//! independent of the HTTP layer; the `gtr_store_server` crate wires these APIs up to REST endpoints.
//!
//! The engine is split into three layers:
//!
//! * The **database backends** implement the storage traits of [`traits`]. Currently only SQLite is supported
//!   ([`SqliteDatabase`]), behind the `sqlite` feature flag.
//! * The **storage traits** ([`traits::CatalogManagement`], [`traits::ShopOrderManagement`]) describe what a backend
//!   must be able to do, without saying how. Everything above this line is backend-agnostic.
//! * The **store APIs** ([`CatalogApi`], [`OrderFlowApi`]) hold the business rules: legacy product-id aliasing,
//!   cart validation, server-side order totalling, and the payment confirmation state machine. The server crate
//!   only ever talks to these.
//!
//! ## Order life cycle
//!
//! Orders are written with status `Processing` and payment status `pending`. The only supported transition is the
//! one [`OrderFlowApi::confirm_payment`] performs after the server has verified a payment signature: to `Confirmed`
//! and `paid`, in a single guarded update. Confirming an already-confirmed order is a no-op that returns the stored
//! record, so payment webhooks and client retries can safely race each other. Nothing in the engine ever writes a
//! `failed` payment status; a failed verification leaves the order untouched.
//!
//! ## Money
//!
//! All prices and totals are stored as integer paise ([`gtr_common::Paise`]). Conversion from rupee floats happens
//! once, at the edges, and totals are always recomputed server-side from the catalog prices inside the same
//! transaction that writes the order.

#[cfg(feature = "sqlite")]
mod sqlite;

pub mod db_types;
pub mod helpers;
pub mod store_api;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use db_types::*;
#[cfg(feature = "sqlite")]
pub use sqlite::{create_database_if_missing, db_url, SqliteDatabase};
pub use store_api::{CatalogApi, LineItem, OrderFlowApi, OrderWithItems, ProductQueryFilter, SortOrder};
pub use traits::{CatalogError, CatalogManagement, OrderFlowError, ShopOrderManagement};
