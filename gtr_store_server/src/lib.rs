//! # GTR Motors store server
//!
//! The HTTP surface of the GTR Motors car-parts store. It serves the product catalog, takes orders, and settles
//! them through Razorpay.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A liveness check that reports process uptime.
//! * `/products`, `/products/{id}`: The filtered, sortable catalog listing, and single-product lookups.
//! * `/product`, `/product/{id}`: Product administration (create, update, delete).
//! * `/brands`, `/brands/{id}`: Brand lookups. `/brand`, `/brand/{id}`: brand administration.
//! * `/manufacturers`, `/manufacturers/{id}`: Manufacturer lookups and administration.
//! * `/categories`: The distinct product categories.
//! * `/orders`: Order creation and the order ledger.
//! * `/payments/create-order`, `/payments/verify`: The Razorpay checkout hand-off and the payment
//!   verification callback which confirms orders.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;
