//! # Storage backend contracts.
//!
//! This module defines the interface contracts that a database backend must fulfil to drive the GTR Motors store.
//!
//! * [`CatalogManagement`] covers the product, brand and manufacturer catalog: lookups, filtered search, the
//!   admin CRUD operations with their uniqueness and referential guards, and the initial seed.
//! * [`ShopOrderManagement`] covers the order ledger: atomic order assembly, order queries, and the single
//!   guarded payment-confirmation transition.
//!
//! Backends implement both; [`ShopOrderManagement`] requires [`CatalogManagement`] because order assembly prices
//! line items from the catalog inside its own transaction.
//!
//! The business rules that do not touch storage (legacy id aliasing, cart validation, sort order) live a level up,
//! in [`crate::store_api`].
mod catalog_management;
mod shop_order_management;

pub use catalog_management::{CatalogError, CatalogManagement};
pub use shop_order_management::{OrderFlowError, ShopOrderManagement};
