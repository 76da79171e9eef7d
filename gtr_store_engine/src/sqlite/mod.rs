//! SQLite database module for the GTR Motors store engine.
mod sqlite_impl;

pub mod db;
pub use db::{create_database_if_missing, db_url};
pub use sqlite_impl::SqliteDatabase;
