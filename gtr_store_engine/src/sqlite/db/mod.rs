//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interactions are maintained by simple functions (rather than stateful structs) that accept a
//! `&mut SqliteConnection` argument. Callers can obtain a connection from a pool,
//! or create an atomic transaction as the need arises and call through to the functions without any other changes.
use std::{env, path::Path};

use log::info;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Error as SqlxError, Sqlite, SqlitePool};

pub mod brands;
pub mod manufacturers;
pub mod orders;
pub mod products;
pub mod seed;

const SQLITE_DB_URL: &str = "sqlite://data/gtr_motors.db";

pub fn db_url() -> String {
    let result = env::var("GTR_DATABASE_URL").unwrap_or_else(|_| {
        info!("GTR_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}

/// Creates the database file, and any missing parent directory in its path, if it does not exist yet.
pub async fn create_database_if_missing(url: &str) -> Result<(), SqlxError> {
    if Sqlite::database_exists(url).await.unwrap_or(false) {
        return Ok(());
    }
    if let Some(path) = url.strip_prefix("sqlite://") {
        if let Some(dir) = Path::new(path).parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
    }
    info!("Creating new database at {url}");
    Sqlite::create_database(url).await
}
