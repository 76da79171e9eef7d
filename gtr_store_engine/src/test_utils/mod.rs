//! Helpers for setting up database-backed test environments.
pub mod prepare_env;
