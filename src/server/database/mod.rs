//! Database connectivity.
//!
//! Builds connection URIs for the configured provider and manages the single connection
//! pool shared by the whole application.

pub mod connect;
pub mod manager;

pub use manager::DatabaseManager;
