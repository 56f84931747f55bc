//! Server application core modules.
//!
//! This module contains the backend infrastructure: configuration from the environment,
//! logging, database connection management with generic CRUD repositories, the JSON
//! response envelope and error handling, the middleware stack, and registration of the
//! application modules under the API prefix.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod apps;
pub mod config;
pub mod controller;
pub mod data;
pub mod database;
pub mod error;
pub mod extract;
pub mod logger;
pub mod middleware;
pub mod model;
pub mod rest;
pub mod router;
pub mod startup;
pub mod url_manager;
