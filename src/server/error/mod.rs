//! Error types for the backend.
//!
//! Domain errors (configuration, database, API) are aggregated into [`Error`], which
//! converts into an HTTP response rendered through the standard response envelope.
//! Anything that is not the client's fault becomes a 500 without leaking details.

pub mod api;
pub mod config;
pub mod database;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::{
    error::{api::ApiError, config::ConfigError, database::DatabaseError},
    rest::Rest,
};

/// Main error type for the backend.
///
/// Uses `thiserror`'s `#[from]` so any of the wrapped errors can be raised with `?` from
/// handlers, repositories and start-up code alike.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Database manager error (not initialized, connection, migrations).
    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
    /// Client error rendered with its own status code.
    #[error(transparent)]
    ApiError(#[from] ApiError),
    /// Query failure reported by the ORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// JSON serialization failure.
    #[error(transparent)]
    SerializeError(#[from] serde_json::Error),
    /// Socket or other I/O failure while serving.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ApiError(err) => err.into_response(),
            Self::ConfigError(err) => err.into_response(),
            Self::DatabaseError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 Internal Server Error response.
///
/// The full error is logged, the client only receives a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!(
            "Catastrophic failure in the core of cyberspace: {}",
            self.0
        );

        Rest::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Houston, we have a SERIOUS problem in cyberspace! Something went terribly wrong on our side.",
            "INTERNAL_SERVER_ERROR",
            "An unexpected server error occurred. Please try again later \
            or contact support if the problem persists",
        )
    }
}
