use axum::response::{IntoResponse, Response};
use sea_orm::DbErr;
use thiserror::Error;

use crate::server::error::InternalServerError;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database manager has not been initialized, call `init_database` first")]
    NotInitialized,
    #[error("Failed to connect to database: {0}")]
    Connection(#[source] DbErr),
    #[error("Failed to run database migrations: {0}")]
    Migration(#[source] DbErr),
}

impl IntoResponse for DatabaseError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
