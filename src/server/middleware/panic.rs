use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::server::error::InternalServerError;

/// Turns a panic raised while handling a request into the 500 envelope.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    InternalServerError(format!("handler panicked: {}", detail)).into_response()
}
