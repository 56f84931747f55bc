//! Tower middleware stack wrapped around the application router.
//!
//! From the innermost layer outwards:
//! - panic recovery rendering a 500 envelope
//! - request body size limit (`MAX_BODY_SIZE`)
//! - gzip compression
//! - CORS
//! - security headers, when `USE_SECWEB` is enabled
//! - request logging, when `LOG_REQUESTS` is enabled

pub mod compression;
pub mod cors;
pub mod panic;
pub mod request_log;
pub mod security;

use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::server::config::Config;

/// Wraps `router` with the middleware enabled by `config`.
pub fn apply(router: Router, config: &Config) -> Router {
    let mut router = router
        .layer(CatchPanicLayer::custom(panic::handle_panic))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(compression::compression_layer())
        .layer(cors::cors_layer(&config.cors));

    if config.use_secweb {
        router = security::apply(router);
    }

    if config.log_requests {
        router = router.layer(from_fn(request_log::log_request));
    }

    router
}
