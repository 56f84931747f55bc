use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::server::config::CorsConfig;

static WILDCARD: &str = "*";

/// Builds the CORS layer from configuration.
///
/// Credentials are always allowed. Since browsers reject `*` together with credentials, a
/// wildcard entry echoes back whatever the request asked for. Entries that are not valid
/// header values, methods or header names are logged and skipped.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(&config.allow_origins))
        .allow_methods(allow_methods(&config.allow_methods))
        .allow_headers(allow_headers(&config.allow_headers))
        .allow_credentials(true)
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|value| value == WILDCARD)
}

fn allow_origin(origins: &[String]) -> AllowOrigin {
    if is_wildcard(origins) {
        return AllowOrigin::mirror_request();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::error!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}

fn allow_methods(methods: &[String]) -> AllowMethods {
    if is_wildcard(methods) {
        return AllowMethods::mirror_request();
    }

    let methods: Vec<Method> = methods
        .iter()
        .filter_map(|method| match Method::from_bytes(method.to_uppercase().as_bytes()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::error!("Ignoring invalid CORS method: {}", method);
                None
            }
        })
        .collect();

    AllowMethods::list(methods)
}

fn allow_headers(headers: &[String]) -> AllowHeaders {
    if is_wildcard(headers) {
        return AllowHeaders::mirror_request();
    }

    let headers: Vec<HeaderName> = headers
        .iter()
        .filter_map(|header| match HeaderName::from_bytes(header.as_bytes()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::error!("Ignoring invalid CORS header: {}", header);
                None
            }
        })
        .collect();

    AllowHeaders::list(headers)
}
