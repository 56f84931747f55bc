//! Security response headers, enabled with `USE_SECWEB`.

use axum::{
    http::{header, HeaderName, HeaderValue},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Content-Security-Policy directives and their allowed sources.
///
/// The Swagger UI and ReDoc pages served under `/api` load their assets from the listed CDNs.
pub static CSP_DIRECTIVES: &[(&str, &[&str])] = &[
    ("default-src", &["'self'"]),
    (
        "script-src",
        &["'self'", "https://cdn.jsdelivr.net", "https://cdn.redoc.ly"],
    ),
    (
        "style-src",
        &[
            "'self'",
            "https://cdn.jsdelivr.net",
            "https://fonts.googleapis.com",
            "'unsafe-inline'",
        ],
    ),
    ("img-src", &["'self'", "data:", "https://cdn.redoc.ly"]),
    ("font-src", &["'self'", "https://fonts.gstatic.com"]),
    ("connect-src", &["'self'"]),
    ("object-src", &["'none'"]),
    ("base-uri", &["'self'"]),
    ("form-action", &["'self'"]),
    ("frame-ancestors", &["'none'"]),
    ("worker-src", &["blob:"]),
];

static EXTRA_HEADERS: &[(&str, &str)] = &[
    (
        "strict-transport-security",
        "max-age=31536000; includeSubDomains",
    ),
    ("x-frame-options", "DENY"),
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-site"),
    ("x-dns-prefetch-control", "off"),
    ("x-permitted-cross-domain-policies", "none"),
];

fn render_policy(inline_scripts: bool) -> String {
    CSP_DIRECTIVES
        .iter()
        .map(|(directive, sources)| {
            let mut sources = sources.join(" ");
            if inline_scripts && *directive == "script-src" {
                sources.push_str(" 'unsafe-inline'");
            }

            format!("{} {}", directive, sources)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Renders [`CSP_DIRECTIVES`] as a `Content-Security-Policy` header value.
pub fn content_security_policy() -> String {
    render_policy(false)
}

/// Policy for documentation pages that boot from an inline script.
///
/// The ReDoc page embeds the OpenAPI document in its inline `Redoc.init` call, so no fixed
/// hash can allow it and `script-src` also accepts `'unsafe-inline'`.
pub fn docs_content_security_policy() -> String {
    render_policy(true)
}

fn policy_value(policy: String) -> Option<HeaderValue> {
    HeaderValue::try_from(policy)
        .inspect_err(|e| tracing::error!("Invalid Content-Security-Policy, header not set: {}", e))
        .ok()
}

/// Adds the security headers to every response that does not already set them.
pub fn apply(router: Router) -> Router {
    let mut router = router;

    for (name, value) in EXTRA_HEADERS {
        router = router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(*name),
            HeaderValue::from_static(*value),
        ));
    }

    match policy_value(content_security_policy()) {
        Some(csp) => router.layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            csp,
        )),
        None => router,
    }
}

/// Sets the documentation policy on the routes of `router`.
///
/// Applied before [`apply`], the outer `if_not_present` layer keeps this policy.
pub fn apply_docs<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    match policy_value(docs_content_security_policy()) {
        Some(csp) => router.layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp,
        )),
        None => router,
    }
}
