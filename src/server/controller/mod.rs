//! HTTP handlers mounted directly on the application router.
//!
//! Application modules keep their own controllers under [`crate::server::apps`]. This module
//! only holds the root welcome endpoint and the fallbacks producing the 404 & 405 envelopes.

pub mod fallback;
pub mod root;
