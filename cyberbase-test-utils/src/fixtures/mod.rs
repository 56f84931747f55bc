//! Database fixtures inserted during test execution.
//!
//! - `user` - User records

pub mod user;
