//! Data access layer repositories.
//!
//! Repositories wrap a sea-orm connection (or transaction) and expose typed database
//! operations. [`crud::CrudRepository`] provides the generic operations available for
//! every entity.

pub mod crud;
