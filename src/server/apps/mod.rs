//! Application modules.
//!
//! Each module groups its controllers and a `urls` list, and implements
//! [`Module`](crate::server::url_manager::Module) so it can be enabled through
//! `INSTALLED_MODULES`.
//!
//! - `home` - Welcome endpoints, installed by default
//! - `users` - CRUD endpoints over the `users` table

pub mod home;
pub mod users;
