pub mod controller;
pub mod urls;

use crate::server::url_manager::{Module, Url};

/// CRUD endpoints over the `users` table.
pub struct UsersModule;

impl Module for UsersModule {
    fn name(&self) -> &'static str {
        "users"
    }

    fn urlpatterns(&self) -> Vec<Url> {
        urls::urlpatterns()
    }
}
