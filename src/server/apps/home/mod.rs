pub mod controller;
pub mod urls;

use crate::server::url_manager::{Module, Url};

pub struct HomeModule;

impl Module for HomeModule {
    fn name(&self) -> &'static str {
        "home"
    }

    fn urlpatterns(&self) -> Vec<Url> {
        urls::urlpatterns()
    }
}
