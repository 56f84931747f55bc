use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{apps::home::controller, url_manager::Url};

pub fn urlpatterns() -> Vec<Url> {
    let router = OpenApiRouter::new().routes(routes!(
        controller::home_get,
        controller::home_post,
        controller::home_put,
        controller::home_delete
    ));

    vec![Url::new(router, "/home")]
}
