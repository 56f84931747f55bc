use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{apps::users::controller, url_manager::Url};

pub fn urlpatterns() -> Vec<Url> {
    let router = OpenApiRouter::new()
        .routes(routes!(controller::list_users, controller::create_user))
        .routes(routes!(
            controller::get_user,
            controller::update_user,
            controller::delete_user
        ));

    vec![Url::new(router, "/users")]
}
