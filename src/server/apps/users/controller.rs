use axum::{extract::State, http::StatusCode, response::Response};
use chrono::Utc;
use sea_orm::{ActiveValue, DbErr};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::IntoParams;

use crate::{
    model::{
        api::ApiResponse,
        user::{CreateUserDto, UpdateUserDto, UserDto},
    },
    server::{
        data::crud::{CrudRepository, DEFAULT_LIMIT, MAX_PAGE_BOUND},
        error::{api::ApiError, Error},
        extract::{ApiJson, ApiPath, ApiQuery},
        model::app::AppState,
        rest::Rest,
    },
};

pub static USERS_TAG: &str = "users";

/// Largest page size accepted by [`list_users`]
pub const MAX_LIMIT: u64 = 200;

type UserRepository<'a, C> = CrudRepository<'a, C, entity::user::Entity>;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Number of users to skip, at most 9223372036854775807
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of users to return, at most 200
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

fn user_not_found(id: i32) -> Error {
    ApiError::NotFound(format!("User with id {} does not exist", id)).into()
}

fn validate_name(name: &str) -> Result<String, Error> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::invalid_field("name", "must not be empty").into());
    }

    Ok(name.to_string())
}

/// List users
#[utoipa::path(
    get,
    path = "/",
    tag = USERS_TAG,
    params(Pagination),
    responses(
        (status = 200, description = "Page of users, `data` is omitted when the page is empty", body = ApiResponse),
        (status = 422, description = "Invalid pagination", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<Pagination>,
) -> Result<Response, Error> {
    if page.skip > MAX_PAGE_BOUND {
        return Err(ApiError::invalid_field(
            "skip",
            format!("must be less than or equal to {}", MAX_PAGE_BOUND),
        )
        .into());
    }

    if page.limit > MAX_LIMIT {
        return Err(ApiError::invalid_field(
            "limit",
            format!("must be less than or equal to {}", MAX_LIMIT),
        )
        .into());
    }

    let db = state.db.connection()?;
    let users: Vec<UserDto> = UserRepository::new(&db)
        .get_all(page.skip, Some(page.limit))
        .await?
        .into_iter()
        .map(UserDto::from)
        .collect();

    Ok(Rest::ok(serde_json::to_value(users)?))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USERS_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = ApiResponse),
        (status = 404, description = "User not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, Error> {
    let db = state.db.connection()?;
    let Some(user) = UserRepository::new(&db).get_by_id(id).await? else {
        return Err(user_not_found(id));
    };

    Ok(Rest::ok(serde_json::to_value(UserDto::from(user))?))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/",
    tag = USERS_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = ApiResponse),
        (status = 422, description = "Invalid user", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateUserDto>,
) -> Result<Response, Error> {
    let name = validate_name(&payload.name)?;

    let user = state
        .db
        .transaction(move |txn| {
            Box::pin(async move {
                let user = UserRepository::new(txn)
                    .save(entity::user::ActiveModel {
                        name: ActiveValue::Set(name),
                        created_at: ActiveValue::Set(Utc::now().naive_utc()),
                        ..Default::default()
                    })
                    .await?;

                Ok(user)
            })
        })
        .await?;

    Ok(Rest::response(
        StatusCode::CREATED,
        "Created",
        Some(serde_json::to_value(UserDto::from(user))?),
        None,
    ))
}

/// Update the fields of a user present in the request body
///
/// Unknown fields are ignored.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = USERS_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "The updated user", body = ApiResponse),
        (status = 404, description = "User not found", body = ApiResponse),
        (status = 422, description = "Invalid fields", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(mut data): ApiJson<Value>,
) -> Result<Response, Error> {
    let Some(fields) = data.as_object_mut() else {
        return Err(ApiError::Validation(json!("request body must be a JSON object")).into());
    };

    if let Some(name) = fields.get("name") {
        let name = name
            .as_str()
            .ok_or_else(|| ApiError::invalid_field("name", "must be a string"))?;
        let name = validate_name(name)?;
        fields.insert("name".to_string(), Value::String(name));
    }

    let db = state.db.connection()?;
    let repo = UserRepository::new(&db);

    let Some(user) = repo.get_by_id(id).await? else {
        return Err(user_not_found(id));
    };

    let user = match repo.update(user, data).await {
        Ok(user) => user,
        Err(DbErr::Json(detail)) => return Err(ApiError::Validation(json!(detail)).into()),
        Err(e) => return Err(e.into()),
    };

    Ok(Rest::ok(serde_json::to_value(UserDto::from(user))?))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USERS_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse),
        (status = 404, description = "User not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, Error> {
    let db = state.db.connection()?;
    let repo = UserRepository::new(&db);

    let Some(user) = repo.get_by_id(id).await? else {
        return Err(user_not_found(id));
    };

    repo.delete(user).await?;

    Ok(Rest::ok(json!({ "deleted": id })))
}
