use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};
use tracing::{error, info};

use crate::api::rest::dto::{CreateUserReq, ListUsersQuery, MessageDto, UpdateUserReq, UserDto};
use crate::api::rest::error::{map_domain_error, ApiError};
use crate::contract::model::UsersQuery;
use crate::domain::service::Service;

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::bad_request("Id should be number"))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(v)| v).map_err(|rejection| {
        info!(error = %rejection.body_text(), "Rejected request body");
        ApiError::bad_request("Failed to parse json")
    })
}

/// List users matching the filters, one page at a time
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "One page of users; total in X-Total-Count", body = [UserDto]),
        (status = 400, description = "Page out of range or invalid filter", body = MessageDto),
        (status = 404, description = "No users match the filters", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto),
    )
)]
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Listing users with query: {:?}", query);

    let query = UsersQuery::try_from(query).map_err(ApiError::bad_request)?;

    match svc.list_users(query).await {
        Ok(page) => {
            let mut headers = HeaderMap::new();
            headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(page.total));
            let users: Vec<UserDto> = page.items.into_iter().map(UserDto::from).collect();
            Ok((headers, Json(users)))
        }
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 400, description = "Id is not a number", body = MessageDto),
        (status = 404, description = "User not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto),
    )
)]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserDto>, ApiError> {
    let id = parse_id(&raw_id)?;
    info!("Getting user with id: {}", id);

    match svc.get_user(id).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to get user {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Create a new user; age, gender and nationality are looked up by name
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserReq,
    responses(
        (status = 201, description = "User created", body = MessageDto),
        (status = 400, description = "Malformed body or invalid fields", body = MessageDto),
        (status = 409, description = "User with this full name already exists", body = MessageDto),
        (status = 502, description = "Enrichment providers unavailable", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto),
    )
)]
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    body: Result<Json<CreateUserReq>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageDto>), ApiError> {
    let req = json_body(body)?;
    info!("Creating user: {:?}", req);

    match svc.create_user(req.into()).await {
        Ok(user) => Ok((
            StatusCode::CREATED,
            Json(MessageDto::new(format!(
                "User created successfully with id: {}",
                user.id
            ))),
        )),
        Err(e) => {
            error!("Failed to create user: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Update an existing user with partial data
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserReq,
    responses(
        (status = 200, description = "User updated", body = MessageDto),
        (status = 400, description = "Malformed body, bad id or invalid fields", body = MessageDto),
        (status = 404, description = "User not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto),
    )
)]
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateUserReq>, JsonRejection>,
) -> Result<Json<MessageDto>, ApiError> {
    let id = parse_id(&raw_id)?;
    let req = json_body(body)?;
    info!("Updating user {} with: {:?}", id, req);

    match svc.update_user(id, req.into()).await {
        Ok(_) => Ok(Json(MessageDto::new("User updated successfully"))),
        Err(e) => {
            error!("Failed to update user {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Delete a user by ID
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageDto),
        (status = 400, description = "Id is not a number", body = MessageDto),
        (status = 404, description = "User not found", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto),
    )
)]
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageDto>, ApiError> {
    let id = parse_id(&raw_id)?;
    info!("Deleting user: {}", id);

    match svc.delete_user(id).await {
        Ok(()) => Ok(Json(MessageDto::new(format!(
            "User with id:{id} deleted successfully"
        )))),
        Err(e) => {
            error!("Failed to delete user {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}
