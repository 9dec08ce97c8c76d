use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use health_track_domain::entities::user::User as DomainUser;
use health_track_domain::services::users::UserServiceError;

use super::ErrorResponse;
use crate::api::routes::AppState;
use crate::entities::common::{PaginatedResponse, PaginationParams, UserPaginatedResponse};
use crate::entities::user::{CreateUserRequest, UpdateUserRequest, User};

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "users"
)]
#[instrument(skip(state, request))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Creating new user");

    let domain_request = health_track_domain::entities::user::CreateUserRequest {
        username: request.username,
        email: request.email,
    };

    match state.users.create_user(domain_request).await {
        Ok(user) => {
            info!("User created with ID: {}", user.id);
            Ok((StatusCode::CREATED, Json(convert_to_public_user(user))))
        }
        Err(e) => Err(map_user_error(e, "user")),
    }
}

/// Get a page of users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Users retrieved", body = UserPaginatedResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "users"
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, Response> {
    let limit = params.limit.unwrap_or(100).min(1000); // Cap at 1000
    let offset = params.offset.unwrap_or(0);

    match state.users.list_users(limit, offset).await {
        Ok((users, total_count)) => {
            let response = PaginatedResponse {
                total_count,
                offset,
                limit,
                data: users.into_iter().map(convert_to_public_user).collect::<Vec<_>>(),
            };
            Ok((StatusCode::OK, Json(response)))
        }
        Err(e) => Err(map_user_error(e, "user")),
    }
}

/// Get a single user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    info!("Fetching user with ID: {}", id);

    match state.users.get_user(id).await {
        Ok(user) => Ok((StatusCode::OK, Json(convert_to_public_user(user)))),
        Err(e) => Err(map_user_error(e, "user")),
    }
}

/// Apply a patch to an existing user
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "users"
)]
#[instrument(skip(state, request))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Updating user with ID: {}", id);

    let patch = health_track_domain::entities::user::UpdateUserRequest {
        username: request.username,
        email: request.email,
    };

    match state.users.update_user(id, patch).await {
        Ok(user) => Ok((StatusCode::OK, Json(convert_to_public_user(user)))),
        Err(e) => Err(map_user_error(e, "user")),
    }
}

/// Delete a user and all of their records
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    info!("Deleting user with ID: {}", id);

    match state.users.delete_user(id).await {
        Ok(user) => Ok((StatusCode::OK, Json(convert_to_public_user(user)))),
        Err(e) => Err(map_user_error(e, "user")),
    }
}

// Convert domain user to public user
fn convert_to_public_user(user: DomainUser) -> User {
    User {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: user.created_at,
    }
}

// Map service errors onto HTTP responses
fn map_user_error(e: UserServiceError, resource: &str) -> Response {
    match e {
        UserServiceError::NotFound(msg) => {
            info!("{}", msg);
            ErrorResponse::not_found(resource).into_response()
        }
        UserServiceError::Validation(msg) => {
            warn!("Invalid user data: {}", msg);
            ErrorResponse::validation_error(&msg, None).into_response()
        }
        UserServiceError::Repository(msg) => {
            error!("Repository error while handling user request: {}", msg);
            ErrorResponse::internal_error().into_response()
        }
    }
}
