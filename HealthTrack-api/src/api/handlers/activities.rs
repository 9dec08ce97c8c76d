use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use health_track_domain::entities::activity::ActivitySession as DomainActivitySession;
use health_track_domain::services::activities::ActivityServiceError;

use super::ErrorResponse;
use crate::api::routes::AppState;
use crate::entities::activity::{ActivitySession, CreateActivityRequest, UpdateActivityRequest};

/// Record a new activity session for a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/activities",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Activity session created", body = ActivitySession),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "activities"
)]
#[instrument(skip(state, request))]
pub async fn create_activity(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<CreateActivityRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Recording activity session for user: {}", user_id);

    let domain_request = health_track_domain::entities::activity::CreateActivityRequest {
        activity_type: request.activity_type,
        duration_minutes: request.duration_minutes,
    };

    match state.activities.create_activity(user_id, domain_request).await {
        Ok(session) => {
            info!("Activity session created with ID: {}", session.id);
            Ok((StatusCode::CREATED, Json(convert_to_public_session(session))))
        }
        Err(e) => Err(map_activity_error(e)),
    }
}

/// Get all activity sessions for a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/activities",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Activity sessions retrieved", body = [ActivitySession]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "activities"
)]
#[instrument(skip(state))]
pub async fn list_user_activities(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    match state.activities.list_for_user(user_id).await {
        Ok(sessions) => {
            let public: Vec<ActivitySession> =
                sessions.into_iter().map(convert_to_public_session).collect();
            Ok((StatusCode::OK, Json(public)))
        }
        Err(e) => Err(map_activity_error(e)),
    }
}

/// Get a single activity session by ID
#[utoipa::path(
    get,
    path = "/api/v1/activities/{id}",
    params(("id" = Uuid, Path, description = "Activity session ID")),
    responses(
        (status = 200, description = "Activity session found", body = ActivitySession),
        (status = 404, description = "Activity session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "activities"
)]
#[instrument(skip(state))]
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    match state.activities.get_activity(id).await {
        Ok(session) => Ok((StatusCode::OK, Json(convert_to_public_session(session)))),
        Err(e) => Err(map_activity_error(e)),
    }
}

/// Apply a patch to an existing activity session
#[utoipa::path(
    put,
    path = "/api/v1/activities/{id}",
    params(("id" = Uuid, Path, description = "Activity session ID")),
    request_body = UpdateActivityRequest,
    responses(
        (status = 200, description = "Activity session updated", body = ActivitySession),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Activity session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "activities"
)]
#[instrument(skip(state, request))]
pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateActivityRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Updating activity session with ID: {}", id);

    let patch = health_track_domain::entities::activity::UpdateActivityRequest {
        activity_type: request.activity_type,
        duration_minutes: request.duration_minutes,
    };

    match state.activities.update_activity(id, patch).await {
        Ok(session) => Ok((StatusCode::OK, Json(convert_to_public_session(session)))),
        Err(e) => Err(map_activity_error(e)),
    }
}

/// Delete an activity session
#[utoipa::path(
    delete,
    path = "/api/v1/activities/{id}",
    params(("id" = Uuid, Path, description = "Activity session ID")),
    responses(
        (status = 200, description = "Activity session deleted", body = ActivitySession),
        (status = 404, description = "Activity session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "activities"
)]
#[instrument(skip(state))]
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    info!("Deleting activity session with ID: {}", id);

    match state.activities.delete_activity(id).await {
        Ok(session) => Ok((StatusCode::OK, Json(convert_to_public_session(session)))),
        Err(e) => Err(map_activity_error(e)),
    }
}

// Convert domain session to public session
fn convert_to_public_session(session: DomainActivitySession) -> ActivitySession {
    ActivitySession {
        id: session.id,
        user_id: session.user_id,
        activity_type: session.activity_type,
        duration_minutes: session.duration_minutes,
        timestamp: session.timestamp,
    }
}

// Map service errors onto HTTP responses
fn map_activity_error(e: ActivityServiceError) -> Response {
    match e {
        ActivityServiceError::NotFound(msg) => {
            info!("{}", msg);
            ErrorResponse::not_found("activity session").into_response()
        }
        ActivityServiceError::Validation(msg) => {
            warn!("Invalid activity data: {}", msg);
            ErrorResponse::validation_error(&msg, None).into_response()
        }
        ActivityServiceError::Repository(msg) => {
            error!("Repository error while handling activity request: {}", msg);
            ErrorResponse::internal_error().into_response()
        }
    }
}
