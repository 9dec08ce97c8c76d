use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use health_track_domain::entities::sleep::SleepSession as DomainSleepSession;
use health_track_domain::services::sleep::SleepServiceError;

use super::ErrorResponse;
use crate::api::routes::AppState;
use crate::entities::sleep::{CreateSleepRequest, SleepSession, UpdateSleepRequest};

/// Record a new sleep session for a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/sleep",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = CreateSleepRequest,
    responses(
        (status = 201, description = "Sleep session created", body = SleepSession),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "sleep"
)]
#[instrument(skip(state, request))]
pub async fn create_sleep(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<CreateSleepRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Recording sleep session for user: {}", user_id);

    let domain_request = health_track_domain::entities::sleep::CreateSleepRequest {
        start_time: request.start_time,
        end_time: request.end_time,
        quality: request.quality,
    };

    match state.sleep.create_sleep(user_id, domain_request).await {
        Ok(session) => {
            info!("Sleep session created with ID: {}", session.id);
            Ok((StatusCode::CREATED, Json(convert_to_public_session(session))))
        }
        Err(e) => Err(map_sleep_error(e)),
    }
}

/// Get all sleep sessions for a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/sleep",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Sleep sessions retrieved", body = [SleepSession]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "sleep"
)]
#[instrument(skip(state))]
pub async fn list_user_sleep(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    match state.sleep.list_for_user(user_id).await {
        Ok(sessions) => {
            let public: Vec<SleepSession> =
                sessions.into_iter().map(convert_to_public_session).collect();
            Ok((StatusCode::OK, Json(public)))
        }
        Err(e) => Err(map_sleep_error(e)),
    }
}

/// Get a single sleep session by ID
#[utoipa::path(
    get,
    path = "/api/v1/sleep/{id}",
    params(("id" = Uuid, Path, description = "Sleep session ID")),
    responses(
        (status = 200, description = "Sleep session found", body = SleepSession),
        (status = 404, description = "Sleep session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "sleep"
)]
#[instrument(skip(state))]
pub async fn get_sleep(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    match state.sleep.get_sleep(id).await {
        Ok(session) => Ok((StatusCode::OK, Json(convert_to_public_session(session)))),
        Err(e) => Err(map_sleep_error(e)),
    }
}

/// Apply a patch to an existing sleep session.
/// Moving either endpoint recomputes the stored duration.
#[utoipa::path(
    put,
    path = "/api/v1/sleep/{id}",
    params(("id" = Uuid, Path, description = "Sleep session ID")),
    request_body = UpdateSleepRequest,
    responses(
        (status = 200, description = "Sleep session updated", body = SleepSession),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Sleep session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "sleep"
)]
#[instrument(skip(state, request))]
pub async fn update_sleep(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSleepRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Updating sleep session with ID: {}", id);

    let patch = health_track_domain::entities::sleep::UpdateSleepRequest {
        start_time: request.start_time,
        end_time: request.end_time,
        quality: request.quality,
    };

    match state.sleep.update_sleep(id, patch).await {
        Ok(session) => Ok((StatusCode::OK, Json(convert_to_public_session(session)))),
        Err(e) => Err(map_sleep_error(e)),
    }
}

/// Delete a sleep session
#[utoipa::path(
    delete,
    path = "/api/v1/sleep/{id}",
    params(("id" = Uuid, Path, description = "Sleep session ID")),
    responses(
        (status = 200, description = "Sleep session deleted", body = SleepSession),
        (status = 404, description = "Sleep session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "sleep"
)]
#[instrument(skip(state))]
pub async fn delete_sleep(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    info!("Deleting sleep session with ID: {}", id);

    match state.sleep.delete_sleep(id).await {
        Ok(session) => Ok((StatusCode::OK, Json(convert_to_public_session(session)))),
        Err(e) => Err(map_sleep_error(e)),
    }
}

// Convert domain session to public session
fn convert_to_public_session(session: DomainSleepSession) -> SleepSession {
    SleepSession {
        id: session.id,
        user_id: session.user_id,
        start_time: session.start_time,
        end_time: session.end_time,
        duration_minutes: session.duration_minutes,
        quality: session.quality,
        timestamp: session.timestamp,
    }
}

// Map service errors onto HTTP responses
fn map_sleep_error(e: SleepServiceError) -> Response {
    match e {
        SleepServiceError::NotFound(msg) => {
            info!("{}", msg);
            ErrorResponse::not_found("sleep session").into_response()
        }
        SleepServiceError::Validation(msg) => {
            warn!("Invalid sleep data: {}", msg);
            ErrorResponse::validation_error(&msg, None).into_response()
        }
        SleepServiceError::Repository(msg) => {
            error!("Repository error while handling sleep request: {}", msg);
            ErrorResponse::internal_error().into_response()
        }
    }
}
