use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, info, instrument};
use uuid::Uuid;

use health_track_domain::entities::observation::{Observation, ObservationStatus};
use health_track_domain::services::health_score::HealthScoreServiceError;

use super::ErrorResponse;
use crate::api::routes::AppState;
use crate::entities::score::{
    HealthScoreObservation, ObservationCode, SubjectReference, ValueQuantity,
};

/// Compute the health score for a user.
///
/// The score is derived on demand from the user's activity sessions, sleep
/// sessions and blood-test results; nothing is persisted.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/score",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Health score computed", body = HealthScoreObservation),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "score"
)]
#[instrument(skip(state))]
pub async fn get_health_score(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    info!("Computing health score for user: {}", id);

    match state.score.health_score_for_user(id).await {
        Ok(observation) => Ok((StatusCode::OK, Json(convert_to_public_observation(observation)))),
        Err(HealthScoreServiceError::NotFound(msg)) => {
            info!("{}", msg);
            Err(ErrorResponse::not_found("user").into_response())
        }
        Err(HealthScoreServiceError::Repository(msg)) => {
            error!("Repository error while computing health score: {}", msg);
            Err(ErrorResponse::internal_error().into_response())
        }
    }
}

// Convert domain observation to public observation
fn convert_to_public_observation(observation: Observation) -> HealthScoreObservation {
    HealthScoreObservation {
        resource_type: observation.resource_type,
        id: observation.id,
        status: match observation.status {
            ObservationStatus::Final => "final".to_string(),
        },
        code: ObservationCode {
            text: observation.code.text,
        },
        subject: SubjectReference {
            reference: observation.subject.reference,
        },
        value_quantity: ValueQuantity {
            value: observation.value_quantity.value,
            unit: observation.value_quantity.unit,
            system: observation.value_quantity.system,
            code: observation.value_quantity.code,
        },
    }
}
