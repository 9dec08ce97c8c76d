use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use health_track_domain::entities::blood_test::BloodTest as DomainBloodTest;
use health_track_domain::services::blood_tests::BloodTestServiceError;

use super::ErrorResponse;
use crate::api::routes::AppState;
use crate::entities::blood_test::{BloodTest, CreateBloodTestRequest, UpdateBloodTestRequest};

/// Record a new blood-test result for a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/bloodtests",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = CreateBloodTestRequest,
    responses(
        (status = 201, description = "Blood test created", body = BloodTest),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "blood_tests"
)]
#[instrument(skip(state, request))]
pub async fn create_blood_test(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<CreateBloodTestRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Recording blood test for user: {}", user_id);

    let domain_request = health_track_domain::entities::blood_test::CreateBloodTestRequest {
        test_name: request.test_name,
        result: request.result,
        unit: request.unit,
    };

    match state.blood_tests.create_blood_test(user_id, domain_request).await {
        Ok(test) => {
            info!("Blood test created with ID: {}", test.id);
            Ok((StatusCode::CREATED, Json(convert_to_public_test(test))))
        }
        Err(e) => Err(map_blood_test_error(e)),
    }
}

/// Get all blood-test results for a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/bloodtests",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Blood tests retrieved", body = [BloodTest]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "blood_tests"
)]
#[instrument(skip(state))]
pub async fn list_user_blood_tests(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    match state.blood_tests.list_for_user(user_id).await {
        Ok(tests) => {
            let public: Vec<BloodTest> = tests.into_iter().map(convert_to_public_test).collect();
            Ok((StatusCode::OK, Json(public)))
        }
        Err(e) => Err(map_blood_test_error(e)),
    }
}

/// Get a single blood-test result by ID
#[utoipa::path(
    get,
    path = "/api/v1/bloodtests/{id}",
    params(("id" = Uuid, Path, description = "Blood test ID")),
    responses(
        (status = 200, description = "Blood test found", body = BloodTest),
        (status = 404, description = "Blood test not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "blood_tests"
)]
#[instrument(skip(state))]
pub async fn get_blood_test(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    match state.blood_tests.get_blood_test(id).await {
        Ok(test) => Ok((StatusCode::OK, Json(convert_to_public_test(test)))),
        Err(e) => Err(map_blood_test_error(e)),
    }
}

/// Apply a patch to an existing blood-test result
#[utoipa::path(
    put,
    path = "/api/v1/bloodtests/{id}",
    params(("id" = Uuid, Path, description = "Blood test ID")),
    request_body = UpdateBloodTestRequest,
    responses(
        (status = 200, description = "Blood test updated", body = BloodTest),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Blood test not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "blood_tests"
)]
#[instrument(skip(state, request))]
pub async fn update_blood_test(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBloodTestRequest>,
) -> Result<impl IntoResponse, Response> {
    info!("Updating blood test with ID: {}", id);

    let patch = health_track_domain::entities::blood_test::UpdateBloodTestRequest {
        test_name: request.test_name,
        result: request.result,
        unit: request.unit,
    };

    match state.blood_tests.update_blood_test(id, patch).await {
        Ok(test) => Ok((StatusCode::OK, Json(convert_to_public_test(test)))),
        Err(e) => Err(map_blood_test_error(e)),
    }
}

/// Delete a blood-test result
#[utoipa::path(
    delete,
    path = "/api/v1/bloodtests/{id}",
    params(("id" = Uuid, Path, description = "Blood test ID")),
    responses(
        (status = 200, description = "Blood test deleted", body = BloodTest),
        (status = 404, description = "Blood test not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "blood_tests"
)]
#[instrument(skip(state))]
pub async fn delete_blood_test(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Response> {
    info!("Deleting blood test with ID: {}", id);

    match state.blood_tests.delete_blood_test(id).await {
        Ok(test) => Ok((StatusCode::OK, Json(convert_to_public_test(test)))),
        Err(e) => Err(map_blood_test_error(e)),
    }
}

// Convert domain blood test to public blood test
fn convert_to_public_test(test: DomainBloodTest) -> BloodTest {
    BloodTest {
        id: test.id,
        user_id: test.user_id,
        test_name: test.test_name,
        result: test.result,
        unit: test.unit,
        timestamp: test.timestamp,
    }
}

// Map service errors onto HTTP responses
fn map_blood_test_error(e: BloodTestServiceError) -> Response {
    match e {
        BloodTestServiceError::NotFound(msg) => {
            info!("{}", msg);
            ErrorResponse::not_found("blood test").into_response()
        }
        BloodTestServiceError::Validation(msg) => {
            warn!("Invalid blood test data: {}", msg);
            ErrorResponse::validation_error(&msg, None).into_response()
        }
        BloodTestServiceError::Repository(msg) => {
            error!("Repository error while handling blood test request: {}", msg);
            ErrorResponse::internal_error().into_response()
        }
    }
}
