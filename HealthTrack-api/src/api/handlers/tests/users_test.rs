use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use super::test_state;
use crate::api::handlers::users;
use crate::entities::user::CreateUserRequest;

fn into_response<T: IntoResponse>(
    result: Result<T, axum::response::Response>,
) -> axum::response::Response {
    match result {
        Ok(response) => response.into_response(),
        Err(response) => response,
    }
}

#[tokio::test]
async fn test_create_user_returns_created() {
    let state = test_state();
    let response = into_response(
        users::create_user(
            State(state),
            Json(CreateUserRequest {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
            }),
        )
        .await,
    );

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_user_rejects_invalid_email() {
    let state = test_state();
    let response = into_response(
        users::create_user(
            State(state),
            Json(CreateUserRequest {
                username: "alice".to_string(),
                email: "not-an-email".to_string(),
            }),
        )
        .await,
    );

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_user_returns_not_found() {
    let state = test_state();
    let response = into_response(users::get_user(State(state), Path(Uuid::new_v4())).await);

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
