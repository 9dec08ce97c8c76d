use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // User endpoints
        crate::api::handlers::users::create_user,
        crate::api::handlers::users::list_users,
        crate::api::handlers::users::get_user,
        crate::api::handlers::users::update_user,
        crate::api::handlers::users::delete_user,

        // Health score endpoint
        crate::api::handlers::score::get_health_score,

        // Activity endpoints
        crate::api::handlers::activities::create_activity,
        crate::api::handlers::activities::list_user_activities,
        crate::api::handlers::activities::get_activity,
        crate::api::handlers::activities::update_activity,
        crate::api::handlers::activities::delete_activity,

        // Sleep endpoints
        crate::api::handlers::sleep::create_sleep,
        crate::api::handlers::sleep::list_user_sleep,
        crate::api::handlers::sleep::get_sleep,
        crate::api::handlers::sleep::update_sleep,
        crate::api::handlers::sleep::delete_sleep,

        // Blood-test endpoints
        crate::api::handlers::blood_tests::create_blood_test,
        crate::api::handlers::blood_tests::list_user_blood_tests,
        crate::api::handlers::blood_tests::get_blood_test,
        crate::api::handlers::blood_tests::update_blood_test,
        crate::api::handlers::blood_tests::delete_blood_test,
    ),
    components(
        schemas(
            // Entities
            crate::entities::user::User,
            crate::entities::user::CreateUserRequest,
            crate::entities::user::UpdateUserRequest,
            crate::entities::activity::ActivitySession,
            crate::entities::activity::CreateActivityRequest,
            crate::entities::activity::UpdateActivityRequest,
            crate::entities::sleep::SleepSession,
            crate::entities::sleep::CreateSleepRequest,
            crate::entities::sleep::UpdateSleepRequest,
            crate::entities::blood_test::BloodTest,
            crate::entities::blood_test::CreateBloodTestRequest,
            crate::entities::blood_test::UpdateBloodTestRequest,
            crate::entities::score::HealthScoreObservation,
            crate::entities::score::ObservationCode,
            crate::entities::score::SubjectReference,
            crate::entities::score::ValueQuantity,
            crate::entities::common::PaginationParams,
            crate::entities::common::UserPaginatedResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,

            // Shared error envelope
            crate::api::handlers::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "users", description = "User management endpoints"),
        (name = "activities", description = "Physical activity tracking endpoints"),
        (name = "sleep", description = "Sleep tracking endpoints"),
        (name = "blood_tests", description = "Blood-test tracking endpoints"),
        (name = "score", description = "Derived health score endpoint")
    ),
    info(
        title = "HealthTrack API",
        version = "0.1.0",
        description = "API for tracking personal health records and computing a composite health score",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
struct ApiDoc;
