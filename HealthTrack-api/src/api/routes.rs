use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use health_track_data::database::Database;
use health_track_domain::health::HealthServiceTrait;
use health_track_domain::services::{
    create_activity_service, create_blood_test_service, create_health_score_service,
    create_sleep_service, create_user_service, ActivityServiceTrait, BloodTestServiceTrait,
    HealthScoreServiceTrait, SleepServiceTrait, UserServiceTrait,
};

use crate::api::handlers::{activities, blood_tests, health, score, sleep, users};
use crate::openapi::configure_swagger_routes;

/// Service types for dependency injection
pub type UserService = Arc<dyn UserServiceTrait + Send + Sync>;
pub type ActivityService = Arc<dyn ActivityServiceTrait + Send + Sync>;
pub type SleepService = Arc<dyn SleepServiceTrait + Send + Sync>;
pub type BloodTestService = Arc<dyn BloodTestServiceTrait + Send + Sync>;
pub type ScoreService = Arc<dyn HealthScoreServiceTrait + Send + Sync>;
pub type HealthService = Arc<dyn HealthServiceTrait + Send + Sync>;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub activities: ActivityService,
    pub sleep: SleepService,
    pub blood_tests: BloodTestService,
    pub score: ScoreService,
    pub health: HealthService,
    /// Unix timestamp of process start, for uptime reporting
    pub server_started_at: u64,
}

impl AppState {
    /// Build the full service graph over one database handle
    pub fn new(db: &Database) -> Self {
        let server_started_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            users: Arc::new(create_user_service(db)),
            activities: Arc::new(create_activity_service(db)),
            sleep: Arc::new(create_sleep_service(db)),
            blood_tests: Arc::new(create_blood_test_service(db)),
            score: Arc::new(create_health_score_service(db)),
            health: health::create_health_service(db),
            server_started_at,
        }
    }
}

/// Create the application router
pub fn create_app(db: Database) -> Router {
    debug!("Creating application router");

    let state = AppState::new(&db);

    // Record CRUD plus the derived score, nested under the user where the
    // resource is owned
    let api_routes = Router::new()
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/:id/score", get(score::get_health_score))
        .route(
            "/users/:id/activities",
            post(activities::create_activity).get(activities::list_user_activities),
        )
        .route(
            "/activities/:id",
            get(activities::get_activity)
                .put(activities::update_activity)
                .delete(activities::delete_activity),
        )
        .route(
            "/users/:id/sleep",
            post(sleep::create_sleep).get(sleep::list_user_sleep),
        )
        .route(
            "/sleep/:id",
            get(sleep::get_sleep)
                .put(sleep::update_sleep)
                .delete(sleep::delete_sleep),
        )
        .route(
            "/users/:id/bloodtests",
            post(blood_tests::create_blood_test).get(blood_tests::list_user_blood_tests),
        )
        .route(
            "/bloodtests/:id",
            get(blood_tests::get_blood_test)
                .put(blood_tests::update_blood_test)
                .delete(blood_tests::delete_blood_test),
        );

    debug!("API routes configured");

    let public_routes = Router::new().route("/health", get(health::health_check));

    debug!("Public routes configured");

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    app
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    let swagger = configure_swagger_routes();
    app.merge(swagger)
}
