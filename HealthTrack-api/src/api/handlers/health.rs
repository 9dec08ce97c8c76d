use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use health_track_data::database::Database;
use health_track_domain::health::{
    self, ComponentStatus as DomainComponentStatus, HealthServiceTrait, SystemHealth, SystemStatus,
};

use crate::api::routes::AppState;

/// Health check response model with system information
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Current service status ("ok", "degraded", or "error")
    pub status: String,
    /// Current application version from Cargo manifest
    pub version: String,
    /// Timestamp of when the response was generated
    pub timestamp: u64,
    /// Uptime of the service in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Details about various components of the system
    pub components: ComponentStatus,
    /// Environment information
    pub environment: String,
}

/// Status of individual system components
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// Database connection status
    pub database: ComponentHealthStatus,
    /// API status
    pub api: ComponentHealthStatus,
}

/// Health status for an individual component
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentHealthStatus {
    /// Status of the component ("ok", "degraded", or "error")
    pub status: String,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Health check endpoint to verify the API is running
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API is healthy", body = HealthResponse),
        (status = 500, description = "API is not healthy", body = HealthResponse),
        (status = 503, description = "API is degraded", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    info!("Health check requested");

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let uptime = Some(now.saturating_sub(state.server_started_at));

    let system_health = state.health.get_system_health().await;

    let overall_status = match system_health.status {
        SystemStatus::Healthy => "ok",
        SystemStatus::Degraded => "degraded",
        SystemStatus::Unhealthy => "error",
    };

    let database = match system_health.components.get("database") {
        Some(component) => ComponentHealthStatus {
            status: map_component_status(&component.status),
            message: component.details.clone(),
        },
        None => ComponentHealthStatus {
            status: "ok".to_string(),
            message: None,
        },
    };

    let response = HealthResponse {
        status: overall_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime,
        components: ComponentStatus {
            database,
            // The API component is healthy whenever it can answer at all
            api: ComponentHealthStatus {
                status: "ok".to_string(),
                message: None,
            },
        },
        environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
    };

    match overall_status {
        "ok" => (StatusCode::OK, Json(response)),
        "degraded" => (StatusCode::SERVICE_UNAVAILABLE, Json(response)),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, Json(response)),
    }
}

/// Map domain component status to API status string
fn map_component_status(status: &DomainComponentStatus) -> String {
    match status {
        DomainComponentStatus::Healthy => "ok",
        DomainComponentStatus::Degraded => "degraded",
        DomainComponentStatus::Unhealthy => "error",
    }
    .to_string()
}

/// Implementation of the health service over the application database handle
#[derive(Debug)]
pub struct HealthService {
    db: Database,
}

impl HealthService {
    /// Create a new health service
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        health::get_system_health(&self.db).await
    }

    async fn check_database_status(&self) -> Result<bool, String> {
        health::check_database_status(&self.db).await
    }
}

/// Factory function to create a health service
pub fn create_health_service(db: &Database) -> Arc<dyn HealthServiceTrait + Send + Sync> {
    Arc::new(HealthService::new(db.clone()))
}
