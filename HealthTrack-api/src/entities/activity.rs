use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Public representation of a physical activity session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivitySession {
    /// Unique identifier for the session
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Kind of activity (e.g. running, cycling)
    pub activity_type: String,

    /// Session length in minutes
    pub duration_minutes: f64,

    /// When the session was recorded
    pub timestamp: DateTime<Utc>,
}

/// Request payload for recording a new activity session
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateActivityRequest {
    /// Kind of activity (e.g. running, cycling)
    #[validate(length(min = 1, max = 100, message = "Activity type must be between 1 and 100 characters"))]
    pub activity_type: String,

    /// Session length in minutes
    #[validate(range(min = 0.0, max = 1440.0, message = "Duration must be between 0 and 1440 minutes"))]
    pub duration_minutes: f64,
}

/// Request payload for updating an activity session; omitted fields are unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateActivityRequest {
    /// New kind of activity
    #[validate(length(min = 1, max = 100, message = "Activity type must be between 1 and 100 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,

    /// New session length in minutes
    #[validate(range(min = 0.0, max = 1440.0, message = "Duration must be between 0 and 1440 minutes"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
}
