use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Domain model for a physical activity session
#[derive(Debug, Clone, Serialize, Deserialize)]
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

/// Request payload for creating a new activity session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateActivityRequest {
    /// Kind of activity (e.g. running, cycling)
    #[validate(length(min = 1, max = 100, message = "Activity type must be between 1 and 100 characters"))]
    pub activity_type: String,

    /// Session length in minutes; negative durations are rejected here
    #[validate(range(min = 0.0, max = 1440.0, message = "Duration must be between 0 and 1440 minutes"))]
    pub duration_minutes: f64,
}

/// Patch payload for updating an existing activity session.
/// Unset fields keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateActivityRequest {
    /// New kind of activity
    #[validate(length(min = 1, max = 100, message = "Activity type must be between 1 and 100 characters"))]
    pub activity_type: Option<String>,

    /// New session length in minutes
    #[validate(range(min = 0.0, max = 1440.0, message = "Duration must be between 0 and 1440 minutes"))]
    pub duration_minutes: Option<f64>,
}
