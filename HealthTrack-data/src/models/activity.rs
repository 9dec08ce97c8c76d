use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage model for a physical activity session
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

/// Input data for creating a new activity session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActivityRequest {
    /// Kind of activity (e.g. running, cycling)
    pub activity_type: String,

    /// Session length in minutes
    pub duration_minutes: f64,
}
