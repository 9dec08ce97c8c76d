use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage model for a sleep session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepSession {
    /// Unique identifier for the session
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// When the session started
    pub start_time: DateTime<Utc>,

    /// When the session ended
    pub end_time: DateTime<Utc>,

    /// Elapsed whole minutes between the endpoints.
    /// Computed by the domain layer before the row is written.
    pub duration_minutes: i64,

    /// Optional free-form quality label (display-only)
    pub quality: Option<String>,

    /// When the session was recorded
    pub timestamp: DateTime<Utc>,
}

/// Input data for creating a new sleep session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSleepRequest {
    /// When the session started
    pub start_time: DateTime<Utc>,

    /// When the session ended
    pub end_time: DateTime<Utc>,

    /// Elapsed whole minutes between the endpoints
    pub duration_minutes: i64,

    /// Optional free-form quality label
    pub quality: Option<String>,
}
