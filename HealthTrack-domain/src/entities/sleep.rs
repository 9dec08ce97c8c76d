use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Domain model for a sleep session
///
/// `duration_minutes` is derived from the endpoints by the sleep service
/// whenever a session is written; it is never accepted from callers.
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

    /// Elapsed whole minutes between the endpoints
    pub duration_minutes: i64,

    /// Optional free-form quality label (display-only)
    pub quality: Option<String>,

    /// When the session was recorded
    pub timestamp: DateTime<Utc>,
}

/// Request payload for creating a new sleep session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSleepRequest {
    /// When the session started
    pub start_time: DateTime<Utc>,

    /// When the session ended; must be after `start_time`
    pub end_time: DateTime<Utc>,

    /// Optional free-form quality label
    #[validate(length(max = 100, message = "Quality label cannot exceed 100 characters"))]
    pub quality: Option<String>,
}

/// Patch payload for updating an existing sleep session.
/// Unset fields keep their current value; moving either endpoint recomputes
/// the stored duration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSleepRequest {
    /// New start of the session
    pub start_time: Option<DateTime<Utc>>,

    /// New end of the session
    pub end_time: Option<DateTime<Utc>>,

    /// New quality label
    #[validate(length(max = 100, message = "Quality label cannot exceed 100 characters"))]
    pub quality: Option<String>,
}
