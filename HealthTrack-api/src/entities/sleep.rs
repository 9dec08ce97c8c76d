use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Public representation of a sleep session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SleepSession {
    /// Unique identifier for the session
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// When the session started
    pub start_time: DateTime<Utc>,

    /// When the session ended
    pub end_time: DateTime<Utc>,

    /// Elapsed whole minutes between the endpoints (derived)
    pub duration_minutes: i64,

    /// Optional free-form quality label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,

    /// When the session was recorded
    pub timestamp: DateTime<Utc>,
}

/// Request payload for recording a new sleep session
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSleepRequest {
    /// When the session started
    pub start_time: DateTime<Utc>,

    /// When the session ended; must be after `start_time`
    pub end_time: DateTime<Utc>,

    /// Optional free-form quality label
    #[validate(length(max = 100, message = "Quality label cannot exceed 100 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

/// Request payload for updating a sleep session; omitted fields are unchanged.
/// Moving either endpoint recomputes the stored duration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSleepRequest {
    /// New start of the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    /// New end of the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    /// New quality label
    #[validate(length(max = 100, message = "Quality label cannot exceed 100 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}
