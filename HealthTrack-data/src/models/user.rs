use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage model for a tracked user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique login/display name
    pub username: String,

    /// Unique email address
    pub email: String,

    /// When the user was created
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Unique login/display name
    pub username: String,

    /// Unique email address
    pub email: String,
}
