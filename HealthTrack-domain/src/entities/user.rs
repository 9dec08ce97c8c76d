use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Domain model for a tracked user
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

/// Request payload for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Unique login/display name
    #[validate(length(min = 1, max = 64, message = "Username must be between 1 and 64 characters"))]
    pub username: String,

    /// Unique email address
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
}

/// Patch payload for updating an existing user.
/// Unset fields keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New login/display name
    #[validate(length(min = 1, max = 64, message = "Username must be between 1 and 64 characters"))]
    pub username: Option<String>,

    /// New email address
    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,
}
