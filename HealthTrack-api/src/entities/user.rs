use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Public representation of a tracked user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique login/display name
    pub username: String,

    /// Unique email address
    pub email: String,

    /// When the user was created in the system
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Unique login/display name
    #[validate(length(min = 1, max = 64, message = "Username must be between 1 and 64 characters"))]
    pub username: String,

    /// Unique email address
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
}

/// Request payload for updating an existing user; omitted fields are unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New login/display name
    #[validate(length(min = 1, max = 64, message = "Username must be between 1 and 64 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// New email address
    #[validate(email(message = "Email must be a valid address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
