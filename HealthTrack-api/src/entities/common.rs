use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::user::User;

/// Query parameters for paginated list requests
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PaginationParams {
    /// Number of results to return (default: 100, max: 1000)
    pub limit: Option<usize>,

    /// Number of results to skip (default: 0)
    pub offset: Option<usize>,
}

/// Paginated response format
#[derive(Debug, Serialize, ToSchema)]
#[aliases(UserPaginatedResponse = PaginatedResponse<User>)]
pub struct PaginatedResponse<T> {
    /// Total count of items available
    pub total_count: usize,

    /// Current offset
    pub offset: usize,

    /// Current limit
    pub limit: usize,

    /// Actual data items
    pub data: Vec<T>,
}
