use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::entities::activity::{ActivitySession, CreateActivityRequest, UpdateActivityRequest};
use crate::entities::conversions;
use crate::services::validation_message;
use health_track_data::database::Database;
use health_track_data::repository::{
    ActivityRepositoryTrait, RepositoryError, SqliteActivityRepository,
};

/// Activity service errors
#[derive(Debug, Error)]
pub enum ActivityServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found error
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(String),
}

/// Trait for activity service operations
#[async_trait]
pub trait ActivityServiceTrait {
    /// Record a new activity session for a user
    async fn create_activity(
        &self,
        user_id: Uuid,
        request: CreateActivityRequest,
    ) -> Result<ActivitySession, ActivityServiceError>;

    /// Get an activity session by ID
    async fn get_activity(&self, id: Uuid) -> Result<ActivitySession, ActivityServiceError>;

    /// Get all activity sessions belonging to a user
    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ActivitySession>, ActivityServiceError>;

    /// Apply a patch to an existing activity session
    async fn update_activity(
        &self,
        id: Uuid,
        patch: UpdateActivityRequest,
    ) -> Result<ActivitySession, ActivityServiceError>;

    /// Delete an activity session, returning the removed record
    async fn delete_activity(&self, id: Uuid) -> Result<ActivitySession, ActivityServiceError>;
}

/// Activity service for domain logic
pub struct ActivityService<R: ActivityRepositoryTrait> {
    repository: R,
}

impl<R: ActivityRepositoryTrait> ActivityService<R> {
    /// Create a new activity service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> ActivityServiceError {
        match err {
            RepositoryError::NotFound(msg) => ActivityServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => ActivityServiceError::Validation(msg),
            _ => ActivityServiceError::Repository(err.to_string()),
        }
    }
}

#[async_trait]
impl<R: ActivityRepositoryTrait + Send + Sync> ActivityServiceTrait for ActivityService<R> {
    async fn create_activity(
        &self,
        user_id: Uuid,
        request: CreateActivityRequest,
    ) -> Result<ActivitySession, ActivityServiceError> {
        request
            .validate()
            .map_err(|e| ActivityServiceError::Validation(validation_message(&e)))?;

        let data_request = conversions::convert_to_data_create_activity(&request);
        let data_session = self
            .repository
            .create(user_id, data_request)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_activity(data_session))
    }

    async fn get_activity(&self, id: Uuid) -> Result<ActivitySession, ActivityServiceError> {
        let data_session = self
            .repository
            .get_by_id(id)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| {
                ActivityServiceError::NotFound(format!("Activity session {id} not found"))
            })?;

        Ok(conversions::convert_to_domain_activity(data_session))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ActivitySession>, ActivityServiceError> {
        let data_sessions = self
            .repository
            .get_by_user(user_id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(data_sessions
            .into_iter()
            .map(conversions::convert_to_domain_activity)
            .collect())
    }

    async fn update_activity(
        &self,
        id: Uuid,
        patch: UpdateActivityRequest,
    ) -> Result<ActivitySession, ActivityServiceError> {
        patch
            .validate()
            .map_err(|e| ActivityServiceError::Validation(validation_message(&e)))?;

        let mut session = self.get_activity(id).await?;
        if let Some(activity_type) = patch.activity_type {
            session.activity_type = activity_type;
        }
        if let Some(duration_minutes) = patch.duration_minutes {
            session.duration_minutes = duration_minutes;
        }

        let data_session = self
            .repository
            .update(&conversions::convert_to_data_activity(&session))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_activity(data_session))
    }

    async fn delete_activity(&self, id: Uuid) -> Result<ActivitySession, ActivityServiceError> {
        let session = self.get_activity(id).await?;
        self.repository
            .delete(id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(session)
    }
}

/// Create an activity service backed by the SQLite repository
pub fn create_activity_service(db: &Database) -> impl ActivityServiceTrait + Send + Sync {
    ActivityService::new(SqliteActivityRepository::new(db.clone()))
}
