use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::entities::conversions;
use crate::entities::sleep::{CreateSleepRequest, SleepSession, UpdateSleepRequest};
use crate::services::validation_message;
use health_track_data::database::Database;
use health_track_data::repository::{RepositoryError, SleepRepositoryTrait, SqliteSleepRepository};

/// Elapsed whole minutes between two instants.
///
/// Every write path that touches a sleep session's endpoints derives the
/// stored duration through this function, so the derivation is testable on
/// its own and cannot drift between create and update.
pub fn sleep_duration_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_minutes()
}

/// Sleep service errors
#[derive(Debug, Error)]
pub enum SleepServiceError {
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

/// Trait for sleep service operations
#[async_trait]
pub trait SleepServiceTrait {
    /// Record a new sleep session for a user
    async fn create_sleep(
        &self,
        user_id: Uuid,
        request: CreateSleepRequest,
    ) -> Result<SleepSession, SleepServiceError>;

    /// Get a sleep session by ID
    async fn get_sleep(&self, id: Uuid) -> Result<SleepSession, SleepServiceError>;

    /// Get all sleep sessions belonging to a user
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SleepSession>, SleepServiceError>;

    /// Apply a patch to an existing sleep session, recomputing the duration
    /// when either endpoint moves
    async fn update_sleep(
        &self,
        id: Uuid,
        patch: UpdateSleepRequest,
    ) -> Result<SleepSession, SleepServiceError>;

    /// Delete a sleep session, returning the removed record
    async fn delete_sleep(&self, id: Uuid) -> Result<SleepSession, SleepServiceError>;
}

/// Sleep service for domain logic
pub struct SleepService<R: SleepRepositoryTrait> {
    repository: R,
}

impl<R: SleepRepositoryTrait> SleepService<R> {
    /// Create a new sleep service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> SleepServiceError {
        match err {
            RepositoryError::NotFound(msg) => SleepServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => SleepServiceError::Validation(msg),
            _ => SleepServiceError::Repository(err.to_string()),
        }
    }

    fn check_interval(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), SleepServiceError> {
        if end <= start {
            return Err(SleepServiceError::Validation(
                "end_time must be after start_time".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: SleepRepositoryTrait + Send + Sync> SleepServiceTrait for SleepService<R> {
    async fn create_sleep(
        &self,
        user_id: Uuid,
        request: CreateSleepRequest,
    ) -> Result<SleepSession, SleepServiceError> {
        request
            .validate()
            .map_err(|e| SleepServiceError::Validation(validation_message(&e)))?;
        Self::check_interval(request.start_time, request.end_time)?;

        let duration = sleep_duration_minutes(request.start_time, request.end_time);
        let data_request = conversions::convert_to_data_create_sleep(&request, duration);
        let data_session = self
            .repository
            .create(user_id, data_request)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_sleep(data_session))
    }

    async fn get_sleep(&self, id: Uuid) -> Result<SleepSession, SleepServiceError> {
        let data_session = self
            .repository
            .get_by_id(id)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| SleepServiceError::NotFound(format!("Sleep session {id} not found")))?;

        Ok(conversions::convert_to_domain_sleep(data_session))
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SleepSession>, SleepServiceError> {
        let data_sessions = self
            .repository
            .get_by_user(user_id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(data_sessions
            .into_iter()
            .map(conversions::convert_to_domain_sleep)
            .collect())
    }

    async fn update_sleep(
        &self,
        id: Uuid,
        patch: UpdateSleepRequest,
    ) -> Result<SleepSession, SleepServiceError> {
        patch
            .validate()
            .map_err(|e| SleepServiceError::Validation(validation_message(&e)))?;

        let mut session = self.get_sleep(id).await?;
        if let Some(start_time) = patch.start_time {
            session.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            session.end_time = end_time;
        }
        if let Some(quality) = patch.quality {
            session.quality = Some(quality);
        }

        Self::check_interval(session.start_time, session.end_time)?;
        session.duration_minutes = sleep_duration_minutes(session.start_time, session.end_time);

        let data_session = self
            .repository
            .update(&conversions::convert_to_data_sleep(&session))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_sleep(data_session))
    }

    async fn delete_sleep(&self, id: Uuid) -> Result<SleepSession, SleepServiceError> {
        let session = self.get_sleep(id).await?;
        self.repository
            .delete(id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(session)
    }
}

/// Create a sleep service backed by the SQLite repository
pub fn create_sleep_service(db: &Database) -> impl SleepServiceTrait + Send + Sync {
    SleepService::new(SqliteSleepRepository::new(db.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use health_track_data::repository::MockSleepRepository;

    #[test]
    fn test_duration_is_elapsed_whole_minutes() {
        let start = Utc.with_ymd_and_hms(2025, 8, 24, 22, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 8, 25, 6, 0, 0).unwrap();
        assert_eq!(sleep_duration_minutes(start, end), 480);

        // Partial minutes truncate
        let end = Utc.with_ymd_and_hms(2025, 8, 25, 6, 0, 59).unwrap();
        assert_eq!(sleep_duration_minutes(start, end), 480);
    }

    #[tokio::test]
    async fn test_create_sleep_derives_duration() {
        let service = SleepService::new(MockSleepRepository::new());
        let start = Utc.with_ymd_and_hms(2025, 8, 24, 23, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 8, 25, 7, 0, 0).unwrap();

        let session = service
            .create_sleep(
                Uuid::new_v4(),
                CreateSleepRequest {
                    start_time: start,
                    end_time: end,
                    quality: Some("good".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(session.duration_minutes, 450);
    }

    #[tokio::test]
    async fn test_create_sleep_rejects_inverted_interval() {
        let service = SleepService::new(MockSleepRepository::new());
        let start = Utc.with_ymd_and_hms(2025, 8, 25, 6, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 8, 24, 22, 0, 0).unwrap();

        let result = service
            .create_sleep(
                Uuid::new_v4(),
                CreateSleepRequest {
                    start_time: start,
                    end_time: end,
                    quality: None,
                },
            )
            .await;

        assert!(matches!(result, Err(SleepServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_sleep_recomputes_duration_when_endpoint_moves() {
        let start = Utc.with_ymd_and_hms(2025, 8, 24, 22, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 8, 25, 6, 0, 0).unwrap();
        let existing = health_track_data::models::sleep::SleepSession {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            start_time: start,
            end_time: end,
            duration_minutes: 480,
            quality: None,
            timestamp: Utc::now(),
        };
        let id = existing.id;
        let service = SleepService::new(MockSleepRepository::with_sessions(vec![existing]));

        let updated = service
            .update_sleep(
                id,
                UpdateSleepRequest {
                    start_time: None,
                    end_time: Some(Utc.with_ymd_and_hms(2025, 8, 25, 7, 0, 0).unwrap()),
                    quality: Some("excellent".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.duration_minutes, 540);
        assert_eq!(updated.quality.as_deref(), Some("excellent"));
    }

    #[tokio::test]
    async fn test_update_sleep_rejects_patch_that_inverts_interval() {
        let start = Utc.with_ymd_and_hms(2025, 8, 24, 22, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 8, 25, 6, 0, 0).unwrap();
        let existing = health_track_data::models::sleep::SleepSession {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            start_time: start,
            end_time: end,
            duration_minutes: 480,
            quality: None,
            timestamp: Utc::now(),
        };
        let id = existing.id;
        let service = SleepService::new(MockSleepRepository::with_sessions(vec![existing]));

        let result = service
            .update_sleep(
                id,
                UpdateSleepRequest {
                    start_time: Some(Utc.with_ymd_and_hms(2025, 8, 25, 8, 0, 0).unwrap()),
                    end_time: None,
                    quality: None,
                },
            )
            .await;

        assert!(matches!(result, Err(SleepServiceError::Validation(_))));
    }
}
