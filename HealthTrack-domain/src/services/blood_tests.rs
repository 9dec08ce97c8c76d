use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::entities::blood_test::{BloodTest, CreateBloodTestRequest, UpdateBloodTestRequest};
use crate::entities::conversions;
use crate::services::validation_message;
use health_track_data::database::Database;
use health_track_data::repository::{
    BloodTestRepositoryTrait, RepositoryError, SqliteBloodTestRepository,
};

/// Blood-test service errors
#[derive(Debug, Error)]
pub enum BloodTestServiceError {
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

/// Trait for blood-test service operations
#[async_trait]
pub trait BloodTestServiceTrait {
    /// Record a new blood-test result for a user
    async fn create_blood_test(
        &self,
        user_id: Uuid,
        request: CreateBloodTestRequest,
    ) -> Result<BloodTest, BloodTestServiceError>;

    /// Get a blood-test result by ID
    async fn get_blood_test(&self, id: Uuid) -> Result<BloodTest, BloodTestServiceError>;

    /// Get all blood-test results belonging to a user
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BloodTest>, BloodTestServiceError>;

    /// Apply a patch to an existing blood-test result
    async fn update_blood_test(
        &self,
        id: Uuid,
        patch: UpdateBloodTestRequest,
    ) -> Result<BloodTest, BloodTestServiceError>;

    /// Delete a blood-test result, returning the removed record
    async fn delete_blood_test(&self, id: Uuid) -> Result<BloodTest, BloodTestServiceError>;
}

/// Blood-test service for domain logic
pub struct BloodTestService<R: BloodTestRepositoryTrait> {
    repository: R,
}

impl<R: BloodTestRepositoryTrait> BloodTestService<R> {
    /// Create a new blood-test service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> BloodTestServiceError {
        match err {
            RepositoryError::NotFound(msg) => BloodTestServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => BloodTestServiceError::Validation(msg),
            _ => BloodTestServiceError::Repository(err.to_string()),
        }
    }

    fn check_result_value(result: f64) -> Result<(), BloodTestServiceError> {
        if !result.is_finite() {
            return Err(BloodTestServiceError::Validation(
                "Result must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: BloodTestRepositoryTrait + Send + Sync> BloodTestServiceTrait for BloodTestService<R> {
    async fn create_blood_test(
        &self,
        user_id: Uuid,
        request: CreateBloodTestRequest,
    ) -> Result<BloodTest, BloodTestServiceError> {
        request
            .validate()
            .map_err(|e| BloodTestServiceError::Validation(validation_message(&e)))?;
        Self::check_result_value(request.result)?;

        let data_request = conversions::convert_to_data_create_blood_test(&request);
        let data_test = self
            .repository
            .create(user_id, data_request)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_blood_test(data_test))
    }

    async fn get_blood_test(&self, id: Uuid) -> Result<BloodTest, BloodTestServiceError> {
        let data_test = self
            .repository
            .get_by_id(id)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| BloodTestServiceError::NotFound(format!("Blood test {id} not found")))?;

        Ok(conversions::convert_to_domain_blood_test(data_test))
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BloodTest>, BloodTestServiceError> {
        let data_tests = self
            .repository
            .get_by_user(user_id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(data_tests
            .into_iter()
            .map(conversions::convert_to_domain_blood_test)
            .collect())
    }

    async fn update_blood_test(
        &self,
        id: Uuid,
        patch: UpdateBloodTestRequest,
    ) -> Result<BloodTest, BloodTestServiceError> {
        patch
            .validate()
            .map_err(|e| BloodTestServiceError::Validation(validation_message(&e)))?;
        if let Some(result) = patch.result {
            Self::check_result_value(result)?;
        }

        let mut test = self.get_blood_test(id).await?;
        if let Some(test_name) = patch.test_name {
            test.test_name = test_name;
        }
        if let Some(result) = patch.result {
            test.result = result;
        }
        if let Some(unit) = patch.unit {
            test.unit = unit;
        }

        let data_test = self
            .repository
            .update(&conversions::convert_to_data_blood_test(&test))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_blood_test(data_test))
    }

    async fn delete_blood_test(&self, id: Uuid) -> Result<BloodTest, BloodTestServiceError> {
        let test = self.get_blood_test(id).await?;
        self.repository
            .delete(id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(test)
    }
}

/// Create a blood-test service backed by the SQLite repository
pub fn create_blood_test_service(db: &Database) -> impl BloodTestServiceTrait + Send + Sync {
    BloodTestService::new(SqliteBloodTestRepository::new(db.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use health_track_data::repository::MockBloodTestRepository;

    #[tokio::test]
    async fn test_create_blood_test_rejects_empty_name() {
        let service = BloodTestService::new(MockBloodTestRepository::new());
        let result = service
            .create_blood_test(
                Uuid::new_v4(),
                CreateBloodTestRequest {
                    test_name: String::new(),
                    result: 90.0,
                    unit: "mg/dL".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(BloodTestServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_blood_test_rejects_non_finite_result() {
        let service = BloodTestService::new(MockBloodTestRepository::new());
        let result = service
            .create_blood_test(
                Uuid::new_v4(),
                CreateBloodTestRequest {
                    test_name: "glucose".to_string(),
                    result: f64::NAN,
                    unit: "mg/dL".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(BloodTestServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_blood_test_merges_patch_fields() {
        let existing = health_track_data::models::blood_test::BloodTest {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            test_name: "glucose".to_string(),
            result: 90.0,
            unit: "mg/dL".to_string(),
            timestamp: Utc::now(),
        };
        let id = existing.id;
        let service = BloodTestService::new(MockBloodTestRepository::with_tests(vec![existing]));

        let updated = service
            .update_blood_test(
                id,
                UpdateBloodTestRequest {
                    test_name: None,
                    result: Some(95.0),
                    unit: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.test_name, "glucose");
        assert_eq!(updated.result, 95.0);
        assert_eq!(updated.unit, "mg/dL");
    }
}
