use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::entities::conversions;
use crate::entities::user::{CreateUserRequest, UpdateUserRequest, User};
use crate::services::validation_message;
use health_track_data::database::Database;
use health_track_data::repository::{RepositoryError, SqliteUserRepository, UserRepositoryTrait};

/// User service errors
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found error
    #[error("User not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(String),
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait {
    /// Create a new user
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, UserServiceError>;

    /// Get a user by ID
    async fn get_user(&self, id: Uuid) -> Result<User, UserServiceError>;

    /// Get a page of users together with the total count
    async fn list_users(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<User>, usize), UserServiceError>;

    /// Apply a patch to an existing user
    async fn update_user(
        &self,
        id: Uuid,
        patch: UpdateUserRequest,
    ) -> Result<User, UserServiceError>;

    /// Delete a user, returning the removed record
    async fn delete_user(&self, id: Uuid) -> Result<User, UserServiceError>;
}

/// User service for domain logic
pub struct UserService<R: UserRepositoryTrait> {
    repository: R,
}

impl<R: UserRepositoryTrait> UserService<R> {
    /// Create a new user service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> UserServiceError {
        match err {
            RepositoryError::NotFound(msg) => UserServiceError::NotFound(msg),
            RepositoryError::Validation(msg) => UserServiceError::Validation(msg),
            _ => UserServiceError::Repository(err.to_string()),
        }
    }
}

#[async_trait]
impl<R: UserRepositoryTrait + Send + Sync> UserServiceTrait for UserService<R> {
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, UserServiceError> {
        request
            .validate()
            .map_err(|e| UserServiceError::Validation(validation_message(&e)))?;

        let data_request = conversions::convert_to_data_create_user(&request);
        let data_user = self
            .repository
            .create(data_request)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_user(data_user))
    }

    async fn get_user(&self, id: Uuid) -> Result<User, UserServiceError> {
        let data_user = self
            .repository
            .get_by_id(id)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| UserServiceError::NotFound(format!("User {id} not found")))?;

        Ok(conversions::convert_to_domain_user(data_user))
    }

    async fn list_users(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<User>, usize), UserServiceError> {
        let (data_users, total) = self
            .repository
            .list(limit, offset)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        let users = data_users
            .into_iter()
            .map(conversions::convert_to_domain_user)
            .collect();

        Ok((users, total))
    }

    async fn update_user(
        &self,
        id: Uuid,
        patch: UpdateUserRequest,
    ) -> Result<User, UserServiceError> {
        patch
            .validate()
            .map_err(|e| UserServiceError::Validation(validation_message(&e)))?;

        let mut user = self.get_user(id).await?;
        if let Some(username) = patch.username {
            user.username = username;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }

        let data_user = self
            .repository
            .update(&conversions::convert_to_data_user(&user))
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(conversions::convert_to_domain_user(data_user))
    }

    async fn delete_user(&self, id: Uuid) -> Result<User, UserServiceError> {
        let user = self.get_user(id).await?;
        self.repository
            .delete(id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(user)
    }
}

/// Create a user service backed by the SQLite repository
pub fn create_user_service(db: &Database) -> impl UserServiceTrait + Send + Sync {
    UserService::new(SqliteUserRepository::new(db.clone()))
}
