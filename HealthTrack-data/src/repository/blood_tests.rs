use async_trait::async_trait;
use chrono::Utc;
use rusqlite::params;
use tracing::debug;
use uuid::Uuid;

use super::errors::RepositoryError;
use crate::database::Database;
use crate::models::blood_test::{BloodTest, CreateBloodTestRequest};

/// Repository trait for blood-test results
#[async_trait]
pub trait BloodTestRepositoryTrait {
    /// Create a new blood-test result for a user
    async fn create(
        &self,
        user_id: Uuid,
        request: CreateBloodTestRequest,
    ) -> Result<BloodTest, RepositoryError>;

    /// Get a blood-test result by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<BloodTest>, RepositoryError>;

    /// Get all blood-test results belonging to a user, newest first
    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<BloodTest>, RepositoryError>;

    /// Persist updated fields of an existing result
    async fn update(&self, test: &BloodTest) -> Result<BloodTest, RepositoryError>;

    /// Delete a result; returns whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

/// SQLite-backed repository for blood-test results
#[derive(Debug, Clone)]
pub struct SqliteBloodTestRepository {
    db: Database,
}

impl SqliteBloodTestRepository {
    /// Create a new repository over the given database handle
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn row_to_test(row: &rusqlite::Row<'_>) -> rusqlite::Result<BloodTest> {
    Ok(BloodTest {
        id: row.get(0)?,
        user_id: row.get(1)?,
        test_name: row.get(2)?,
        result: row.get(3)?,
        unit: row.get(4)?,
        timestamp: row.get(5)?,
    })
}

#[async_trait]
impl BloodTestRepositoryTrait for SqliteBloodTestRepository {
    async fn create(
        &self,
        user_id: Uuid,
        request: CreateBloodTestRequest,
    ) -> Result<BloodTest, RepositoryError> {
        let test = BloodTest {
            id: Uuid::new_v4(),
            user_id,
            test_name: request.test_name,
            result: request.result,
            unit: request.unit,
            timestamp: Utc::now(),
        };

        debug!("Storing blood test in database: {}", test.id);
        let conn = self.db.conn()?;
        super::ensure_user_exists(&conn, user_id)?;
        conn.execute(
            "INSERT INTO blood_tests (id, user_id, test_name, result, unit, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                test.id,
                test.user_id,
                test.test_name,
                test.result,
                test.unit,
                test.timestamp,
            ],
        )?;

        Ok(test)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<BloodTest>, RepositoryError> {
        debug!("Getting blood test by ID from database: {}", id);
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, test_name, result, unit, timestamp
             FROM blood_tests WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], row_to_test) {
            Ok(test) => Ok(Some(test)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RepositoryError::Sqlite(e)),
        }
    }

    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<BloodTest>, RepositoryError> {
        debug!("Getting blood tests for user from database: {}", user_id);
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, test_name, result, unit, timestamp
             FROM blood_tests WHERE user_id = ?1 ORDER BY timestamp DESC",
        )?;
        let rows = stmt.query_map(params![user_id], row_to_test)?;

        let mut tests = Vec::new();
        for test in rows {
            tests.push(test?);
        }
        Ok(tests)
    }

    async fn update(&self, test: &BloodTest) -> Result<BloodTest, RepositoryError> {
        debug!("Updating blood test in database: {}", test.id);
        let conn = self.db.conn()?;
        let changed = conn.execute(
            "UPDATE blood_tests SET test_name = ?1, result = ?2, unit = ?3 WHERE id = ?4",
            params![test.test_name, test.result, test.unit, test.id],
        )?;

        if changed == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Blood test {} not found",
                test.id
            )));
        }
        Ok(test.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        debug!("Deleting blood test from database: {}", id);
        let conn = self.db.conn()?;
        let removed = conn.execute("DELETE FROM blood_tests WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}

/// Mock blood-test repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;

    /// Mock implementation of the blood-test repository backed by a fixed list
    #[derive(Debug, Default)]
    pub struct MockBloodTestRepository {
        tests: Vec<BloodTest>,
    }

    impl MockBloodTestRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self { tests: Vec::new() }
        }

        /// Create a mock repository with predefined results
        pub fn with_tests(tests: Vec<BloodTest>) -> Self {
            Self { tests }
        }
    }

    #[async_trait]
    impl BloodTestRepositoryTrait for MockBloodTestRepository {
        async fn create(
            &self,
            user_id: Uuid,
            request: CreateBloodTestRequest,
        ) -> Result<BloodTest, RepositoryError> {
            Ok(BloodTest {
                id: Uuid::new_v4(),
                user_id,
                test_name: request.test_name,
                result: request.result,
                unit: request.unit,
                timestamp: Utc::now(),
            })
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Option<BloodTest>, RepositoryError> {
            Ok(self.tests.iter().find(|t| t.id == id).cloned())
        }

        async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<BloodTest>, RepositoryError> {
            Ok(self
                .tests
                .iter()
                .filter(|t| t.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn update(&self, test: &BloodTest) -> Result<BloodTest, RepositoryError> {
            if self.tests.iter().any(|t| t.id == test.id) {
                Ok(test.clone())
            } else {
                Err(RepositoryError::NotFound(format!(
                    "Blood test {} not found",
                    test.id
                )))
            }
        }

        async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
            Ok(self.tests.iter().any(|t| t.id == id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::CreateUserRequest;
    use crate::repository::{SqliteUserRepository, UserRepositoryTrait};

    async fn seeded_user(db: &Database) -> Uuid {
        let users = SqliteUserRepository::new(db.clone());
        users
            .create(CreateUserRequest {
                username: "patient".to_string(),
                email: "patient@example.com".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let db = Database::in_memory().unwrap();
        let user_id = seeded_user(&db).await;
        let repo = SqliteBloodTestRepository::new(db);

        let created = repo
            .create(
                user_id,
                CreateBloodTestRequest {
                    test_name: "glucose".to_string(),
                    result: 92.0,
                    unit: "mg/dL".to_string(),
                },
            )
            .await
            .unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.test_name, "glucose");
        assert_eq!(fetched.result, 92.0);
        assert_eq!(fetched.unit, "mg/dL");
    }

    #[tokio::test]
    async fn test_cascade_delete_with_user() {
        let db = Database::in_memory().unwrap();
        let user_id = seeded_user(&db).await;
        let repo = SqliteBloodTestRepository::new(db.clone());

        let created = repo
            .create(
                user_id,
                CreateBloodTestRequest {
                    test_name: "cholesterol".to_string(),
                    result: 180.0,
                    unit: "mg/dL".to_string(),
                },
            )
            .await
            .unwrap();

        let users = SqliteUserRepository::new(db);
        assert!(users.delete(user_id).await.unwrap());

        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
        assert!(repo.get_by_user(user_id).await.unwrap().is_empty());
    }
}
