use async_trait::async_trait;
use chrono::Utc;
use rusqlite::params;
use tracing::debug;
use uuid::Uuid;

use super::errors::RepositoryError;
use crate::database::Database;
use crate::models::activity::{ActivitySession, CreateActivityRequest};

/// Repository trait for physical activity sessions
#[async_trait]
pub trait ActivityRepositoryTrait {
    /// Create a new activity session for a user
    async fn create(
        &self,
        user_id: Uuid,
        request: CreateActivityRequest,
    ) -> Result<ActivitySession, RepositoryError>;

    /// Get an activity session by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<ActivitySession>, RepositoryError>;

    /// Get all activity sessions belonging to a user, newest first
    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<ActivitySession>, RepositoryError>;

    /// Persist updated fields of an existing session
    async fn update(&self, session: &ActivitySession) -> Result<ActivitySession, RepositoryError>;

    /// Delete a session; returns whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

/// SQLite-backed repository for activity sessions
#[derive(Debug, Clone)]
pub struct SqliteActivityRepository {
    db: Database,
}

impl SqliteActivityRepository {
    /// Create a new repository over the given database handle
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn row_to_session(row: &rusqlite::Row<'_>) -> rusqlite::Result<ActivitySession> {
    Ok(ActivitySession {
        id: row.get(0)?,
        user_id: row.get(1)?,
        activity_type: row.get(2)?,
        duration_minutes: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

#[async_trait]
impl ActivityRepositoryTrait for SqliteActivityRepository {
    async fn create(
        &self,
        user_id: Uuid,
        request: CreateActivityRequest,
    ) -> Result<ActivitySession, RepositoryError> {
        let session = ActivitySession {
            id: Uuid::new_v4(),
            user_id,
            activity_type: request.activity_type,
            duration_minutes: request.duration_minutes,
            timestamp: Utc::now(),
        };

        debug!("Storing activity session in database: {}", session.id);
        let conn = self.db.conn()?;
        super::ensure_user_exists(&conn, user_id)?;
        conn.execute(
            "INSERT INTO physical_activities
             (id, user_id, activity_type, duration_minutes, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                session.id,
                session.user_id,
                session.activity_type,
                session.duration_minutes,
                session.timestamp,
            ],
        )?;

        Ok(session)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<ActivitySession>, RepositoryError> {
        debug!("Getting activity session by ID from database: {}", id);
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, activity_type, duration_minutes, timestamp
             FROM physical_activities WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], row_to_session) {
            Ok(session) => Ok(Some(session)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RepositoryError::Sqlite(e)),
        }
    }

    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<ActivitySession>, RepositoryError> {
        debug!("Getting activity sessions for user from database: {}", user_id);
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, activity_type, duration_minutes, timestamp
             FROM physical_activities WHERE user_id = ?1 ORDER BY timestamp DESC",
        )?;
        let rows = stmt.query_map(params![user_id], row_to_session)?;

        let mut sessions = Vec::new();
        for session in rows {
            sessions.push(session?);
        }
        Ok(sessions)
    }

    async fn update(&self, session: &ActivitySession) -> Result<ActivitySession, RepositoryError> {
        debug!("Updating activity session in database: {}", session.id);
        let conn = self.db.conn()?;
        let changed = conn.execute(
            "UPDATE physical_activities
             SET activity_type = ?1, duration_minutes = ?2 WHERE id = ?3",
            params![session.activity_type, session.duration_minutes, session.id],
        )?;

        if changed == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Activity session {} not found",
                session.id
            )));
        }
        Ok(session.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        debug!("Deleting activity session from database: {}", id);
        let conn = self.db.conn()?;
        let removed = conn.execute("DELETE FROM physical_activities WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}

/// Mock activity repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;

    /// Mock implementation of the activity repository backed by a fixed list
    #[derive(Debug, Default)]
    pub struct MockActivityRepository {
        sessions: Vec<ActivitySession>,
    }

    impl MockActivityRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self { sessions: Vec::new() }
        }

        /// Create a mock repository with predefined sessions
        pub fn with_sessions(sessions: Vec<ActivitySession>) -> Self {
            Self { sessions }
        }
    }

    #[async_trait]
    impl ActivityRepositoryTrait for MockActivityRepository {
        async fn create(
            &self,
            user_id: Uuid,
            request: CreateActivityRequest,
        ) -> Result<ActivitySession, RepositoryError> {
            Ok(ActivitySession {
                id: Uuid::new_v4(),
                user_id,
                activity_type: request.activity_type,
                duration_minutes: request.duration_minutes,
                timestamp: Utc::now(),
            })
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Option<ActivitySession>, RepositoryError> {
            Ok(self.sessions.iter().find(|s| s.id == id).cloned())
        }

        async fn get_by_user(
            &self,
            user_id: Uuid,
        ) -> Result<Vec<ActivitySession>, RepositoryError> {
            Ok(self
                .sessions
                .iter()
                .filter(|s| s.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn update(
            &self,
            session: &ActivitySession,
        ) -> Result<ActivitySession, RepositoryError> {
            if self.sessions.iter().any(|s| s.id == session.id) {
                Ok(session.clone())
            } else {
                Err(RepositoryError::NotFound(format!(
                    "Activity session {} not found",
                    session.id
                )))
            }
        }

        async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
            Ok(self.sessions.iter().any(|s| s.id == id))
        }
    }
}
