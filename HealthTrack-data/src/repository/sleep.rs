use async_trait::async_trait;
use chrono::Utc;
use rusqlite::params;
use tracing::debug;
use uuid::Uuid;

use super::errors::RepositoryError;
use crate::database::Database;
use crate::models::sleep::{CreateSleepRequest, SleepSession};

/// Repository trait for sleep sessions
#[async_trait]
pub trait SleepRepositoryTrait {
    /// Create a new sleep session for a user
    async fn create(
        &self,
        user_id: Uuid,
        request: CreateSleepRequest,
    ) -> Result<SleepSession, RepositoryError>;

    /// Get a sleep session by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<SleepSession>, RepositoryError>;

    /// Get all sleep sessions belonging to a user, newest first
    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<SleepSession>, RepositoryError>;

    /// Persist updated fields of an existing session
    async fn update(&self, session: &SleepSession) -> Result<SleepSession, RepositoryError>;

    /// Delete a session; returns whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

/// SQLite-backed repository for sleep sessions
#[derive(Debug, Clone)]
pub struct SqliteSleepRepository {
    db: Database,
}

impl SqliteSleepRepository {
    /// Create a new repository over the given database handle
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn row_to_session(row: &rusqlite::Row<'_>) -> rusqlite::Result<SleepSession> {
    Ok(SleepSession {
        id: row.get(0)?,
        user_id: row.get(1)?,
        start_time: row.get(2)?,
        end_time: row.get(3)?,
        duration_minutes: row.get(4)?,
        quality: row.get(5)?,
        timestamp: row.get(6)?,
    })
}

#[async_trait]
impl SleepRepositoryTrait for SqliteSleepRepository {
    async fn create(
        &self,
        user_id: Uuid,
        request: CreateSleepRequest,
    ) -> Result<SleepSession, RepositoryError> {
        let session = SleepSession {
            id: Uuid::new_v4(),
            user_id,
            start_time: request.start_time,
            end_time: request.end_time,
            duration_minutes: request.duration_minutes,
            quality: request.quality,
            timestamp: Utc::now(),
        };

        debug!("Storing sleep session in database: {}", session.id);
        let conn = self.db.conn()?;
        super::ensure_user_exists(&conn, user_id)?;
        conn.execute(
            "INSERT INTO sleep_sessions
             (id, user_id, start_time, end_time, duration_minutes, quality, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                session.id,
                session.user_id,
                session.start_time,
                session.end_time,
                session.duration_minutes,
                session.quality,
                session.timestamp,
            ],
        )?;

        Ok(session)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<SleepSession>, RepositoryError> {
        debug!("Getting sleep session by ID from database: {}", id);
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, start_time, end_time, duration_minutes, quality, timestamp
             FROM sleep_sessions WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], row_to_session) {
            Ok(session) => Ok(Some(session)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RepositoryError::Sqlite(e)),
        }
    }

    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<SleepSession>, RepositoryError> {
        debug!("Getting sleep sessions for user from database: {}", user_id);
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, start_time, end_time, duration_minutes, quality, timestamp
             FROM sleep_sessions WHERE user_id = ?1 ORDER BY timestamp DESC",
        )?;
        let rows = stmt.query_map(params![user_id], row_to_session)?;

        let mut sessions = Vec::new();
        for session in rows {
            sessions.push(session?);
        }
        Ok(sessions)
    }

    async fn update(&self, session: &SleepSession) -> Result<SleepSession, RepositoryError> {
        debug!("Updating sleep session in database: {}", session.id);
        let conn = self.db.conn()?;
        let changed = conn.execute(
            "UPDATE sleep_sessions
             SET start_time = ?1, end_time = ?2, duration_minutes = ?3, quality = ?4
             WHERE id = ?5",
            params![
                session.start_time,
                session.end_time,
                session.duration_minutes,
                session.quality,
                session.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Sleep session {} not found",
                session.id
            )));
        }
        Ok(session.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        debug!("Deleting sleep session from database: {}", id);
        let conn = self.db.conn()?;
        let removed = conn.execute("DELETE FROM sleep_sessions WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}

/// Mock sleep repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;

    /// Mock implementation of the sleep repository backed by a fixed list
    #[derive(Debug, Default)]
    pub struct MockSleepRepository {
        sessions: Vec<SleepSession>,
    }

    impl MockSleepRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self { sessions: Vec::new() }
        }

        /// Create a mock repository with predefined sessions
        pub fn with_sessions(sessions: Vec<SleepSession>) -> Self {
            Self { sessions }
        }
    }

    #[async_trait]
    impl SleepRepositoryTrait for MockSleepRepository {
        async fn create(
            &self,
            user_id: Uuid,
            request: CreateSleepRequest,
        ) -> Result<SleepSession, RepositoryError> {
            Ok(SleepSession {
                id: Uuid::new_v4(),
                user_id,
                start_time: request.start_time,
                end_time: request.end_time,
                duration_minutes: request.duration_minutes,
                quality: request.quality,
                timestamp: Utc::now(),
            })
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Option<SleepSession>, RepositoryError> {
            Ok(self.sessions.iter().find(|s| s.id == id).cloned())
        }

        async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<SleepSession>, RepositoryError> {
            Ok(self
                .sessions
                .iter()
                .filter(|s| s.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn update(&self, session: &SleepSession) -> Result<SleepSession, RepositoryError> {
            if self.sessions.iter().any(|s| s.id == session.id) {
                Ok(session.clone())
            } else {
                Err(RepositoryError::NotFound(format!(
                    "Sleep session {} not found",
                    session.id
                )))
            }
        }

        async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
            Ok(self.sessions.iter().any(|s| s.id == id))
        }
    }
}
