use async_trait::async_trait;
use chrono::Utc;
use rusqlite::params;
use tracing::debug;
use uuid::Uuid;

use super::errors::RepositoryError;
use crate::database::Database;
use crate::models::user::{CreateUserRequest, User};

/// Repository trait for users
#[async_trait]
pub trait UserRepositoryTrait {
    /// Create a new user from a request
    async fn create(&self, request: CreateUserRequest) -> Result<User, RepositoryError>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    /// Get a user by email address
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Get a page of users together with the total count
    async fn list(&self, limit: usize, offset: usize)
        -> Result<(Vec<User>, usize), RepositoryError>;

    /// Persist updated fields of an existing user
    async fn update(&self, user: &User) -> Result<User, RepositoryError>;

    /// Delete a user; child records go with it (ON DELETE CASCADE).
    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

/// SQLite-backed repository for users
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    db: Database,
}

impl SqliteUserRepository {
    /// Create a new repository over the given database handle
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        created_at: row.get(3)?,
    })
}

#[async_trait]
impl UserRepositoryTrait for SqliteUserRepository {
    async fn create(&self, request: CreateUserRequest) -> Result<User, RepositoryError> {
        let user = User {
            id: Uuid::new_v4(),
            username: request.username,
            email: request.email,
            created_at: Utc::now(),
        };

        debug!("Storing user in database: {}", user.id);
        let conn = self.db.conn()?;
        conn.execute(
            "INSERT INTO users (id, username, email, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![user.id, user.username, user.email, user.created_at],
        )
        .map_err(|e| RepositoryError::from_sqlite(e, "username or email"))?;

        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        debug!("Getting user by ID from database: {}", id);
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, username, email, created_at FROM users WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RepositoryError::Sqlite(e)),
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        debug!("Getting user by email from database");
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, username, email, created_at FROM users WHERE email = ?1",
        )?;

        match stmt.query_row(params![email], row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RepositoryError::Sqlite(e)),
        }
    }

    async fn list(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<User>, usize), RepositoryError> {
        debug!("Listing users from database: limit={}, offset={}", limit, offset);
        let conn = self.db.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, username, email, created_at FROM users
             ORDER BY created_at ASC LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt.query_map(params![limit as i64, offset as i64], row_to_user)?;

        let mut users = Vec::new();
        for user in rows {
            users.push(user?);
        }

        let total: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;

        Ok((users, total as usize))
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        debug!("Updating user in database: {}", user.id);
        let conn = self.db.conn()?;
        let changed = conn
            .execute(
                "UPDATE users SET username = ?1, email = ?2 WHERE id = ?3",
                params![user.username, user.email, user.id],
            )
            .map_err(|e| RepositoryError::from_sqlite(e, "username or email"))?;

        if changed == 0 {
            return Err(RepositoryError::NotFound(format!("User {} not found", user.id)));
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        debug!("Deleting user from database: {}", id);
        let conn = self.db.conn()?;
        let removed = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}

/// Mock user repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;

    /// Mock implementation of the user repository backed by a fixed list
    #[derive(Debug, Default)]
    pub struct MockUserRepository {
        users: Vec<User>,
    }

    impl MockUserRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self { users: Vec::new() }
        }

        /// Create a mock repository with predefined users
        pub fn with_users(users: Vec<User>) -> Self {
            Self { users }
        }
    }

    #[async_trait]
    impl UserRepositoryTrait for MockUserRepository {
        async fn create(&self, request: CreateUserRequest) -> Result<User, RepositoryError> {
            Ok(User {
                id: Uuid::new_v4(),
                username: request.username,
                email: request.email,
                created_at: Utc::now(),
            })
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
            Ok(self.users.iter().find(|u| u.id == id).cloned())
        }

        async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
            Ok(self.users.iter().find(|u| u.email == email).cloned())
        }

        async fn list(
            &self,
            limit: usize,
            offset: usize,
        ) -> Result<(Vec<User>, usize), RepositoryError> {
            let page = self
                .users
                .iter()
                .skip(offset)
                .take(limit)
                .cloned()
                .collect();
            Ok((page, self.users.len()))
        }

        async fn update(&self, user: &User) -> Result<User, RepositoryError> {
            if self.users.iter().any(|u| u.id == user.id) {
                Ok(user.clone())
            } else {
                Err(RepositoryError::NotFound(format!("User {} not found", user.id)))
            }
        }

        async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
            Ok(self.users.iter().any(|u| u.id == id))
        }
    }
}
