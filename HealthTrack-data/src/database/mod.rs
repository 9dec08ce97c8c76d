//! Database connection handling for the HealthTrack application
//!
//! The application talks to SQLite through a [`Database`] handle that wraps
//! an r2d2 connection pool. The handle is constructed once at startup and
//! passed explicitly to every repository; each unit of work checks a
//! connection out of the pool and returns it on drop.

use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use r2d2_sqlite::SqliteConnectionManager;
use thiserror::Error;
use tracing::info;

/// Database error
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Filesystem error while preparing the database location
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Config(String),
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file; `None` selects an in-memory database
    pub sqlite_path: Option<String>,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Connection checkout timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: Some("./data/healthtrack.db".to_string()),
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Build a database configuration from environment variables
    pub fn from_env() -> Self {
        let sqlite_path = env::var("DB_SQLITE_PATH")
            .ok()
            .or_else(|| Some("./data/healthtrack.db".to_string()));

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        let timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        info!(
            "Database configuration: max_connections={}, timeout={}s",
            max_connections, timeout_seconds
        );

        Self {
            sqlite_path,
            max_connections,
            timeout_seconds,
        }
    }
}

/// A pooled connection checked out for one unit of work
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Handle to the SQLite connection pool
///
/// Cheap to clone; clones share the underlying pool.
#[derive(Clone)]
pub struct Database {
    pool: Arc<r2d2::Pool<SqliteConnectionManager>>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("connections", &self.pool.state().connections)
            .finish()
    }
}

impl Database {
    /// Open (or create) the database described by `config` and bootstrap the schema
    pub fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let manager = match &config.sqlite_path {
            Some(path) => {
                if let Some(parent) = Path::new(path).parent() {
                    if !parent.exists() {
                        info!("Creating database directory: {}", parent.display());
                        fs::create_dir_all(parent)?;
                    }
                }
                info!("Opening SQLite database at: {}", path);
                SqliteConnectionManager::file(path)
            }
            None => {
                info!("Opening in-memory SQLite database");
                SqliteConnectionManager::memory()
            }
        };

        // Foreign keys are enforced per connection, so the pragma goes in the
        // pool's init hook rather than the schema batch.
        let manager =
            manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

        // In-memory SQLite databases are private to their connection; cap the
        // pool at a single connection so every checkout sees the same data.
        let max_size = if config.sqlite_path.is_some() {
            config.max_connections
        } else {
            1
        };

        let pool = r2d2::Pool::builder()
            .max_size(max_size)
            .connection_timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build(manager)?;

        let db = Self {
            pool: Arc::new(pool),
        };
        db.init_schema()?;

        info!("SQLite connection pool created successfully");
        Ok(db)
    }

    /// Open an in-memory database, used by tests
    pub fn in_memory() -> Result<Self, DatabaseError> {
        Self::connect(&DatabaseConfig {
            sqlite_path: None,
            max_connections: 1,
            timeout_seconds: 5,
        })
    }

    /// Check a connection out of the pool for one unit of work
    pub fn conn(&self) -> Result<PooledConnection, DatabaseError> {
        Ok(self.pool.get()?)
    }

    /// Verify that the database answers queries
    pub fn ping(&self) -> Result<(), DatabaseError> {
        let conn = self.conn()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    fn init_schema(&self) -> Result<(), DatabaseError> {
        let conn = self.conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id BLOB PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_users_email ON users (email);

            CREATE TABLE IF NOT EXISTS physical_activities (
                id BLOB PRIMARY KEY,
                user_id BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                activity_type TEXT NOT NULL,
                duration_minutes REAL NOT NULL,
                timestamp TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_physical_activities_user
            ON physical_activities (user_id);

            CREATE TABLE IF NOT EXISTS sleep_sessions (
                id BLOB PRIMARY KEY,
                user_id BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                quality TEXT,
                timestamp TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_sleep_sessions_user
            ON sleep_sessions (user_id);

            CREATE TABLE IF NOT EXISTS blood_tests (
                id BLOB PRIMARY KEY,
                user_id BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                test_name TEXT NOT NULL,
                result REAL NOT NULL,
                unit TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_blood_tests_user
            ON blood_tests (user_id);",
        )?;
        Ok(())
    }
}
