// Repository module structure
pub mod errors;
mod activities;
mod blood_tests;
mod sleep;
mod users;

// Re-export commonly used types
pub use errors::RepositoryError;

pub use activities::{ActivityRepositoryTrait, SqliteActivityRepository};
pub use blood_tests::{BloodTestRepositoryTrait, SqliteBloodTestRepository};
pub use sleep::{SleepRepositoryTrait, SqliteSleepRepository};
pub use users::{SqliteUserRepository, UserRepositoryTrait};

// Re-export mock implementations for both testing and when the mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use activities::mock::MockActivityRepository;
#[cfg(any(test, feature = "mock"))]
pub use blood_tests::mock::MockBloodTestRepository;
#[cfg(any(test, feature = "mock"))]
pub use sleep::mock::MockSleepRepository;
#[cfg(any(test, feature = "mock"))]
pub use users::mock::MockUserRepository;

/// Inserts into child tables verify the owning user inside the same unit of
/// work so a missing user surfaces as `NotFound` rather than a raw foreign
/// key failure.
pub(crate) fn ensure_user_exists(
    conn: &rusqlite::Connection,
    user_id: uuid::Uuid,
) -> Result<(), RepositoryError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
        rusqlite::params![user_id],
        |row| row.get(0),
    )?;
    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound(format!("User {user_id} not found")))
    }
}
