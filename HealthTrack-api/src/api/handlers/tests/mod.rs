mod users_test;

use crate::api::routes::AppState;
use health_track_data::database::Database;

/// Build an application state over a fresh in-memory database
pub(super) fn test_state() -> AppState {
    let db = Database::in_memory().expect("in-memory database");
    AppState::new(&db)
}
