pub mod handlers;
pub mod routes;

use axum::Router;
use health_track_data::database::Database;

/// Create the application router over the given database handle
pub fn create_application(db: Database) -> Router {
    routes::create_app(db)
}
