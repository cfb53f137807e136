use axum::{Router, routing::get};
use storage::Database;

use super::handlers::get_event_rankings;

pub fn routes() -> Router<Database> {
    Router::new().route("/:event_id/rankings", get(get_event_rankings))
}
