use axum::{Router, routing::get};
use storage::Database;

use super::handlers::get_athlete_history;

pub fn routes() -> Router<Database> {
    Router::new().route("/:cpf/results", get(get_athlete_history))
}
