use axum::Router;
use storage::Database;

use crate::features::{athletes, rankings, results};
use crate::middleware::auth::ApiKeys;

pub fn api_router(db: Database, api_keys: ApiKeys) -> Router {
    let events = rankings::routes::routes().merge(results::routes::routes(api_keys));

    Router::new()
        .nest("/api/events", events)
        .nest("/api/athletes", athletes::routes::routes())
        .with_state(db)
}
