use sqlx::SqlitePool;
use storage::{dto::ranking::EventRankings, error::Result, services::standings};

/// Podium boards and statistics of one event
pub async fn get_event_rankings(pool: &SqlitePool, event_id: i64) -> Result<EventRankings> {
    standings::event_rankings(pool, event_id).await
}
