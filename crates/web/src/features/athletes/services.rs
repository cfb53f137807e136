use sqlx::SqlitePool;
use storage::{dto::results::AthleteHistoryEntry, error::Result, models::Cpf, services::standings};

/// Published results of one athlete, most recent event first
pub async fn get_athlete_history(pool: &SqlitePool, cpf: &Cpf) -> Result<Vec<AthleteHistoryEntry>> {
    standings::athlete_history(pool, cpf).await
}
