use importer::{ImportReport, ResultImporter};
use sqlx::SqlitePool;
use storage::{
    Database,
    dto::results::AthleteStanding,
    error::Result,
    models::Cpf,
    services::standings,
};

pub async fn get_athlete_standing(
    pool: &SqlitePool,
    cpf: &Cpf,
    event_id: i64,
) -> Result<Option<AthleteStanding>> {
    standings::athlete_standing(pool, cpf, event_id).await
}

/// Validate, rank and store an uploaded CSV, replacing the event's results
pub async fn import_results(
    db: &Database,
    event_id: i64,
    csv: &[u8],
) -> importer::Result<ImportReport> {
    ResultImporter::from_database(db)
        .import_bytes(csv, event_id)
        .await
}
