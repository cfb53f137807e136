use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::dto::results::AthleteHistoryEntry;
use crate::error::Result;
use crate::models::category::parse_date;
use crate::models::race_result::ResultRow;
use crate::models::{Cpf, RaceResult};

const RESULT_COLUMNS: &str = r#"
    result_id, event_id, athlete_cpf, athlete_name, gender,
    finish_time, category, pcd, overall_rank, category_rank
"#;

/// Outcome of replacing an event's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub deleted: u64,
    pub inserted: u64,
}

pub struct ResultRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Replace every stored result of `event_id` with `results`, atomically.
    ///
    /// Readers see either the previous set or the new one, never an empty
    /// table in between.
    pub async fn replace_for_event(
        &self,
        event_id: i64,
        results: &[RaceResult],
    ) -> Result<ReplaceOutcome> {
        let mut tx = self.pool.begin().await?;

        let deleted = Self::delete_all_for_event(&mut *tx, event_id).await?;
        let inserted = Self::bulk_insert(&mut *tx, results).await?;

        tx.commit().await?;

        debug!(
            "Event {}: replaced {} stored results with {}",
            event_id, deleted, inserted
        );
        Ok(ReplaceOutcome { deleted, inserted })
    }

    pub async fn delete_all_for_event(conn: &mut SqliteConnection, event_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM results WHERE event_id = ?")
            .bind(event_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn bulk_insert(conn: &mut SqliteConnection, results: &[RaceResult]) -> Result<u64> {
        let mut inserted = 0;

        for result in results {
            sqlx::query(
                r#"
                INSERT INTO results
                    (event_id, athlete_cpf, athlete_name, gender, finish_time, finish_seconds,
                     category, pcd, overall_rank, category_rank)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(result.event_id)
            .bind(result.cpf.as_str())
            .bind(&result.athlete_name)
            .bind(result.gender.as_str())
            .bind(result.finish_time.to_string())
            .bind(i64::try_from(result.finish_time.total_seconds()).unwrap_or(i64::MAX))
            .bind(result.category.as_str())
            .bind(result.pcd)
            .bind(result.overall_rank)
            .bind(result.category_rank)
            .execute(&mut *conn)
            .await?;

            inserted += 1;
        }

        Ok(inserted)
    }

    /// All results of an event, fastest first
    pub async fn list_for_event(&self, event_id: i64) -> Result<Vec<RaceResult>> {
        let rows = sqlx::query_as::<_, ResultRow>(&format!(
            "SELECT {} FROM results WHERE event_id = ? ORDER BY finish_seconds ASC, result_id ASC",
            RESULT_COLUMNS
        ))
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(RaceResult::try_from).collect()
    }

    pub async fn find_for_athlete(&self, cpf: &Cpf, event_id: i64) -> Result<Option<RaceResult>> {
        let row = sqlx::query_as::<_, ResultRow>(&format!(
            "SELECT {} FROM results WHERE athlete_cpf = ? AND event_id = ? ORDER BY result_id LIMIT 1",
            RESULT_COLUMNS
        ))
        .bind(cpf.as_str())
        .bind(event_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(RaceResult::try_from).transpose()
    }

    pub async fn count_for_event(&self, event_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM results WHERE event_id = ?")
            .bind(event_id)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// The athlete's results in events whose results were published, most recent event first
    pub async fn list_published_for_athlete(&self, cpf: &Cpf) -> Result<Vec<AthleteHistoryEntry>> {
        let mut entries = sqlx::query_as::<_, AthleteHistoryEntry>(
            r#"
            SELECT
                r.event_id,
                e.name AS event_name,
                e.event_date,
                r.athlete_name,
                r.gender,
                r.finish_time,
                r.category,
                r.pcd,
                r.overall_rank,
                r.category_rank
            FROM results r
            JOIN events e ON r.event_id = e.event_id
            WHERE r.athlete_cpf = ? AND e.results_published = 1
            ORDER BY r.event_id DESC
            "#,
        )
        .bind(cpf.as_str())
        .fetch_all(self.pool)
        .await?;

        // Event dates are stored as entered, so order them after parsing.
        entries.sort_by_key(|entry| std::cmp::Reverse(parse_date(&entry.event_date).ok()));

        Ok(entries)
    }
}
