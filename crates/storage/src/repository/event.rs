use sqlx::SqlitePool;

use crate::error::{Result, StorageError};
use crate::models::Event;

pub struct EventRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, event_id: i64) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, name, event_date, results_published, created_at
            FROM events
            WHERE event_id = ?
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(event)
    }

    /// Create an event dated `event_date` (`DD/MM/YYYY`)
    pub async fn create(&self, name: &str, event_date: &str) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, event_date)
            VALUES (?, ?)
            RETURNING event_id, name, event_date, results_published, created_at
            "#,
        )
        .bind(name)
        .bind(event_date)
        .fetch_one(self.pool)
        .await?;

        Ok(event)
    }

    pub async fn set_results_published(&self, event_id: i64, published: bool) -> Result<()> {
        let result = sqlx::query("UPDATE events SET results_published = ? WHERE event_id = ?")
            .bind(published)
            .bind(event_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
