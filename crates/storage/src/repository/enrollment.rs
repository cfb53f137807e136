use sqlx::SqlitePool;

use crate::error::{Result, StorageError};
use crate::models::enrollment::{STATUS_ACTIVE, STATUS_CANCELLED};
use crate::models::{Cpf, Enrollment};

pub struct EnrollmentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EnrollmentRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// The athlete's active enrollment in the event, if any
    pub async fn find_active(&self, cpf: &Cpf, event_id: i64) -> Result<Option<Enrollment>> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT enrollment_id, athlete_cpf, event_id, status, enrolled_at
            FROM enrollments
            WHERE athlete_cpf = ? AND event_id = ? AND status = ?
            "#,
        )
        .bind(cpf.as_str())
        .bind(event_id)
        .bind(STATUS_ACTIVE)
        .fetch_optional(self.pool)
        .await?;

        Ok(enrollment)
    }

    pub async fn enroll(&self, cpf: &Cpf, event_id: i64) -> Result<Enrollment> {
        sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (athlete_cpf, event_id)
            VALUES (?, ?)
            RETURNING enrollment_id, athlete_cpf, event_id, status, enrolled_at
            "#,
        )
        .bind(cpf.as_str())
        .bind(event_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match StorageError::from(e) {
            e if e.is_foreign_key_violation() => StorageError::NotFound,
            e if e.is_unique_violation() => StorageError::ConstraintViolation(format!(
                "athlete {} is already enrolled in event {}",
                cpf, event_id
            )),
            e => e,
        })
    }

    pub async fn cancel(&self, cpf: &Cpf, event_id: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE enrollments SET status = ? WHERE athlete_cpf = ? AND event_id = ?",
        )
        .bind(STATUS_CANCELLED)
        .bind(cpf.as_str())
        .bind(event_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
