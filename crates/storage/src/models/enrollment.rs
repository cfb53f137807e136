use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Links an athlete to an event. Only active enrollments may receive results.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub enrollment_id: i64,
    pub athlete_cpf: String,
    pub event_id: i64,
    pub status: String,
    pub enrolled_at: String,
}

impl Enrollment {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}
