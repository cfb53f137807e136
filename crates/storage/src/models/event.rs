use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::category::{DateFormatError, parse_date};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub event_id: i64,
    pub name: String,
    /// `DD/MM/YYYY`
    pub event_date: String,
    pub results_published: bool,
    pub created_at: String,
}

impl Event {
    pub fn date(&self) -> Result<NaiveDate, DateFormatError> {
        parse_date(&self.event_date)
    }

    /// An event is concluded once its day has started, so results can be
    /// imported on the evening of the race.
    pub fn is_concluded(&self, today: NaiveDate) -> Result<bool, DateFormatError> {
        Ok(self.date()? <= today)
    }
}
