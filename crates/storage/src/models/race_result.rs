use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Category, Cpf, FinishTime, Gender};
use crate::error::StorageError;

/// One athlete's outcome in one event.
///
/// A freshly imported result carries no ranks; the ranking pass sets at most
/// one of `overall_rank` (1..=5) and `category_rank` (>= 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    pub result_id: Option<i64>,
    pub event_id: i64,
    pub cpf: Cpf,
    pub athlete_name: String,
    pub gender: Gender,
    pub finish_time: FinishTime,
    pub category: Category,
    pub pcd: bool,
    pub overall_rank: Option<i32>,
    pub category_rank: Option<i32>,
}

impl RaceResult {
    pub fn unranked(
        event_id: i64,
        cpf: Cpf,
        athlete_name: impl Into<String>,
        gender: Gender,
        finish_time: FinishTime,
        category: Category,
        pcd: bool,
    ) -> Self {
        Self {
            result_id: None,
            event_id,
            cpf,
            athlete_name: athlete_name.into(),
            gender,
            finish_time,
            category,
            pcd,
            overall_rank: None,
            category_rank: None,
        }
    }

    pub fn clear_ranks(&mut self) {
        self.overall_rank = None;
        self.category_rank = None;
    }

    pub fn has_overall_rank(&self) -> bool {
        self.overall_rank.is_some()
    }

    pub fn has_category_rank(&self) -> bool {
        self.category_rank.is_some()
    }
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct ResultRow {
    pub result_id: i64,
    pub event_id: i64,
    pub athlete_cpf: String,
    pub athlete_name: String,
    pub gender: String,
    pub finish_time: String,
    pub category: String,
    pub pcd: bool,
    pub overall_rank: Option<i32>,
    pub category_rank: Option<i32>,
}

impl TryFrom<ResultRow> for RaceResult {
    type Error = StorageError;

    fn try_from(row: ResultRow) -> Result<Self, Self::Error> {
        let invalid = |what: String| {
            StorageError::InvalidData(format!("result {}: {}", row.result_id, what))
        };

        Ok(Self {
            result_id: Some(row.result_id),
            event_id: row.event_id,
            cpf: Cpf::parse(&row.athlete_cpf).map_err(|e| invalid(e.to_string()))?,
            athlete_name: row.athlete_name.clone(),
            gender: row.gender.parse().map_err(invalid)?,
            finish_time: FinishTime::parse(&row.finish_time).map_err(|e| invalid(e.to_string()))?,
            category: row.category.parse().map_err(invalid)?,
            pcd: row.pcd,
            overall_rank: row.overall_rank,
            category_rank: row.category_rank,
        })
    }
}
