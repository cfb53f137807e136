use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::{Category, Gender, RaceResult};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResultResponse {
    pub event_id: i64,
    pub cpf: String,
    pub athlete_name: String,
    pub gender: Gender,
    /// `HH:MM:SS`
    pub finish_time: String,
    pub category: Category,
    pub pcd: bool,
    pub overall_rank: Option<i32>,
    pub category_rank: Option<i32>,
}

impl From<RaceResult> for ResultResponse {
    fn from(result: RaceResult) -> Self {
        Self {
            event_id: result.event_id,
            cpf: result.cpf.to_string(),
            athlete_name: result.athlete_name,
            gender: result.gender,
            finish_time: result.finish_time.to_string(),
            category: result.category,
            pcd: result.pcd,
            overall_rank: result.overall_rank,
            category_rank: result.category_rank,
        }
    }
}

/// One athlete's placement in one event.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AthleteStanding {
    pub result: ResultResponse,
    pub has_overall_rank: bool,
    pub has_category_rank: bool,
}

impl From<RaceResult> for AthleteStanding {
    fn from(result: RaceResult) -> Self {
        Self {
            has_overall_rank: result.has_overall_rank(),
            has_category_rank: result.has_category_rank(),
            result: result.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AthleteHistoryEntry {
    pub event_id: i64,
    pub event_name: String,
    pub event_date: String,
    pub athlete_name: String,
    pub gender: String,
    pub finish_time: String,
    pub category: String,
    pub pcd: bool,
    pub overall_rank: Option<i32>,
    pub category_rank: Option<i32>,
}
