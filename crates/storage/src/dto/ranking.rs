use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Category, Gender, RaceResult};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RankingEntry {
    pub position: i32,
    pub athlete_name: String,
    pub finish_time: String,
    pub category: Category,
}

impl RankingEntry {
    pub fn new(position: i32, result: &RaceResult) -> Self {
        Self {
            position,
            athlete_name: result.athlete_name.clone(),
            finish_time: result.finish_time.to_string(),
            category: result.category,
        }
    }
}

/// One podium table: the overall board of a gender when `category` is
/// `None`, otherwise a (gender, category) board. `pcd` tells which field the
/// board belongs to; PCD athletes never share a board with the open field.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RankingBoard {
    pub pcd: bool,
    pub gender: Gender,
    pub category: Option<Category>,
    pub entries: Vec<RankingEntry>,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct EventStatistics {
    pub total_results: usize,
    pub by_gender: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    pub has_pcd: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventRankings {
    pub event_id: i64,
    pub overall: Vec<RankingBoard>,
    pub categories: Vec<RankingBoard>,
    pub statistics: EventStatistics,
}

impl EventRankings {
    pub fn empty(event_id: i64) -> Self {
        Self {
            event_id,
            overall: Vec::new(),
            categories: Vec::new(),
            statistics: EventStatistics::default(),
        }
    }

    pub fn overall_for(&self, pcd: bool, gender: Gender) -> Option<&RankingBoard> {
        self.overall
            .iter()
            .find(|b| b.pcd == pcd && b.gender == gender)
    }

    pub fn category_for(&self, gender: Gender, category: Category) -> Option<&RankingBoard> {
        self.categories
            .iter()
            .find(|b| b.gender == gender && b.category == Some(category))
    }
}
