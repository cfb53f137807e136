use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::dto::ranking::{EventRankings, EventStatistics, RankingBoard, RankingEntry};
use crate::dto::results::{AthleteHistoryEntry, AthleteStanding};
use crate::error::{Result, StorageError};
use crate::models::{Category, Cpf, Gender, RaceResult};
use crate::repository::event::EventRepository;
use crate::repository::result::ResultRepository;

/// Boards and statistics of a stored event
pub async fn event_rankings(pool: &SqlitePool, event_id: i64) -> Result<EventRankings> {
    EventRepository::new(pool)
        .find_by_id(event_id)
        .await?
        .ok_or(StorageError::NotFound)?;

    let results = ResultRepository::new(pool).list_for_event(event_id).await?;
    Ok(build_event_rankings(event_id, &results))
}

/// Arrange already-ranked results into podium boards.
///
/// Results without the relevant rank are left off a board; unranked results
/// only count towards the statistics.
pub fn build_event_rankings(event_id: i64, results: &[RaceResult]) -> EventRankings {
    if results.is_empty() {
        return EventRankings::empty(event_id);
    }

    let mut overall: BTreeMap<(bool, Gender), Vec<RankingEntry>> = BTreeMap::new();
    let mut categories: BTreeMap<(bool, Gender, Category), Vec<RankingEntry>> = BTreeMap::new();

    for result in results {
        if let Some(position) = result.overall_rank {
            overall
                .entry((result.pcd, result.gender))
                .or_default()
                .push(RankingEntry::new(position, result));
        } else if let Some(position) = result.category_rank {
            categories
                .entry((result.pcd, result.gender, result.category))
                .or_default()
                .push(RankingEntry::new(position, result));
        }
    }

    let overall = overall
        .into_iter()
        .map(|((pcd, gender), entries)| board(pcd, gender, None, entries))
        .collect();
    let categories = categories
        .into_iter()
        .map(|((pcd, gender, category), entries)| board(pcd, gender, Some(category), entries))
        .collect();

    EventRankings {
        event_id,
        overall,
        categories,
        statistics: event_statistics(results),
    }
}

fn board(
    pcd: bool,
    gender: Gender,
    category: Option<Category>,
    mut entries: Vec<RankingEntry>,
) -> RankingBoard {
    entries.sort_by_key(|e| e.position);
    RankingBoard {
        pcd,
        gender,
        category,
        entries,
    }
}

pub fn event_statistics(results: &[RaceResult]) -> EventStatistics {
    let mut stats = EventStatistics {
        total_results: results.len(),
        ..Default::default()
    };

    for result in results {
        *stats
            .by_gender
            .entry(result.gender.as_str().to_string())
            .or_insert(0) += 1;
        *stats
            .by_category
            .entry(result.category.as_str().to_string())
            .or_insert(0) += 1;
    }
    stats.has_pcd = stats.by_category.contains_key(Category::Pcd.as_str());

    stats
}

pub async fn athlete_standing(
    pool: &SqlitePool,
    cpf: &Cpf,
    event_id: i64,
) -> Result<Option<AthleteStanding>> {
    let result = ResultRepository::new(pool)
        .find_for_athlete(cpf, event_id)
        .await?;

    Ok(result.map(AthleteStanding::from))
}

pub async fn athlete_history(pool: &SqlitePool, cpf: &Cpf) -> Result<Vec<AthleteHistoryEntry>> {
    ResultRepository::new(pool)
        .list_published_for_athlete(cpf)
        .await
}

pub async fn has_results(pool: &SqlitePool, event_id: i64) -> Result<bool> {
    let count = ResultRepository::new(pool).count_for_event(event_id).await?;
    Ok(count > 0)
}

pub async fn publish_results(pool: &SqlitePool, event_id: i64, published: bool) -> Result<()> {
    EventRepository::new(pool)
        .set_results_published(event_id, published)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use crate::models::FinishTime;
    use crate::services::ranking::rank_results;

    fn result(n: u32, gender: Gender, secs: u32, category: Category, pcd: bool) -> RaceResult {
        RaceResult::unranked(
            7,
            Cpf::from_base(&format!("{:09}", 200_000_000 + n)).unwrap(),
            format!("Runner {}", n),
            gender,
            FinishTime::new(u64::from(secs / 3600), (secs / 60 % 60) as u8, (secs % 60) as u8).unwrap(),
            category,
            pcd,
        )
    }

    fn field() -> Vec<RaceResult> {
        let mut batch = Vec::new();
        for n in 0..7 {
            batch.push(result(n, Gender::Masculino, 2400 + n * 60, Category::Adult, false));
        }
        batch.push(result(20, Gender::Masculino, 2300, Category::Master, false));
        batch.push(result(30, Gender::Feminino, 2900, Category::Junior, false));
        batch.push(result(40, Gender::Feminino, 4000, Category::Pcd, true));
        rank_results(batch)
    }

    #[test]
    fn test_empty_event_has_empty_boards() {
        let rankings = build_event_rankings(3, &[]);

        assert_eq!(rankings.event_id, 3);
        assert!(rankings.overall.is_empty());
        assert!(rankings.categories.is_empty());
        assert_eq!(rankings.statistics.total_results, 0);
        assert!(!rankings.statistics.has_pcd);
    }

    #[test]
    fn test_boards_follow_ranks() {
        let rankings = build_event_rankings(7, &field());

        let men = rankings.overall_for(false, Gender::Masculino).unwrap();
        assert_eq!(men.entries.len(), 5);
        assert_eq!(men.entries[0].athlete_name, "Runner 20");
        assert_eq!(
            men.entries.iter().map(|e| e.position).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );

        let adults = rankings
            .category_for(Gender::Masculino, Category::Adult)
            .unwrap();
        assert_eq!(adults.entries.len(), 3);
        assert_eq!(adults.entries[0].athlete_name, "Runner 4");
        assert_eq!(adults.entries[0].position, 1);

        assert_eq!(rankings.overall_for(false, Gender::Feminino).unwrap().entries.len(), 1);
        let pcd = rankings.overall_for(true, Gender::Feminino).unwrap();
        assert_eq!(pcd.entries[0].athlete_name, "Runner 40");
        assert!(rankings.category_for(Gender::Masculino, Category::Master).is_none());
    }

    #[test]
    fn test_statistics_count_every_result() {
        let stats = event_statistics(&field());

        assert_eq!(stats.total_results, 10);
        assert_eq!(stats.by_gender.get("Masculino"), Some(&8));
        assert_eq!(stats.by_gender.get("Feminino"), Some(&2));
        assert_eq!(stats.by_category.get("Adulto"), Some(&7));
        assert_eq!(stats.by_category.get("PCD"), Some(&1));
        assert!(stats.has_pcd);
    }

    #[tokio::test]
    async fn test_event_rankings_for_unknown_event() {
        let db = Database::in_memory().await.unwrap();

        let err = event_rankings(db.pool(), 99).await.unwrap_err();

        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn test_standing_and_publish_round() {
        let db = Database::in_memory().await.unwrap();
        let event = EventRepository::new(db.pool())
            .create("Corrida da Ponte", "10/08/2025")
            .await
            .unwrap();

        let mut results = field();
        for r in &mut results {
            r.event_id = event.event_id;
        }
        ResultRepository::new(db.pool())
            .replace_for_event(event.event_id, &results)
            .await
            .unwrap();

        assert!(has_results(db.pool(), event.event_id).await.unwrap());

        let runner = &results[6].cpf;
        let standing = athlete_standing(db.pool(), runner, event.event_id)
            .await
            .unwrap()
            .unwrap();
        assert!(standing.has_category_rank);
        assert!(!standing.has_overall_rank);

        assert!(athlete_history(db.pool(), runner).await.unwrap().is_empty());
        publish_results(db.pool(), event.event_id, true).await.unwrap();
        let history = athlete_history(db.pool(), runner).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].event_name, "Corrida da Ponte");

        let rankings = event_rankings(db.pool(), event.event_id).await.unwrap();
        assert_eq!(rankings.statistics.total_results, 10);
    }
}
