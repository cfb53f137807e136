//! Classification of an event's results.
//!
//! Athletes with a disability (PCD) and everyone else are ranked as two
//! independent fields that never compete against each other. Within a field,
//! each gender is sorted by finish time: the five fastest get an overall rank
//! (1..=5) and everyone after them is ranked within their age category.

use std::collections::{BTreeMap, HashMap};

use crate::models::{Category, Gender, RaceResult};

/// Number of athletes per gender that receive an overall rank.
pub const OVERALL_PODIUM_SIZE: usize = 5;

/// Assigns overall and category ranks to one event's results.
///
/// Existing ranks are discarded first, so ranking the same batch again gives
/// the same answer. The returned results are the input results in their
/// original order; none are added or dropped. Ties on finish time keep input
/// order.
pub fn rank_results(mut results: Vec<RaceResult>) -> Vec<RaceResult> {
    for result in &mut results {
        result.clear_ranks();
    }

    for pcd in [false, true] {
        let mut by_gender: BTreeMap<Gender, Vec<usize>> = BTreeMap::new();
        for (idx, result) in results.iter().enumerate().filter(|(_, r)| r.pcd == pcd) {
            by_gender.entry(result.gender).or_default().push(idx);
        }

        for (_, mut field) in by_gender {
            field.sort_by_key(|&idx| results[idx].finish_time);
            assign_ranks(&mut results, &field);
        }
    }

    results
}

/// `field` holds indices of one (PCD track, gender) group, already sorted by time.
fn assign_ranks(results: &mut [RaceResult], field: &[usize]) {
    let (podium, rest) = field.split_at(field.len().min(OVERALL_PODIUM_SIZE));

    for (position, &idx) in podium.iter().enumerate() {
        results[idx].overall_rank = Some(position as i32 + 1);
    }

    let mut next_in_category: HashMap<Category, i32> = HashMap::new();
    for &idx in rest {
        let position = next_in_category.entry(results[idx].category).or_insert(0);
        *position += 1;
        results[idx].category_rank = Some(*position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cpf, FinishTime};

    fn result(n: u32, gender: Gender, time: &str, category: Category, pcd: bool) -> RaceResult {
        RaceResult::unranked(
            1,
            Cpf::from_base(&format!("{:09}", 100_000_000 + n)).unwrap(),
            format!("Athlete {}", n),
            gender,
            FinishTime::parse(time).unwrap(),
            category,
            pcd,
        )
    }

    fn male(n: u32, time: &str, category: Category) -> RaceResult {
        result(n, Gender::Masculino, time, category, false)
    }

    fn female(n: u32, time: &str, category: Category) -> RaceResult {
        result(n, Gender::Feminino, time, category, false)
    }

    fn by_name<'a>(results: &'a [RaceResult], n: u32) -> &'a RaceResult {
        let name = format!("Athlete {}", n);
        results.iter().find(|r| r.athlete_name == name).unwrap()
    }

    #[test]
    fn test_small_field_gets_only_overall_ranks() {
        let ranked = rank_results(vec![
            male(1, "00:45:00", Category::Adult),
            male(2, "00:40:00", Category::Adult),
            female(3, "00:50:00", Category::Adult),
        ]);

        assert_eq!(by_name(&ranked, 2).overall_rank, Some(1));
        assert_eq!(by_name(&ranked, 1).overall_rank, Some(2));
        assert_eq!(by_name(&ranked, 3).overall_rank, Some(1));
        assert!(ranked.iter().all(|r| r.category_rank.is_none()));
    }

    #[test]
    fn test_sixth_and_later_are_ranked_by_category() {
        let mut batch = Vec::new();
        for n in 0..5 {
            batch.push(male(n, &format!("00:3{}:00", n), Category::Adult));
        }
        batch.push(male(10, "00:50:00", Category::Master));
        batch.push(male(11, "00:41:00", Category::Adult));
        batch.push(male(12, "00:45:00", Category::Master));
        batch.push(male(13, "00:55:00", Category::Junior));

        let ranked = rank_results(batch);

        for n in 0..5 {
            assert_eq!(by_name(&ranked, n).overall_rank, Some(n as i32 + 1));
            assert_eq!(by_name(&ranked, n).category_rank, None);
        }
        assert_eq!(by_name(&ranked, 11).category_rank, Some(1));
        assert_eq!(by_name(&ranked, 12).category_rank, Some(1));
        assert_eq!(by_name(&ranked, 10).category_rank, Some(2));
        assert_eq!(by_name(&ranked, 13).category_rank, Some(1));
        assert!(ranked[5..].iter().all(|r| r.overall_rank.is_none()));
    }

    #[test]
    fn test_pcd_field_is_ranked_separately() {
        let mut batch = vec![result(50, Gender::Masculino, "01:30:00", Category::Pcd, true)];
        for n in 0..6 {
            batch.push(male(n, &format!("00:4{}:00", n), Category::Adult));
        }

        let ranked = rank_results(batch);

        // Slowest overall, but first of the PCD field.
        assert_eq!(by_name(&ranked, 50).overall_rank, Some(1));
        assert_eq!(by_name(&ranked, 5).overall_rank, None);
        assert_eq!(by_name(&ranked, 5).category_rank, Some(1));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank_results(vec![
            female(1, "00:50:00", Category::Adult),
            female(2, "00:50:00", Category::Adult),
            female(3, "00:49:59", Category::Adult),
        ]);

        assert_eq!(by_name(&ranked, 3).overall_rank, Some(1));
        assert_eq!(by_name(&ranked, 1).overall_rank, Some(2));
        assert_eq!(by_name(&ranked, 2).overall_rank, Some(3));
    }

    #[test]
    fn test_other_gender_forms_its_own_field() {
        let mut batch = Vec::new();
        for n in 0..5 {
            batch.push(male(n, &format!("00:3{}:00", n), Category::Adult));
        }
        batch.push(result(20, Gender::Outro, "00:59:00", Category::Adult, false));

        let ranked = rank_results(batch);

        assert_eq!(by_name(&ranked, 20).overall_rank, Some(1));
    }

    #[test]
    fn test_reranking_discards_stale_ranks() {
        let mut stale = male(1, "00:45:00", Category::Adult);
        stale.category_rank = Some(9);
        stale.overall_rank = Some(4);

        let ranked = rank_results(vec![stale]);

        assert_eq!(ranked[0].overall_rank, Some(1));
        assert_eq!(ranked[0].category_rank, None);
    }

    #[test]
    fn test_ranking_is_idempotent_and_keeps_input_order() {
        let mut batch = Vec::new();
        for n in 0..14 {
            let category = [Category::Junior, Category::Adult, Category::Master][n as usize % 3];
            let time = format!("00:{:02}:{:02}", 30 + (n * 7) % 20, (n * 13) % 60);
            batch.push(if n % 2 == 0 {
                male(n, &time, category)
            } else {
                female(n, &time, category)
            });
        }
        let names: Vec<String> = batch.iter().map(|r| r.athlete_name.clone()).collect();

        let once = rank_results(batch);
        let twice = rank_results(once.clone());

        assert_eq!(once, twice);
        assert_eq!(
            once.iter().map(|r| r.athlete_name.clone()).collect::<Vec<_>>(),
            names
        );
    }

    #[test]
    fn test_rank_invariants_hold() {
        let mut batch = Vec::new();
        for n in 0..40 {
            let category = Category::ALL[n as usize % 4];
            let pcd = category == Category::Pcd;
            let gender = if n % 3 == 0 { Gender::Feminino } else { Gender::Masculino };
            let time = format!("01:{:02}:{:02}", (n * 17) % 60, (n * 31) % 60);
            batch.push(result(n, gender, &time, category, pcd));
        }

        let ranked = rank_results(batch);

        for r in &ranked {
            assert!(r.overall_rank.is_some() != r.category_rank.is_some());
        }

        for pcd in [false, true] {
            for gender in Gender::ALL {
                let field: Vec<&RaceResult> = ranked
                    .iter()
                    .filter(|r| r.pcd == pcd && r.gender == gender)
                    .collect();

                let mut podium: Vec<&RaceResult> =
                    field.iter().copied().filter(|r| r.overall_rank.is_some()).collect();
                assert!(podium.len() <= OVERALL_PODIUM_SIZE);
                podium.sort_by_key(|r| r.overall_rank);
                for (i, r) in podium.iter().enumerate() {
                    assert_eq!(r.overall_rank, Some(i as i32 + 1));
                }
                for pair in podium.windows(2) {
                    assert!(pair[0].finish_time <= pair[1].finish_time);
                }

                for category in Category::ALL {
                    let mut group: Vec<&RaceResult> = field
                        .iter()
                        .copied()
                        .filter(|r| r.category == category && r.category_rank.is_some())
                        .collect();
                    group.sort_by_key(|r| r.category_rank);
                    for (i, r) in group.iter().enumerate() {
                        assert_eq!(r.category_rank, Some(i as i32 + 1));
                    }
                    for pair in group.windows(2) {
                        assert!(pair[0].finish_time <= pair[1].finish_time);
                    }
                }
            }
        }
    }
}
