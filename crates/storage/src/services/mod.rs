pub mod ranking;
pub mod standings;

pub use ranking::{OVERALL_PODIUM_SIZE, rank_results};
