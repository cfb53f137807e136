pub mod ranking;
pub mod results;
