pub mod athletes;
pub mod rankings;
pub mod results;
