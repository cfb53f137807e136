pub mod enrollment;
pub mod event;
pub mod result;
pub mod user;
