pub mod category;
pub mod cpf;
pub mod enrollment;
pub mod event;
pub mod finish_time;
pub mod gender;
pub mod race_result;
pub mod user;

pub use category::{Category, DateFormatError};
pub use cpf::{Cpf, CpfError};
pub use enrollment::Enrollment;
pub use event::Event;
pub use finish_time::{FinishTime, FinishTimeError};
pub use gender::Gender;
pub use race_result::RaceResult;
pub use user::{Athlete, Organizer, User};
