//! Lookups and writes the import pipeline needs from the rest of the system.
//!
//! [`storage::Database`] implements all of them (see `store.rs`); tests can
//! swap in in-memory fakes.

use storage::models::{Cpf, Enrollment, Event, RaceResult, User};
use storage::repository::result::ReplaceOutcome;

use crate::Result;

#[async_trait::async_trait]
pub trait AthleteDirectory: Send + Sync {
    /// Any registered user with this CPF, athlete or not.
    async fn find_by_id(&self, cpf: &Cpf) -> Result<Option<User>>;
}

#[async_trait::async_trait]
pub trait EnrollmentRegistry: Send + Sync {
    /// The athlete's active enrollment in the event.
    async fn find_enrollment(&self, cpf: &Cpf, event_id: i64) -> Result<Option<Enrollment>>;
}

#[async_trait::async_trait]
pub trait EventCatalog: Send + Sync {
    async fn find_event(&self, event_id: i64) -> Result<Option<Event>>;
}

#[async_trait::async_trait]
pub trait ResultStore: Send + Sync {
    /// Delete every stored result of the event and insert `results`, as one
    /// atomic unit.
    async fn replace_for_event(&self, event_id: i64, results: &[RaceResult])
    -> Result<ReplaceOutcome>;
}
