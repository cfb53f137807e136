use storage::Database;
use storage::models::{Cpf, Enrollment, Event, RaceResult, User};
use storage::repository::enrollment::EnrollmentRepository;
use storage::repository::event::EventRepository;
use storage::repository::result::{ReplaceOutcome, ResultRepository};
use storage::repository::user::UserRepository;

use crate::Result;
use crate::traits::{AthleteDirectory, EnrollmentRegistry, EventCatalog, ResultStore};

#[async_trait::async_trait]
impl AthleteDirectory for Database {
    async fn find_by_id(&self, cpf: &Cpf) -> Result<Option<User>> {
        Ok(UserRepository::new(self.pool()).find_by_cpf(cpf).await?)
    }
}

#[async_trait::async_trait]
impl EnrollmentRegistry for Database {
    async fn find_enrollment(&self, cpf: &Cpf, event_id: i64) -> Result<Option<Enrollment>> {
        Ok(EnrollmentRepository::new(self.pool())
            .find_active(cpf, event_id)
            .await?)
    }
}

#[async_trait::async_trait]
impl EventCatalog for Database {
    async fn find_event(&self, event_id: i64) -> Result<Option<Event>> {
        Ok(EventRepository::new(self.pool()).find_by_id(event_id).await?)
    }
}

#[async_trait::async_trait]
impl ResultStore for Database {
    async fn replace_for_event(
        &self,
        event_id: i64,
        results: &[RaceResult],
    ) -> Result<ReplaceOutcome> {
        Ok(ResultRepository::new(self.pool())
            .replace_for_event(event_id, results)
            .await?)
    }
}
