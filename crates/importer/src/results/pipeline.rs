use std::path::Path;

use chrono::{Local, NaiveDate};
use storage::Database;
use storage::models::Event;
use storage::services::rank_results;
use tracing::{info, warn};

use super::models::ImportReport;
use super::reader::{CsvRows, read_rows};
use super::validator::{RowOutcome, RowValidator};
use crate::traits::{AthleteDirectory, EnrollmentRegistry, EventCatalog, ResultStore};
use crate::{ImporterError, Result};

/// Imports a results CSV for one event: validates every row, ranks the
/// accepted results and replaces whatever the event had stored before.
pub struct ResultImporter<'a> {
    athletes: &'a dyn AthleteDirectory,
    enrollments: &'a dyn EnrollmentRegistry,
    events: &'a dyn EventCatalog,
    store: &'a dyn ResultStore,
    today: Option<NaiveDate>,
}

impl<'a> ResultImporter<'a> {
    pub fn new(
        athletes: &'a dyn AthleteDirectory,
        enrollments: &'a dyn EnrollmentRegistry,
        events: &'a dyn EventCatalog,
        store: &'a dyn ResultStore,
    ) -> Self {
        Self {
            athletes,
            enrollments,
            events,
            store,
            today: None,
        }
    }

    pub fn from_database(db: &'a Database) -> Self {
        Self::new(db, db, db, db)
    }

    /// Judge whether the event has concluded against `today` instead of the
    /// local clock.
    pub fn as_of(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub async fn import_file(&self, path: &Path, event_id: i64) -> Result<ImportReport> {
        if !path.is_file() {
            return Err(ImporterError::FileNotFound(path.to_path_buf()));
        }

        let event = self.concluded_event(event_id).await?;

        info!("Reading results for '{}' from {}", event.name, path.display());
        let contents = tokio::fs::read(path).await?;
        let rows = read_rows(contents.as_slice())?;

        self.import_rows(&event, rows).await
    }

    pub async fn import_bytes(&self, contents: &[u8], event_id: i64) -> Result<ImportReport> {
        let event = self.concluded_event(event_id).await?;
        let rows = read_rows(contents)?;

        self.import_rows(&event, rows).await
    }

    async fn concluded_event(&self, event_id: i64) -> Result<Event> {
        let event = self
            .events
            .find_event(event_id)
            .await?
            .ok_or(ImporterError::EventNotFound(event_id))?;

        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let concluded = event
            .is_concluded(today)
            .map_err(|_| ImporterError::InvalidEventDate {
                event_id,
                date: event.event_date.clone(),
            })?;

        if !concluded {
            return Err(ImporterError::EventNotConcluded {
                name: event.name,
                date: event.event_date,
            });
        }

        Ok(event)
    }

    async fn import_rows(&self, event: &Event, rows: CsvRows) -> Result<ImportReport> {
        let validator =
            RowValidator::new(self.athletes, self.enrollments, event.event_id, &event.event_date);

        let mut accepted = Vec::new();
        let mut errors = Vec::new();
        for row in &rows.rows {
            match validator.validate(row).await? {
                RowOutcome::Accepted(result) => accepted.push(result),
                RowOutcome::Rejected(error) => {
                    warn!("Rejected {}", error);
                    errors.push(error);
                }
            }
        }

        info!(
            "Event {}: {} valid rows, {} rejected",
            event.event_id,
            accepted.len(),
            errors.len()
        );

        if accepted.is_empty() {
            return Err(ImporterError::NoValidResults(errors));
        }

        let mut ranked = rank_results(accepted);
        for result in &mut ranked {
            result.event_id = event.event_id;
        }

        let outcome = self.store.replace_for_event(event.event_id, &ranked).await?;
        info!(
            "Event {}: stored {} results, replacing {}",
            event.event_id, outcome.inserted, outcome.deleted
        );

        Ok(ImportReport {
            event_id: event.event_id,
            persisted: outcome.inserted as usize,
            replaced: outcome.deleted,
            errors,
        })
    }
}
