use storage::models::{Athlete, Category, Cpf, FinishTime, Gender, RaceResult, User};
use tracing::debug;

use super::models::{RowError, RowErrorKind};
use super::reader::CsvRow;
use crate::Result;
use crate::traits::{AthleteDirectory, EnrollmentRegistry};

/// The syntactically valid part of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub cpf: Cpf,
    pub finish_time: FinishTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted(RaceResult),
    Rejected(RowError),
}

/// Checks the two expected columns of a row without touching any collaborator.
pub fn parse_fields(row: &CsvRow) -> std::result::Result<ParsedRow, RowError> {
    let reject = |kind, message: String| RowError::new(kind, message, &row.fields, row.line);

    let [raw_cpf, raw_time, ..] = row.fields.as_slice() else {
        return Err(reject(
            RowErrorKind::MalformedRow,
            "row must have at least 2 columns (CPF, time)".to_string(),
        ));
    };

    let cpf = Cpf::parse(raw_cpf)
        .map_err(|e| reject(RowErrorKind::InvalidId, format!("invalid CPF {}: {}", raw_cpf, e)))?;

    let finish_time = FinishTime::parse(raw_time).map_err(|_| {
        reject(
            RowErrorKind::InvalidTime,
            format!("invalid time format: {}", raw_time),
        )
    })?;

    Ok(ParsedRow { cpf, finish_time })
}

/// Turns rows into unranked results for one event.
pub struct RowValidator<'a> {
    athletes: &'a dyn AthleteDirectory,
    enrollments: &'a dyn EnrollmentRegistry,
    event_id: i64,
    event_date: &'a str,
}

impl<'a> RowValidator<'a> {
    pub fn new(
        athletes: &'a dyn AthleteDirectory,
        enrollments: &'a dyn EnrollmentRegistry,
        event_id: i64,
        event_date: &'a str,
    ) -> Self {
        Self {
            athletes,
            enrollments,
            event_id,
            event_date,
        }
    }

    /// Rejections are returned as [`RowOutcome::Rejected`]; `Err` only
    /// means a collaborator failed.
    pub async fn validate(&self, row: &CsvRow) -> Result<RowOutcome> {
        let parsed = match parse_fields(row) {
            Ok(parsed) => parsed,
            Err(error) => return Ok(RowOutcome::Rejected(error)),
        };
        let cpf = &parsed.cpf;
        let reject =
            |kind, message: String| RowOutcome::Rejected(RowError::new(kind, message, &row.fields, row.line));

        let athlete = match self.athletes.find_by_id(cpf).await? {
            None => {
                return Ok(reject(
                    RowErrorKind::AthleteNotFound,
                    format!("athlete with CPF {} not found", cpf.formatted()),
                ));
            }
            Some(User::Organizer(_)) => {
                return Ok(reject(
                    RowErrorKind::AthleteWrongRole,
                    format!(
                        "CPF {} belongs to an organizer, not an athlete",
                        cpf.formatted()
                    ),
                ));
            }
            Some(User::Athlete(athlete)) => athlete,
        };

        if self
            .enrollments
            .find_enrollment(cpf, self.event_id)
            .await?
            .is_none()
        {
            return Ok(reject(
                RowErrorKind::AthleteNotEnrolled,
                format!(
                    "athlete with CPF {} is not enrolled in event {}",
                    cpf.formatted(),
                    self.event_id
                ),
            ));
        }

        match self.build_result(athlete, parsed.finish_time) {
            Ok(result) => {
                debug!(
                    "Line {}: {} {} ({})",
                    row.line, result.athlete_name, result.finish_time, result.category
                );
                Ok(RowOutcome::Accepted(result))
            }
            Err(reason) => Ok(reject(
                RowErrorKind::CreationFailure,
                format!("could not create result: {}", reason),
            )),
        }
    }

    fn build_result(
        &self,
        athlete: Athlete,
        finish_time: FinishTime,
    ) -> std::result::Result<RaceResult, String> {
        let gender: Gender = athlete.gender.parse()?;
        let category = Category::classify(athlete.pcd, &athlete.birth_date, self.event_date)
            .map_err(|e| e.to_string())?;

        Ok(RaceResult::unranked(
            self.event_id,
            athlete.cpf,
            athlete.name,
            gender,
            finish_time,
            category,
            athlete.pcd,
        ))
    }
}
