use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a single CSV row was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowErrorKind {
    MalformedRow,
    InvalidId,
    InvalidTime,
    AthleteNotFound,
    AthleteWrongRole,
    AthleteNotEnrolled,
    CreationFailure,
}

impl RowErrorKind {
    pub const ALL: [RowErrorKind; 7] = [
        RowErrorKind::MalformedRow,
        RowErrorKind::InvalidId,
        RowErrorKind::InvalidTime,
        RowErrorKind::AthleteNotFound,
        RowErrorKind::AthleteWrongRole,
        RowErrorKind::AthleteNotEnrolled,
        RowErrorKind::CreationFailure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedRow => "malformed-row",
            Self::InvalidId => "invalid-id",
            Self::InvalidTime => "invalid-time",
            Self::AthleteNotFound => "athlete-not-found",
            Self::AthleteWrongRole => "athlete-wrong-role",
            Self::AthleteNotEnrolled => "athlete-not-enrolled",
            Self::CreationFailure => "creation-failure",
        }
    }
}

impl fmt::Display for RowErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub kind: RowErrorKind,
    pub message: String,
    /// The row's fields as read from the file.
    pub row: Vec<String>,
    /// 1-based position of the row in the file, header included.
    pub line: usize,
}

impl RowError {
    pub fn new(kind: RowErrorKind, message: impl Into<String>, row: &[String], line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            row: row.to_vec(),
            line,
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: [{}] {}", self.line, self.kind, self.message)
    }
}

/// Outcome of a successful import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub event_id: i64,
    /// Results written for the event.
    pub persisted: usize,
    /// Previously stored results that were removed.
    pub replaced: u64,
    pub errors: Vec<RowError>,
}

impl ImportReport {
    pub fn summary(&self) -> ImportSummary {
        ImportSummary::new(self.persisted, &self.errors)
    }

    pub fn errors_by_kind(&self) -> BTreeMap<RowErrorKind, Vec<&RowError>> {
        let mut grouped: BTreeMap<RowErrorKind, Vec<&RowError>> = BTreeMap::new();
        for error in &self.errors {
            grouped.entry(error.kind).or_default().push(error);
        }
        grouped
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub total_errors: usize,
    pub errors_by_kind: BTreeMap<RowErrorKind, usize>,
    /// No row was rejected.
    pub success: bool,
    /// Percentage of rows that became results; 0 when nothing was read.
    pub success_rate: f64,
}

impl ImportSummary {
    pub fn new(imported: usize, errors: &[RowError]) -> Self {
        let mut errors_by_kind = BTreeMap::new();
        for error in errors {
            *errors_by_kind.entry(error.kind).or_insert(0) += 1;
        }

        let attempted = imported + errors.len();
        let success_rate = if attempted > 0 {
            imported as f64 / attempted as f64 * 100.0
        } else {
            0.0
        };

        Self {
            imported,
            total_errors: errors.len(),
            errors_by_kind,
            success: errors.is_empty(),
            success_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(kind: RowErrorKind, line: usize) -> RowError {
        RowError::new(kind, "bad", &["x".to_string()], line)
    }

    #[test]
    fn test_summary_groups_errors_by_kind() {
        let errors = vec![
            error(RowErrorKind::InvalidId, 2),
            error(RowErrorKind::InvalidTime, 3),
            error(RowErrorKind::InvalidId, 7),
        ];

        let summary = ImportSummary::new(6, &errors);

        assert_eq!(summary.imported, 6);
        assert_eq!(summary.total_errors, 3);
        assert_eq!(summary.errors_by_kind[&RowErrorKind::InvalidId], 2);
        assert_eq!(summary.errors_by_kind[&RowErrorKind::InvalidTime], 1);
        assert!(!summary.success);
        assert!((summary.success_rate - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_summary_of_nothing() {
        let summary = ImportSummary::new(0, &[]);

        assert!(summary.success);
        assert_eq!(summary.success_rate, 0.0);
    }

    #[test]
    fn test_kinds_serialize_kebab_case() {
        for kind in RowErrorKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_report_groups_errors_in_kind_order() {
        let report = ImportReport {
            event_id: 1,
            persisted: 1,
            replaced: 0,
            errors: vec![
                error(RowErrorKind::AthleteNotEnrolled, 4),
                error(RowErrorKind::MalformedRow, 2),
            ],
        };

        let grouped = report.errors_by_kind();
        let kinds: Vec<_> = grouped.keys().copied().collect();

        assert_eq!(
            kinds,
            vec![RowErrorKind::MalformedRow, RowErrorKind::AthleteNotEnrolled]
        );
    }
}
