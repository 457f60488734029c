//! Findings: individual validation outcomes and where they were found.

use super::RecordField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity of a finding.
///
/// Only two tiers exist. Errors make the data unusable and fail the run;
/// warnings are surfaced in the report but never change the outcome.
///
/// ```rust
/// use energy_guard::core::Severity;
///
/// assert!(Severity::Error > Severity::Warning);
/// assert!(Severity::Error.is_blocking());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Data is usable but notable
    Warning = 1,
    /// Data is unusable; blocks the run
    Error = 2,
}

impl Severity {
    /// Returns the string representation of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Returns true for severities that fail a run.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a finding applies: a row of some input, or the dataset as a whole.
///
/// Rows are 1-based and follow input order. Tabular inputs count the header
/// as row 1, so the first data row is row 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Input the record came from (usually a file path)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// 1-based row number; `None` for dataset-level findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
}

impl Location {
    /// A row without a named source.
    pub fn row(row: usize) -> Self {
        Self {
            source: None,
            row: Some(row),
        }
    }

    /// The whole batch.
    pub fn dataset() -> Self {
        Self::default()
    }

    /// Attaches the input name.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// True for dataset-level locations.
    pub fn is_dataset(&self) -> bool {
        self.row.is_none()
    }
}

impl From<usize> for Location {
    fn from(row: usize) -> Self {
        Location::row(row)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source, self.row) {
            (Some(source), Some(row)) => write!(f, "{source} row {row}"),
            (None, Some(row)) => write!(f, "Row {row}"),
            (Some(source), None) => f.write_str(source),
            (None, None) => f.write_str("Dataset"),
        }
    }
}

/// Which rule produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    MissingField,
    InvalidRegionCode,
    /// A scalar field did not parse
    InvalidValue,
    OutOfRange,
    NotPositive,
    UnusuallyHigh,
    Duplicate,
    MissingRegions,
    /// The entry could not be read as a record at all
    InvalidSyntax,
}

/// A single validation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<RecordField>,
    pub kind: FindingKind,
    pub message: String,
}

impl Finding {
    pub fn error(location: Location, kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            location,
            field: None,
            kind,
            message: message.into(),
        }
    }

    pub fn warning(location: Location, kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            location,
            field: None,
            kind,
            message: message.into(),
        }
    }

    /// Tags the finding with the field it concerns.
    pub fn for_field(mut self, field: RecordField) -> Self {
        self.field = Some(field);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_dataset() && self.location.source.is_none() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.location, self.message)
        }
    }
}
