//! Validation report and run outcome.

use super::{Finding, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The binary result of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    /// Process exit status for this outcome: 0 on pass, 1 on fail.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Pass => 0,
            Outcome::Fail => 1,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Pass => f.write_str("PASSED"),
            Outcome::Fail => f.write_str("FAILED"),
        }
    }
}

/// The aggregate result of one validation run.
///
/// Findings keep discovery order: per-record findings in row order, then
/// duplicate findings, then the completeness warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Label of the run (for example the input file names)
    pub name: String,
    /// When the run started (RFC 3339)
    pub timestamp: String,
    /// Records that went through per-record checks
    pub records_checked: usize,
    /// All findings in discovery order
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    /// Creates an empty report.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            records_checked: 0,
            findings: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// True iff no error-severity finding exists.
    pub fn passed(&self) -> bool {
        !self.findings.iter().any(Finding::is_error)
    }

    /// `Fail` iff at least one error exists. Warnings never fail a run.
    pub fn outcome(&self) -> Outcome {
        if self.passed() {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }

    /// Gets all findings of a specific severity, in discovery order.
    pub fn findings_by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .collect()
    }

    pub fn errors(&self) -> Vec<&Finding> {
        self.findings_by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<&Finding> {
        self.findings_by_severity(Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_warning()).count()
    }
}
