//! Prelude for commonly used types and traits in energy-guard.

pub use crate::catalog::{RuleCatalog, DEFAULT_CATALOG};
pub use crate::core::{
    Finding, FindingKind, Location, Outcome, RawRecord, RecordField, Severity, ValidationReport,
    Validator,
};
pub use crate::error::{ErrorContext, GuardError, Result};
pub use crate::formatters::{FormatterConfig, ReportFormatter};
pub use crate::ingest::{Batch, RecordSource};
pub use crate::logging::LogConfig;
