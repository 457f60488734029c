//! Core validation types for energy-statistics records.
//!
//! ## Overview
//!
//! - **[`RawRecord`]**: one record as read, every required field optional
//! - **[`Validator`]**: runs per-record and batch-level checks for one run
//! - **[`Finding`]**: an error or warning tied to a [`Location`]
//! - **[`ValidationReport`]**: the findings of a run and its [`Outcome`]
//!
//! ## Flow
//!
//! ```text
//! ingest (JSONL / CSV) ──► Batch ──► Validator
//!                                      ├── per-record checks, row order
//!                                      ├── duplicate check
//!                                      └── completeness check
//!                                           │
//!                                           ▼
//!                                   ValidationReport ──► formatters, exit code
//! ```
//!
//! ## Example
//!
//! ```rust
//! use energy_guard::core::{Outcome, RawRecord, RecordField, Validator};
//! use energy_guard::ingest::Batch;
//!
//! let record = RawRecord::new()
//!     .with(RecordField::RegionCode, "TH-S")
//!     .with(RecordField::RegionTh, "ภาคใต้")
//!     .with(RecordField::RegionEn, "South")
//!     .with(RecordField::Year, 2566_i64)
//!     .with(RecordField::ConsumptionGwh, 15620.0)
//!     .with(RecordField::Customers, 3_456_000_i64)
//!     .with(RecordField::GrowthRate, 2.5);
//!
//! let batch = Batch::from_records(vec![record]);
//! let mut validator = Validator::with_default_catalog("south_only");
//! validator.validate_batch(&batch);
//! let report = validator.finish();
//!
//! // Four regions have no data: a warning, not an error.
//! assert_eq!(report.outcome(), Outcome::Pass);
//! assert_eq!(report.warning_count(), 1);
//! ```

mod finding;
mod record;
mod report;
mod validator;

pub use finding::{Finding, FindingKind, Location, Severity};
pub use record::{FieldValue, LocatedRecord, RawRecord, RecordField};
pub use report::{Outcome, ValidationReport};
pub use validator::{check_record, RecordOutcome, Validator};
