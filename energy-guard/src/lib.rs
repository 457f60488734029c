//! # Energy Guard - Record Validation for Energy Statistics
//!
//! Energy Guard checks regional energy-consumption records before they are
//! handed to downstream analysis. Each record describes one region in one
//! year; a batch of records either passes (no errors) or fails.
//!
//! ## Quick Start
//!
//! ```rust
//! use energy_guard::prelude::*;
//! use energy_guard::formatters::HumanFormatter;
//!
//! # fn example() -> energy_guard::prelude::Result<()> {
//! let input = concat!(
//!     r#"{"region_code":"TH-C","region_th":"ภาคกลาง","region_en":"Central","year":2566,"consumption_gwh":45230,"customers":8542000,"growth_rate":3.2}"#,
//!     "\n",
//!     r#"{"region_code":"TH-C","region_th":"ภาคกลาง","region_en":"Central","year":2566,"consumption_gwh":45230,"customers":8542000,"growth_rate":150}"#,
//!     "\n",
//! );
//! let batch = energy_guard::ingest::JsonLinesSource::parse_reader(input.as_bytes(), None)?;
//!
//! let mut validator = Validator::with_default_catalog("quick_start");
//! validator.validate_batch(&batch);
//! let report = validator.finish();
//!
//! assert_eq!(report.outcome(), Outcome::Fail);
//! println!("{}", HumanFormatter::new().format(&report)?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Checks
//!
//! Per record, in order:
//!
//! - **Presence**: all seven fields must be present and non-empty; a record
//!   missing any field gets one error per missing field and nothing else
//! - **Region code**: must belong to the catalog's region set
//! - **Year**: integer inside the catalog's inclusive range (Buddhist Era)
//! - **Consumption**: positive; above the catalog threshold is a warning
//! - **Customers**: positive integer
//! - **Growth rate**: between -100 and 100 percent inclusive
//!
//! Per batch, after every record, once for each input source unless the
//! validator merges them:
//!
//! - **Duplicates**: each later `(region_code, year)` repeat is an error
//! - **Completeness**: regions with no record at all produce one warning
//!
//! ## Modules
//!
//! - [`catalog`]: region set, year range and thresholds
//! - [`core`]: records, findings, the validator and its report
//! - [`ingest`]: JSONL and CSV/TSV readers
//! - [`formatters`]: console, JSON and Markdown rendering
//! - [`logging`]: tracing setup and logging presets
//! - [`error`]: the crate error type

pub mod catalog;
pub mod core;
pub mod error;
pub mod formatters;
pub mod ingest;
pub mod logging;
pub mod prelude;

#[cfg(test)]
mod test_fixtures;
