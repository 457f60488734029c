//! Ingest adapters: turn input files into a [`Batch`] of raw records.
//!
//! Two input shapes are supported: line-delimited JSON (one object per line)
//! and tabular CSV/TSV with a header row. Entries that cannot be read as a
//! record at all are kept in the batch as [`IngestEntry::Malformed`] so the
//! validator can report them at their row; they take no part in the
//! batch-level checks.
//!
//! # Examples
//!
//! ```rust,no_run
//! use energy_guard::ingest::{read_path, Batch};
//!
//! # fn example() -> energy_guard::prelude::Result<()> {
//! let mut batch = read_path("data/energy_stats.jsonl", None)?;
//! batch.extend(read_path("data/energy_stats_clean.csv", None)?);
//! println!("{} entries, {} unreadable", batch.len(), batch.malformed_count());
//! # Ok(())
//! # }
//! ```

use crate::core::{LocatedRecord, Location, RawRecord};
use crate::prelude::*;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::str::FromStr;

mod csv;
mod jsonl;

pub use self::csv::{CsvOptions, CsvSource};
pub use self::jsonl::JsonLinesSource;

/// One entry read from an input.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestEntry {
    /// A record that was read successfully (its fields may still be invalid)
    Record(LocatedRecord),
    /// An entry that is not a well-formed record
    Malformed { location: Location, reason: String },
}

impl IngestEntry {
    pub fn location(&self) -> &Location {
        match self {
            IngestEntry::Record(located) => &located.location,
            IngestEntry::Malformed { location, .. } => location,
        }
    }
}

/// The ordered entries submitted to one validation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    entries: Vec<IngestEntry>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps plain records, numbering them from row 1.
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        let mut batch = Self::new();
        for record in records {
            batch.push_record(record);
        }
        batch
    }

    pub fn push(&mut self, entry: IngestEntry) {
        self.entries.push(entry);
    }

    /// Appends a record at the next row number.
    pub fn push_record(&mut self, record: RawRecord) {
        let row = self.entries.len() + 1;
        self.push(IngestEntry::Record(LocatedRecord::new(row, record)));
    }

    /// Appends an unreadable entry at the next row number.
    pub fn push_malformed(&mut self, reason: impl Into<String>) {
        let row = self.entries.len() + 1;
        self.push(IngestEntry::Malformed {
            location: Location::row(row),
            reason: reason.into(),
        });
    }

    pub fn entries(&self) -> &[IngestEntry] {
        &self.entries
    }

    /// Well-formed records only, in input order.
    pub fn records(&self) -> impl Iterator<Item = &LocatedRecord> {
        self.entries.iter().filter_map(|entry| match entry {
            IngestEntry::Record(located) => Some(located),
            IngestEntry::Malformed { .. } => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn malformed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, IngestEntry::Malformed { .. }))
            .count()
    }
}

impl Extend<IngestEntry> for Batch {
    fn extend<T: IntoIterator<Item = IngestEntry>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for Batch {
    type Item = IngestEntry;
    type IntoIter = std::vec::IntoIter<IngestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// One JSON object per line
    JsonLines,
    /// Comma-separated values with a header row
    Csv,
    /// Tab-separated values with a header row
    Tsv,
}

impl InputFormat {
    /// Detects the format from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        extension.parse().map_err(|_| {
            GuardError::UnsupportedFormat(format!(
                "cannot infer input format of '{}' (expected .jsonl, .ndjson, .json, .csv or .tsv)",
                path.display()
            ))
        })
    }
}

impl FromStr for InputFormat {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jsonl" | "ndjson" | "json" => Ok(InputFormat::JsonLines),
            "csv" => Ok(InputFormat::Csv),
            "tsv" => Ok(InputFormat::Tsv),
            other => Err(GuardError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// A readable input of raw records.
pub trait RecordSource: Debug + Send + Sync {
    /// Reads every entry of the input.
    ///
    /// Only problems that prevent reading the input at all are errors;
    /// unreadable entries become [`IngestEntry::Malformed`].
    fn load(&self) -> Result<Batch>;

    /// Returns a human-readable description of this source.
    fn description(&self) -> String;
}

/// Creates the source matching `format`, or the path's extension.
pub fn source_for_path(
    path: impl AsRef<Path>,
    format: Option<InputFormat>,
) -> Result<Box<dyn RecordSource>> {
    let path = path.as_ref();
    let format = match format {
        Some(format) => format,
        None => InputFormat::from_path(path)?,
    };
    Ok(match format {
        InputFormat::JsonLines => Box::new(JsonLinesSource::new(path)),
        InputFormat::Csv => Box::new(CsvSource::new(path)),
        InputFormat::Tsv => Box::new(CsvSource::with_options(path, CsvOptions::tsv())),
    })
}

/// Reads one file into a batch.
pub fn read_path(path: impl AsRef<Path>, format: Option<InputFormat>) -> Result<Batch> {
    source_for_path(path, format)?.load()
}

/// Expands glob patterns into the files they match, in pattern order.
///
/// A pattern without glob metacharacters must name an existing file.
pub fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let matches = glob::glob(pattern).map_err(|e| {
            GuardError::Configuration(format!("Invalid glob pattern '{pattern}': {e}"))
        })?;

        let before = paths.len();
        for entry in matches {
            let path = entry.map_err(|e| {
                let message = format!("Cannot read {}", e.path().display());
                GuardError::data_source_with_source("file", message, Box::new(e.into_error()))
            })?;
            if path.is_file() {
                paths.push(path);
            }
        }

        if paths.len() == before {
            return Err(GuardError::data_source(
                "file",
                format!("No files found matching '{pattern}'"),
            ));
        }
    }
    Ok(paths)
}
