//! Tabular (CSV/TSV) source.

use super::{Batch, IngestEntry, RecordSource};
use crate::core::{LocatedRecord, Location, RawRecord};
use crate::prelude::*;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Options for configuring CSV file reading.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Comment prefix (lines starting with this are ignored)
    pub comment: Option<u8>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            comment: None,
        }
    }
}

impl CsvOptions {
    /// Tab-separated values.
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// A delimited file whose first row names the fields.
///
/// The header is row 1, so the first data row is reported as row 2. Rows
/// shorter than the header leave their trailing fields absent.
///
/// # Examples
///
/// ```rust,no_run
/// use energy_guard::ingest::{CsvOptions, CsvSource, RecordSource};
///
/// # fn example() -> energy_guard::prelude::Result<()> {
/// let source = CsvSource::with_options("data/energy_stats.tsv", CsvOptions::tsv());
/// let batch = source.load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_options(path, CsvOptions::default())
    }

    pub fn with_options(path: impl AsRef<Path>, options: CsvOptions) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options,
        }
    }

    /// Parses delimited text from any reader.
    ///
    /// `source` names the input in finding locations.
    pub fn parse_reader<R: Read>(
        reader: R,
        source: Option<&str>,
        options: &CsvOptions,
    ) -> Result<Batch> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(options.delimiter)
            .quote(options.quote)
            .comment(options.comment)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mut batch = Batch::new();
        if headers.is_empty() {
            warn!(source = source.unwrap_or("<reader>"), "Input has no header row");
            return Ok(batch);
        }

        for (idx, result) in reader.records().enumerate() {
            let row = idx + 2;
            let location = match source {
                Some(name) => Location::row(row).with_source(name),
                None => Location::row(row),
            };
            match result {
                Ok(record) => {
                    let raw = RawRecord::from_pairs(headers.iter().zip(record.iter()));
                    batch.push(IngestEntry::Record(LocatedRecord::new(location, raw)));
                }
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => batch.push(IngestEntry::Malformed {
                    location,
                    reason: e.to_string(),
                }),
            }
        }

        debug!(
            columns = headers.len(),
            entries = batch.len(),
            "Parsed delimited input"
        );
        Ok(batch)
    }
}

impl RecordSource for CsvSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Batch> {
        let file = File::open(&self.path)
            .with_context(|| format!("Opening {}", self.path.display()))?;
        let source = self.path.display().to_string();
        let batch = Self::parse_reader(file, Some(&source), &self.options)?;
        info!(
            entries = batch.len(),
            malformed = batch.malformed_count(),
            "Loaded delimited file"
        );
        Ok(batch)
    }

    fn description(&self) -> String {
        let kind = if self.options.delimiter == b'\t' {
            "TSV"
        } else {
            "CSV"
        };
        format!("{kind} file {}", self.path.display())
    }
}
