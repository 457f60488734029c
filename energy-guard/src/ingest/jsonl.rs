//! Line-delimited JSON source.

use super::{Batch, IngestEntry, RecordSource};
use crate::core::{LocatedRecord, Location, RawRecord};
use crate::prelude::*;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// A file with one JSON object per line.
///
/// Line N becomes row N, so row numbers always match line numbers in an
/// editor. Every line is expected to hold a record: a blank line is reported
/// as malformed. The newline ending the last line does not start a new one.
#[derive(Debug, Clone)]
pub struct JsonLinesSource {
    path: PathBuf,
}

impl JsonLinesSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parses line-delimited JSON from any reader.
    ///
    /// `source` names the input in finding locations.
    pub fn parse_reader<R: BufRead>(mut reader: R, source: Option<&str>) -> Result<Batch> {
        let mut batch = Batch::new();
        let mut buffer = Vec::new();
        let mut line_number = 0usize;

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            line_number += 1;

            let location = match source {
                Some(name) => Location::row(line_number).with_source(name),
                None => Location::row(line_number),
            };
            batch.push(parse_line(&buffer, line_number, location));
        }

        debug!(lines = line_number, entries = batch.len(), "Parsed JSONL input");
        Ok(batch)
    }
}

fn parse_line(bytes: &[u8], line_number: usize, location: Location) -> IngestEntry {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            return IngestEntry::Malformed {
                location,
                reason: format!("invalid UTF-8: {e}"),
            }
        }
    };
    let text = if line_number == 1 {
        text.trim_start_matches('\u{feff}')
    } else {
        text
    };
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::Object(object)) => {
            IngestEntry::Record(LocatedRecord::new(location, RawRecord::from_json_object(&object)))
        }
        Ok(other) => IngestEntry::Malformed {
            location,
            reason: format!("expected a JSON object, found {}", json_kind(&other)),
        },
        Err(e) => IngestEntry::Malformed {
            location,
            reason: format!("invalid JSON - {e}"),
        },
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl RecordSource for JsonLinesSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Batch> {
        let file = File::open(&self.path)
            .with_context(|| format!("Opening {}", self.path.display()))?;
        let source = self.path.display().to_string();
        let batch = Self::parse_reader(BufReader::new(file), Some(&source))?;
        info!(
            entries = batch.len(),
            malformed = batch.malformed_count(),
            "Loaded JSONL file"
        );
        Ok(batch)
    }

    fn description(&self) -> String {
        format!("JSONL file {}", self.path.display())
    }
}
