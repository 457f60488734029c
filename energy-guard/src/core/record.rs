//! Raw record model shared by the ingest adapters and the validator.

use super::Location;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven fields every energy-statistics record must carry.
///
/// The declaration order is the order in which fields are checked and
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    RegionCode,
    RegionTh,
    RegionEn,
    Year,
    ConsumptionGwh,
    Customers,
    GrowthRate,
}

impl RecordField {
    /// All required fields in check order.
    pub const ALL: [RecordField; 7] = [
        RecordField::RegionCode,
        RecordField::RegionTh,
        RecordField::RegionEn,
        RecordField::Year,
        RecordField::ConsumptionGwh,
        RecordField::Customers,
        RecordField::GrowthRate,
    ];

    /// The field name as it appears in input files.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::RegionCode => "region_code",
            RecordField::RegionTh => "region_th",
            RecordField::RegionEn => "region_en",
            RecordField::Year => "year",
            RecordField::ConsumptionGwh => "consumption_gwh",
            RecordField::Customers => "customers",
            RecordField::GrowthRate => "growth_rate",
        }
    }

    /// Looks a field up by its input name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value exactly as it was read, before any interpretation.
///
/// Tabular input only ever produces [`FieldValue::Text`]; line-delimited JSON
/// keeps the JSON type so that `2566` and `"2566"` are both accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Arrays and objects, kept as their JSON text.
    Other(String),
}

impl FieldValue {
    /// Converts a JSON value without losing what kind of value it was.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => FieldValue::Text(s.clone()),
            other => FieldValue::Other(other.to_string()),
        }
    }

    /// True for `null` and the empty string. Whitespace is a value.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Interprets the value as an integer.
    ///
    /// Finite floats are truncated toward zero and text is trimmed before
    /// parsing. Booleans, fractional text and composite values do not parse.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            FieldValue::Float(f) if f.is_finite() => {
                let truncated = f.trunc();
                if truncated >= i64::MIN as f64 && truncated <= i64::MAX as f64 {
                    Some(truncated as i64)
                } else {
                    None
                }
            }
            FieldValue::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Interprets the value as a finite real number.
    pub fn as_real(&self) -> Option<f64> {
        let value = match self {
            FieldValue::Integer(i) => *i as f64,
            FieldValue::Float(f) => *f,
            FieldValue::Text(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        value.is_finite().then_some(value)
    }

    /// The value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(s) | FieldValue::Other(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

/// One record as read from input: every required field may be absent.
///
/// Fields that are not part of the schema are dropped at ingest.
///
/// # Examples
///
/// ```rust
/// use energy_guard::core::{RawRecord, RecordField};
///
/// let record = RawRecord::new()
///     .with(RecordField::RegionCode, "TH-C")
///     .with(RecordField::Year, 2566_i64);
///
/// assert!(!record.is_missing(RecordField::RegionCode));
/// assert!(record.is_missing(RecordField::Customers));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub region_code: Option<FieldValue>,
    pub region_th: Option<FieldValue>,
    pub region_en: Option<FieldValue>,
    pub year: Option<FieldValue>,
    pub consumption_gwh: Option<FieldValue>,
    pub customers: Option<FieldValue>,
    pub growth_rate: Option<FieldValue>,
}

impl RawRecord {
    /// Creates a record with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a JSON object, ignoring unknown keys.
    pub fn from_json_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut record = Self::new();
        for field in RecordField::ALL {
            if let Some(value) = object.get(field.as_str()) {
                record.set(field, FieldValue::from_json(value));
            }
        }
        record
    }

    /// Builds a record from `(column name, cell)` pairs, as tabular readers
    /// produce them. Column names are trimmed (including a leading byte-order
    /// mark); unknown columns are ignored.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut record = Self::new();
        for (name, cell) in pairs {
            let name = name.trim().trim_start_matches('\u{feff}');
            if let Some(field) = RecordField::from_name(name) {
                record.set(field, FieldValue::Text(cell.to_string()));
            }
        }
        record
    }

    /// Returns the raw value of `field`, if present.
    pub fn get(&self, field: RecordField) -> Option<&FieldValue> {
        self.slot(field).as_ref()
    }

    /// Sets the raw value of `field`.
    pub fn set(&mut self, field: RecordField, value: FieldValue) {
        *self.slot_mut(field) = Some(value);
    }

    /// Removes `field` from the record.
    pub fn remove(&mut self, field: RecordField) -> Option<FieldValue> {
        self.slot_mut(field).take()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: RecordField, value: impl Into<FieldValue>) -> Self {
        self.set(field, value.into());
        self
    }

    /// Builder-style [`remove`](Self::remove).
    pub fn without(mut self, field: RecordField) -> Self {
        self.remove(field);
        self
    }

    /// True if `field` is absent, null or the empty string.
    pub fn is_missing(&self, field: RecordField) -> bool {
        self.get(field).map_or(true, FieldValue::is_empty)
    }

    /// Required fields that are missing, in check order.
    pub fn missing_fields(&self) -> Vec<RecordField> {
        RecordField::ALL
            .into_iter()
            .filter(|field| self.is_missing(*field))
            .collect()
    }

    /// True when every required field is present and non-empty.
    pub fn is_structurally_complete(&self) -> bool {
        RecordField::ALL.iter().all(|field| !self.is_missing(*field))
    }

    fn slot(&self, field: RecordField) -> &Option<FieldValue> {
        match field {
            RecordField::RegionCode => &self.region_code,
            RecordField::RegionTh => &self.region_th,
            RecordField::RegionEn => &self.region_en,
            RecordField::Year => &self.year,
            RecordField::ConsumptionGwh => &self.consumption_gwh,
            RecordField::Customers => &self.customers,
            RecordField::GrowthRate => &self.growth_rate,
        }
    }

    fn slot_mut(&mut self, field: RecordField) -> &mut Option<FieldValue> {
        match field {
            RecordField::RegionCode => &mut self.region_code,
            RecordField::RegionTh => &mut self.region_th,
            RecordField::RegionEn => &mut self.region_en,
            RecordField::Year => &mut self.year,
            RecordField::ConsumptionGwh => &mut self.consumption_gwh,
            RecordField::Customers => &mut self.customers,
            RecordField::GrowthRate => &mut self.growth_rate,
        }
    }
}

/// A record together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedRecord {
    pub location: Location,
    pub record: RawRecord,
}

impl LocatedRecord {
    pub fn new(location: impl Into<Location>, record: RawRecord) -> Self {
        Self {
            location: location.into(),
            record,
        }
    }
}
