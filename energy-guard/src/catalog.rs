//! The rule catalog: the static domain constraints records are judged against.
//!
//! A catalog is plain data. It is built once, validated, and then shared
//! read-only (usually behind an `Arc`) with every [`Validator`] of a run.
//! Swapping the catalog is how the engine is reused for another dataset.
//!
//! # Examples
//!
//! ```rust
//! use energy_guard::catalog::RuleCatalog;
//!
//! let catalog = RuleCatalog::builder()
//!     .region_codes(["US-CA", "US-TX"])
//!     .year_range(2000, 2030)
//!     .consumption_warning_threshold(500_000.0)
//!     .build()
//!     .unwrap();
//!
//! assert!(catalog.is_valid_region("US-CA"));
//! assert!(catalog.year_range().contains(2030));
//! ```
//!
//! [`Validator`]: crate::core::Validator

use crate::prelude::*;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

/// Region codes of the reference deployment (Thai electricity regions).
pub const THAI_REGION_CODES: [&str; 5] = ["TH-C", "TH-N", "TH-NE", "TH-S", "TH-E"];

/// Earliest admissible year of the reference deployment (Buddhist Era).
pub const DEFAULT_MIN_YEAR: i64 = 2500;

/// Latest admissible year of the reference deployment (Buddhist Era).
pub const DEFAULT_MAX_YEAR: i64 = 2600;

/// Consumption above this many GWh is reported as unusually high.
pub const DEFAULT_CONSUMPTION_WARNING_GWH: f64 = 100_000.0;

/// Lower bound of the admissible growth rate, in percent.
pub const MIN_GROWTH_RATE: f64 = -100.0;

/// Upper bound of the admissible growth rate, in percent.
pub const MAX_GROWTH_RATE: f64 = 100.0;

/// The reference catalog, built on first use.
pub static DEFAULT_CATALOG: Lazy<Arc<RuleCatalog>> =
    Lazy::new(|| Arc::new(RuleCatalog::thai_regions()));

/// A closed interval of admissible years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    /// Inclusive lower bound
    pub min: i64,
    /// Inclusive upper bound
    pub max: i64,
}

impl YearRange {
    /// Creates a new year range. Bounds are not checked here; see
    /// [`RuleCatalog::validate`].
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Returns true if `year` lies within the closed interval.
    pub fn contains(&self, year: i64) -> bool {
        self.min <= year && year <= self.max
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_YEAR, DEFAULT_MAX_YEAR)
    }
}

/// Immutable domain rules for energy-statistics records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleCatalog {
    valid_region_codes: BTreeSet<String>,
    #[serde(default)]
    year_range: YearRange,
    #[serde(default = "default_threshold")]
    consumption_warning_threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_CONSUMPTION_WARNING_GWH
}

impl RuleCatalog {
    /// The reference catalog: five Thai regions, years 2500-2600 BE.
    pub fn thai_regions() -> Self {
        Self {
            valid_region_codes: THAI_REGION_CODES.iter().map(|c| c.to_string()).collect(),
            year_range: YearRange::default(),
            consumption_warning_threshold: DEFAULT_CONSUMPTION_WARNING_GWH,
        }
    }

    /// Starts building a custom catalog.
    pub fn builder() -> RuleCatalogBuilder {
        RuleCatalogBuilder::default()
    }

    /// Parses and validates a catalog from JSON.
    ///
    /// ```rust
    /// use energy_guard::catalog::RuleCatalog;
    ///
    /// let catalog = RuleCatalog::from_json_str(
    ///     r#"{"valid_region_codes": ["A", "B"], "year_range": {"min": 1, "max": 9}}"#,
    /// )
    /// .unwrap();
    /// assert_eq!(catalog.consumption_warning_threshold(), 100_000.0);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads, parses and validates a catalog file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Reading rule catalog {}", path.display()))?;
        Self::from_json_str(&content)
    }

    /// Checks the catalog for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.valid_region_codes.is_empty() {
            return Err(GuardError::Configuration(
                "rule catalog must list at least one region code".to_string(),
            ));
        }
        if let Some(code) = self.valid_region_codes.iter().find(|c| c.trim().is_empty()) {
            return Err(GuardError::Configuration(format!(
                "rule catalog contains a blank region code '{code}'"
            )));
        }
        if self.year_range.min > self.year_range.max {
            return Err(GuardError::Configuration(format!(
                "year range is inverted: min {} > max {}",
                self.year_range.min, self.year_range.max
            )));
        }
        let threshold = self.consumption_warning_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(GuardError::Configuration(format!(
                "consumption warning threshold must be a positive number, got {threshold}"
            )));
        }
        Ok(())
    }

    /// The closed set of valid region codes, sorted.
    pub fn valid_region_codes(&self) -> &BTreeSet<String> {
        &self.valid_region_codes
    }

    /// Returns true if `code` belongs to the catalog.
    pub fn is_valid_region(&self, code: &str) -> bool {
        self.valid_region_codes.contains(code)
    }

    /// The admissible year interval.
    pub fn year_range(&self) -> YearRange {
        self.year_range
    }

    /// Consumption (GWh) above which a warning is raised.
    pub fn consumption_warning_threshold(&self) -> f64 {
        self.consumption_warning_threshold
    }

    /// Renders the code set for messages, e.g. `[TH-C, TH-E]`.
    pub(crate) fn describe_region_codes(&self) -> String {
        let codes: Vec<&str> = self.valid_region_codes.iter().map(String::as_str).collect();
        format!("[{}]", codes.join(", "))
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::thai_regions()
    }
}

/// Builder for [`RuleCatalog`].
#[derive(Debug, Clone)]
pub struct RuleCatalogBuilder {
    valid_region_codes: BTreeSet<String>,
    year_range: YearRange,
    consumption_warning_threshold: f64,
}

impl Default for RuleCatalogBuilder {
    fn default() -> Self {
        Self {
            valid_region_codes: BTreeSet::new(),
            year_range: YearRange::default(),
            consumption_warning_threshold: DEFAULT_CONSUMPTION_WARNING_GWH,
        }
    }
}

impl RuleCatalogBuilder {
    /// Adds region codes to the valid set.
    pub fn region_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_region_codes
            .extend(codes.into_iter().map(Into::into));
        self
    }

    /// Sets the admissible year interval.
    pub fn year_range(mut self, min: i64, max: i64) -> Self {
        self.year_range = YearRange::new(min, max);
        self
    }

    /// Sets the unusually-high consumption threshold.
    pub fn consumption_warning_threshold(mut self, threshold: f64) -> Self {
        self.consumption_warning_threshold = threshold;
        self
    }

    /// Builds and validates the catalog.
    pub fn build(self) -> Result<RuleCatalog> {
        let catalog = RuleCatalog {
            valid_region_codes: self.valid_region_codes,
            year_range: self.year_range,
            consumption_warning_threshold: self.consumption_warning_threshold,
        };
        catalog.validate()?;
        Ok(catalog)
    }
}
