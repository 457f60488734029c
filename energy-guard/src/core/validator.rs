//! The validation engine: per-record checks and batch-level checks.
//!
//! A [`Validator`] owns the report of exactly one run. Findings accumulate
//! while records stream through; [`Validator::finish`] consumes the validator
//! and hands back the finalized [`ValidationReport`], so an accumulator can
//! never be reused for a second batch.

use super::{
    FieldValue, Finding, FindingKind, LocatedRecord, Location, RawRecord, RecordField,
    ValidationReport,
};
use crate::catalog::{RuleCatalog, DEFAULT_CATALOG, MAX_GROWTH_RATE, MIN_GROWTH_RATE};
use crate::ingest::{Batch, IngestEntry};
use crate::logging::{truncate_field, LogConfig};
use crate::{log_record, perf_debug};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Findings produced by the per-record checks for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    /// True iff no error was found. Warnings do not count.
    pub valid: bool,
    pub findings: Vec<Finding>,
}

/// The seven required values of a structurally complete record.
struct PresentFields<'a> {
    region_code: &'a FieldValue,
    year: &'a FieldValue,
    consumption_gwh: &'a FieldValue,
    customers: &'a FieldValue,
    growth_rate: &'a FieldValue,
}

impl<'a> PresentFields<'a> {
    fn extract(record: &'a RawRecord) -> Option<Self> {
        let present = move |field| record.get(field).filter(|value| !value.is_empty());
        match (
            present(RecordField::RegionCode),
            present(RecordField::RegionTh),
            present(RecordField::RegionEn),
            present(RecordField::Year),
            present(RecordField::ConsumptionGwh),
            present(RecordField::Customers),
            present(RecordField::GrowthRate),
        ) {
            (
                Some(region_code),
                Some(_),
                Some(_),
                Some(year),
                Some(consumption_gwh),
                Some(customers),
                Some(growth_rate),
            ) => Some(Self {
                region_code,
                year,
                consumption_gwh,
                customers,
                growth_rate,
            }),
            _ => None,
        }
    }
}

/// Runs the per-record checks against `catalog` without touching any report.
///
/// A record missing any required field yields one error per missing field and
/// nothing else. Otherwise region code, year, consumption, customers and growth
/// rate are checked in that order.
pub fn check_record(catalog: &RuleCatalog, record: &RawRecord, location: &Location) -> RecordOutcome {
    let mut findings = Vec::new();

    let Some(fields) = PresentFields::extract(record) else {
        for field in record.missing_fields() {
            findings.push(
                Finding::error(
                    location.clone(),
                    FindingKind::MissingField,
                    format!("Missing required field '{field}'"),
                )
                .for_field(field),
            );
        }
        return RecordOutcome {
            valid: false,
            findings,
        };
    };

    let error = |field: RecordField, kind: FindingKind, message: String| {
        Finding::error(location.clone(), kind, message).for_field(field)
    };
    let invalid = |field: RecordField, raw: &FieldValue| {
        error(
            field,
            FindingKind::InvalidValue,
            format!("Invalid {field} value '{raw}'"),
        )
    };

    match fields.region_code.as_text() {
        Some(code) if catalog.is_valid_region(code) => {}
        _ => findings.push(error(
            RecordField::RegionCode,
            FindingKind::InvalidRegionCode,
            format!(
                "Invalid region_code '{}'. Must be one of {}",
                fields.region_code,
                catalog.describe_region_codes()
            ),
        )),
    }

    match fields.year.as_integer() {
        Some(year) => {
            let range = catalog.year_range();
            if !range.contains(year) {
                findings.push(error(
                    RecordField::Year,
                    FindingKind::OutOfRange,
                    format!("Year {year} out of range [{}, {}]", range.min, range.max),
                ));
            }
        }
        None => findings.push(invalid(RecordField::Year, fields.year)),
    }

    match fields.consumption_gwh.as_real() {
        Some(consumption) if consumption <= 0.0 => findings.push(error(
            RecordField::ConsumptionGwh,
            FindingKind::NotPositive,
            format!("consumption_gwh must be positive, got {consumption}"),
        )),
        Some(consumption) if consumption > catalog.consumption_warning_threshold() => {
            findings.push(
                Finding::warning(
                    location.clone(),
                    FindingKind::UnusuallyHigh,
                    format!("consumption_gwh={consumption} seems unusually high"),
                )
                .for_field(RecordField::ConsumptionGwh),
            )
        }
        Some(_) => {}
        None => findings.push(invalid(RecordField::ConsumptionGwh, fields.consumption_gwh)),
    }

    match fields.customers.as_integer() {
        Some(customers) if customers <= 0 => findings.push(error(
            RecordField::Customers,
            FindingKind::NotPositive,
            format!("customers must be positive, got {customers}"),
        )),
        Some(_) => {}
        None => findings.push(invalid(RecordField::Customers, fields.customers)),
    }

    match fields.growth_rate.as_real() {
        Some(growth) if !(MIN_GROWTH_RATE..=MAX_GROWTH_RATE).contains(&growth) => {
            findings.push(error(
                RecordField::GrowthRate,
                FindingKind::OutOfRange,
                format!("growth_rate {growth} out of range [{MIN_GROWTH_RATE}, {MAX_GROWTH_RATE}]"),
            ))
        }
        Some(_) => {}
        None => findings.push(invalid(RecordField::GrowthRate, fields.growth_rate)),
    }

    RecordOutcome {
        valid: !findings.iter().any(Finding::is_error),
        findings,
    }
}

/// Composite identity of a record for duplicate detection.
fn duplicate_key(record: &RawRecord) -> (Option<String>, Option<String>) {
    let component = |field| {
        record
            .get(field)
            .filter(|value| !matches!(value, FieldValue::Null))
            .map(ToString::to_string)
    };
    (component(RecordField::RegionCode), component(RecordField::Year))
}

fn describe_key_part(part: &Option<String>) -> &str {
    part.as_deref().unwrap_or("<missing>")
}

/// Well-formed records grouped by the input they came from, in order of
/// first appearance. An empty batch yields one empty, unnamed group.
fn group_by_source(batch: &Batch) -> Vec<(Option<&str>, Vec<&LocatedRecord>)> {
    let mut groups: Vec<(Option<&str>, Vec<&LocatedRecord>)> = Vec::new();
    for located in batch.records() {
        let source = located.location.source.as_deref();
        match groups.iter_mut().find(|(name, _)| *name == source) {
            Some((_, records)) => records.push(located),
            None => groups.push((source, vec![located])),
        }
    }
    if groups.is_empty() {
        groups.push((None, Vec::new()));
    }
    groups
}

enum EntryOutcome {
    Record(RecordOutcome),
    Malformed(Finding),
}

/// Validates records of one run and accumulates the findings.
///
/// Batch-level checks run once per input source (the `source` of each
/// record's location), so the same dataset delivered as two files does not
/// flag itself as duplicated. [`with_merged_sources`](Self::with_merged_sources)
/// checks the whole batch as one dataset instead.
///
/// # Examples
///
/// ```rust
/// use energy_guard::core::{RawRecord, RecordField, Validator};
///
/// let mut validator = Validator::with_default_catalog("example");
/// let record = RawRecord::new()
///     .with(RecordField::RegionCode, "TH-C")
///     .with(RecordField::RegionTh, "ภาคกลาง")
///     .with(RecordField::RegionEn, "Central")
///     .with(RecordField::Year, 2566_i64)
///     .with(RecordField::ConsumptionGwh, 45230.0)
///     .with(RecordField::Customers, 8_542_000_i64)
///     .with(RecordField::GrowthRate, 3.2);
///
/// assert!(validator.validate_record(&record, 1));
/// let report = validator.finish();
/// assert_eq!(report.records_checked, 1);
/// assert!(report.passed());
/// ```
#[derive(Debug)]
pub struct Validator {
    catalog: Arc<RuleCatalog>,
    report: ValidationReport,
    log_config: LogConfig,
    merge_sources: bool,
}

impl Validator {
    /// Creates a validator with a fresh report named `name`.
    pub fn new(name: impl Into<String>, catalog: Arc<RuleCatalog>) -> Self {
        Self {
            catalog,
            report: ValidationReport::new(name),
            log_config: LogConfig::default(),
            merge_sources: false,
        }
    }

    /// Creates a validator using the reference catalog.
    pub fn with_default_catalog(name: impl Into<String>) -> Self {
        Self::new(name, Arc::clone(&DEFAULT_CATALOG))
    }

    /// Sets the logging configuration for this run.
    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// Runs duplicate and completeness checks across all sources at once.
    pub fn with_merged_sources(mut self, merge: bool) -> Self {
        self.merge_sources = merge;
        self
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// The report accumulated so far.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Finalizes the run and returns its report.
    pub fn finish(self) -> ValidationReport {
        self.report
    }

    /// Checks one record and appends its findings.
    ///
    /// Returns true iff no error was found for this record. The record counts
    /// as checked whatever the result.
    pub fn validate_record(&mut self, record: &RawRecord, location: impl Into<Location>) -> bool {
        let location = location.into();
        let outcome = check_record(&self.catalog, record, &location);
        self.absorb_record(&location, outcome)
    }

    /// Records an entry that could not be read as a record at all.
    ///
    /// Such entries are not counted as checked.
    pub fn record_syntax_error(&mut self, location: impl Into<Location>, reason: &str) {
        let location = location.into();
        warn!(
            location = %location,
            reason = %truncate_field(reason, self.log_config.max_field_length),
            "Skipping unreadable entry"
        );
        self.report.push(Finding::error(
            location,
            FindingKind::InvalidSyntax,
            format!("Invalid record syntax: {reason}"),
        ));
    }

    /// Flags every record whose `(region_code, year)` pair was already seen.
    ///
    /// The first occurrence wins; each later one gets an error at its own
    /// location. Missing key parts are valid key components. Returns true iff
    /// no duplicates were found.
    pub fn check_duplicates<'a, I>(&mut self, records: I) -> bool
    where
        I: IntoIterator<Item = &'a LocatedRecord>,
    {
        let mut seen = HashSet::new();
        let mut duplicates = 0usize;

        for located in records {
            let key = duplicate_key(&located.record);
            if seen.contains(&key) {
                duplicates += 1;
                let message = format!(
                    "Duplicate record for region={}, year={}",
                    describe_key_part(&key.0),
                    describe_key_part(&key.1)
                );
                log_record!(self.log_config, location = %located.location, "{}", message);
                self.report.push(Finding::error(
                    located.location.clone(),
                    FindingKind::Duplicate,
                    message,
                ));
            } else {
                seen.insert(key);
            }
        }

        debug!(
            distinct_keys = seen.len(),
            duplicates, "Duplicate check finished"
        );
        duplicates == 0
    }

    /// Warns once if any catalog region has no record in the batch.
    ///
    /// Returns true iff every region is present.
    pub fn check_completeness<'a, I>(&mut self, records: I) -> bool
    where
        I: IntoIterator<Item = &'a LocatedRecord>,
    {
        self.check_completeness_at(Location::dataset(), records)
    }

    fn check_completeness_at<'a, I>(&mut self, scope: Location, records: I) -> bool
    where
        I: IntoIterator<Item = &'a LocatedRecord>,
    {
        let observed: HashSet<&str> = records
            .into_iter()
            .filter_map(|located| located.record.get(RecordField::RegionCode))
            .filter_map(FieldValue::as_text)
            .collect();

        let missing: BTreeSet<&str> = self
            .catalog
            .valid_region_codes()
            .iter()
            .map(String::as_str)
            .filter(|code| !observed.contains(code))
            .collect();

        if missing.is_empty() {
            return true;
        }

        let missing: Vec<&str> = missing.into_iter().collect();
        debug!(scope = %scope, missing = ?missing, "Regions without data");
        self.report.push(Finding::warning(
            scope,
            FindingKind::MissingRegions,
            format!("Missing data for regions: {}", missing.join(", ")),
        ));
        false
    }

    /// Validates a whole batch: every entry in input order, then duplicates,
    /// then completeness.
    ///
    /// Duplicates and completeness are judged per source unless the
    /// validator was built with merged sources. Unreadable entries produce a syntax error and are left out of the
    /// batch-level checks. Returns true iff this batch produced no errors.
    #[instrument(skip_all, fields(run = %self.report.name, entries = batch.len()))]
    pub fn validate_batch(&mut self, batch: &Batch) -> bool {
        let mut all_valid = true;
        for entry in batch.entries() {
            all_valid &= match entry {
                IngestEntry::Record(located) => {
                    self.validate_record(&located.record, located.location.clone())
                }
                IngestEntry::Malformed { location, reason } => {
                    self.record_syntax_error(location.clone(), reason);
                    false
                }
            };
        }
        self.finish_batch(batch, all_valid)
    }

    /// Same as [`validate_batch`](Self::validate_batch), with the per-record
    /// checks spread over the rayon thread pool.
    ///
    /// Results are collected in input order before the batch-level checks
    /// run, so the report is identical to a sequential run.
    #[instrument(skip_all, fields(run = %self.report.name, entries = batch.len()))]
    pub fn validate_batch_parallel(&mut self, batch: &Batch) -> bool {
        let catalog = self.catalog.as_ref();
        let outcomes: Vec<EntryOutcome> = batch
            .entries()
            .par_iter()
            .map(|entry| match entry {
                IngestEntry::Record(located) => EntryOutcome::Record(check_record(
                    catalog,
                    &located.record,
                    &located.location,
                )),
                IngestEntry::Malformed { location, reason } => EntryOutcome::Malformed(
                    Finding::error(
                        location.clone(),
                        FindingKind::InvalidSyntax,
                        format!("Invalid record syntax: {reason}"),
                    ),
                ),
            })
            .collect();

        let mut all_valid = true;
        for (entry, outcome) in batch.entries().iter().zip(outcomes) {
            all_valid &= match outcome {
                EntryOutcome::Record(outcome) => {
                    self.absorb_record(entry.location(), outcome)
                }
                EntryOutcome::Malformed(finding) => {
                    self.report.push(finding);
                    false
                }
            };
        }
        self.finish_batch(batch, all_valid)
    }

    fn finish_batch(&mut self, batch: &Batch, records_valid: bool) -> bool {
        let groups = if self.merge_sources {
            vec![(None, batch.records().collect::<Vec<_>>())]
        } else {
            group_by_source(batch)
        };

        let mut unique = true;
        for (_, records) in &groups {
            unique &= self.check_duplicates(records.iter().copied());
        }
        let mut complete = true;
        for (source, records) in &groups {
            let scope = match source {
                Some(name) => Location::dataset().with_source(*name),
                None => Location::dataset(),
            };
            complete &= self.check_completeness_at(scope, records.iter().copied());
        }

        info!(
            sources = groups.len(),
            records_checked = self.report.records_checked,
            errors = self.report.error_count(),
            warnings = self.report.warning_count(),
            unique,
            complete,
            "Batch validation finished"
        );
        records_valid && unique
    }

    fn absorb_record(&mut self, location: &Location, outcome: RecordOutcome) -> bool {
        self.report.records_checked += 1;
        if !outcome.valid {
            perf_debug!(
                self.log_config,
                location = %location,
                findings = outcome.findings.len(),
                "Record failed validation"
            );
        }
        for finding in &outcome.findings {
            log_record!(
                self.log_config,
                location = %location,
                severity = %finding.severity,
                "{}",
                truncate_field(&finding.message, self.log_config.max_field_length)
            );
        }
        self.report.findings.extend(outcome.findings);
        outcome.valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;
    use crate::test_fixtures::{reference_batch, reference_record};

    fn validator() -> Validator {
        Validator::with_default_catalog("test")
    }

    fn record_with(field: RecordField, value: impl Into<FieldValue>) -> RawRecord {
        reference_record("TH-C").with(field, value)
    }

    fn single(record: &RawRecord) -> (bool, ValidationReport) {
        let mut v = validator();
        let valid = v.validate_record(record, 1);
        (valid, v.finish())
    }

    #[test]
    fn test_valid_record_has_no_findings() {
        let (valid, report) = single(&reference_record("TH-NE"));
        assert!(valid);
        assert!(report.findings.is_empty());
        assert_eq!(report.records_checked, 1);
    }

    #[test]
    fn test_missing_fields_short_circuit() {
        let record = reference_record("TH-C")
            .without(RecordField::Year)
            .with(RecordField::RegionEn, "")
            .with(RecordField::GrowthRate, 500.0);
        let (valid, report) = single(&record);

        assert!(!valid);
        assert_eq!(report.records_checked, 1);
        let fields: Vec<_> = report.findings.iter().map(|f| f.field).collect();
        assert_eq!(
            fields,
            vec![Some(RecordField::RegionEn), Some(RecordField::Year)]
        );
        assert!(report
            .findings
            .iter()
            .all(|f| f.kind == FindingKind::MissingField && f.is_error()));
        assert_eq!(report.findings[1].message, "Missing required field 'year'");
    }

    #[test]
    fn test_invalid_region_code_lists_valid_set() {
        let (valid, report) = single(&record_with(RecordField::RegionCode, "TH-X"));
        assert!(!valid);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(
            report.findings[0].message,
            "Invalid region_code 'TH-X'. Must be one of [TH-C, TH-E, TH-N, TH-NE, TH-S]"
        );
    }

    #[test]
    fn test_non_text_region_code_is_invalid() {
        let (valid, report) = single(&record_with(RecordField::RegionCode, 42_i64));
        assert!(!valid);
        assert_eq!(report.findings[0].kind, FindingKind::InvalidRegionCode);
    }

    #[test]
    fn test_year_boundaries() {
        for (year, ok) in [(2500, true), (2600, true), (2499, false), (2601, false)] {
            let (valid, report) = single(&record_with(RecordField::Year, year as i64));
            assert_eq!(valid, ok, "year {year}");
            if !ok {
                assert_eq!(
                    report.findings[0].message,
                    format!("Year {year} out of range [2500, 2600]")
                );
            }
        }
    }

    #[test]
    fn test_unparseable_year() {
        let (valid, report) = single(&record_with(RecordField::Year, "twenty"));
        assert!(!valid);
        assert_eq!(report.findings[0].kind, FindingKind::InvalidValue);
        assert_eq!(report.findings[0].message, "Invalid year value 'twenty'");
    }

    #[test]
    fn test_consumption_boundaries() {
        let (valid, report) = single(&record_with(RecordField::ConsumptionGwh, 100_000.0));
        assert!(valid);
        assert!(report.findings.is_empty());

        let (valid, report) = single(&record_with(RecordField::ConsumptionGwh, 100_000.01));
        assert!(valid);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].severity, Severity::Warning);
        assert_eq!(report.findings[0].kind, FindingKind::UnusuallyHigh);

        for bad in [0.0, -1.0] {
            let (valid, report) = single(&record_with(RecordField::ConsumptionGwh, bad));
            assert!(!valid);
            assert_eq!(report.findings.len(), 1);
            assert_eq!(report.findings[0].kind, FindingKind::NotPositive);
        }
    }

    #[test]
    fn test_consumption_threshold_comes_from_catalog() {
        let catalog = RuleCatalog::builder()
            .region_codes(["TH-C"])
            .consumption_warning_threshold(10.0)
            .build()
            .unwrap();
        let mut v = Validator::new("custom", Arc::new(catalog));
        assert!(v.validate_record(&record_with(RecordField::ConsumptionGwh, 11.0), 1));
        assert_eq!(v.report().warning_count(), 1);
    }

    #[test]
    fn test_customers_rules() {
        let (valid, report) = single(&record_with(RecordField::Customers, 0_i64));
        assert!(!valid);
        assert_eq!(report.findings[0].message, "customers must be positive, got 0");

        let (valid, report) = single(&record_with(RecordField::Customers, "12.5"));
        assert!(!valid);
        assert_eq!(report.findings[0].message, "Invalid customers value '12.5'");
    }

    #[test]
    fn test_growth_rate_bounds() {
        for (growth, ok) in [(-100.0, true), (100.0, true), (100.5, false), (-150.0, false)] {
            let (valid, _) = single(&record_with(RecordField::GrowthRate, growth));
            assert_eq!(valid, ok, "growth {growth}");
        }
        let (_, report) = single(&record_with(RecordField::GrowthRate, 150.0));
        assert_eq!(
            report.findings[0].message,
            "growth_rate 150 out of range [-100, 100]"
        );
    }

    #[test]
    fn test_semantic_findings_follow_check_order() {
        let record = reference_record("TH-Z")
            .with(RecordField::Year, "x")
            .with(RecordField::ConsumptionGwh, -5.0)
            .with(RecordField::Customers, -1_i64)
            .with(RecordField::GrowthRate, "fast");
        let (valid, report) = single(&record);
        assert!(!valid);
        let fields: Vec<_> = report.findings.iter().filter_map(|f| f.field).collect();
        assert_eq!(
            fields,
            vec![
                RecordField::RegionCode,
                RecordField::Year,
                RecordField::ConsumptionGwh,
                RecordField::Customers,
                RecordField::GrowthRate,
            ]
        );
    }

    #[test]
    fn test_duplicates_flag_later_occurrence() {
        let records = vec![
            LocatedRecord::new(1, reference_record("TH-C")),
            LocatedRecord::new(2, reference_record("TH-N")),
            LocatedRecord::new(3, reference_record("TH-C")),
        ];
        let mut v = validator();
        assert!(!v.check_duplicates(&records));
        let report = v.finish();
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].location, Location::row(3));
        assert_eq!(
            report.findings[0].message,
            "Duplicate record for region=TH-C, year=2566"
        );
    }

    #[test]
    fn test_duplicates_with_missing_key_parts() {
        let records = vec![
            LocatedRecord::new(1, RawRecord::new()),
            LocatedRecord::new(2, RawRecord::new().with(RecordField::Year, FieldValue::Null)),
        ];
        let mut v = validator();
        assert!(!v.check_duplicates(&records));
        assert_eq!(
            v.report().findings[0].message,
            "Duplicate record for region=<missing>, year=<missing>"
        );
    }

    #[test]
    fn test_completeness_warns_about_missing_regions() {
        let records: Vec<_> = ["TH-C", "TH-N", "TH-NE", "TH-S"]
            .iter()
            .enumerate()
            .map(|(i, code)| LocatedRecord::new(i + 1, reference_record(code)))
            .collect();
        let mut v = validator();
        assert!(!v.check_completeness(&records));
        let report = v.finish();
        assert_eq!(report.findings.len(), 1);
        assert!(report.findings[0].is_warning());
        assert!(report.findings[0].location.is_dataset());
        assert_eq!(report.findings[0].message, "Missing data for regions: TH-E");
        assert!(report.passed());
    }

    #[test]
    fn test_batch_orders_findings() {
        let mut batch = reference_batch();
        batch.push_record(reference_record("TH-C").with(RecordField::GrowthRate, 150.0));
        batch.push_malformed("expected value at line 1 column 1");

        let mut v = validator();
        assert!(!v.validate_batch(&batch));
        let report = v.finish();

        let kinds: Vec<_> = report.findings.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FindingKind::OutOfRange,
                FindingKind::InvalidSyntax,
                FindingKind::Duplicate,
            ]
        );
        assert_eq!(report.records_checked, 6);
        assert_eq!(report.findings[1].location, Location::row(7));
    }

    fn located_in(source: &str, codes: &[&str]) -> Batch {
        let mut batch = Batch::new();
        for (i, code) in codes.iter().enumerate() {
            batch.push(IngestEntry::Record(LocatedRecord::new(
                Location::row(i + 2).with_source(source),
                reference_record(code),
            )));
        }
        batch
    }

    #[test]
    fn test_batch_checks_run_per_source() {
        let all = ["TH-C", "TH-N", "TH-NE", "TH-S", "TH-E"];
        let mut batch = located_in("energy_stats.jsonl", &all);
        batch.extend(located_in("energy_stats_clean.csv", &all));
        batch.extend(located_in("partial.csv", &["TH-C", "TH-C"]));

        let mut v = validator();
        assert!(!v.validate_batch(&batch));
        let report = v.finish();

        assert_eq!(report.records_checked, 12);
        let errors = report.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, FindingKind::Duplicate);
        assert_eq!(errors[0].location, Location::row(3).with_source("partial.csv"));

        let warnings = report.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].location, Location::dataset().with_source("partial.csv"));
        assert_eq!(
            warnings[0].to_string(),
            "partial.csv: Missing data for regions: TH-E, TH-N, TH-NE, TH-S"
        );
    }

    #[test]
    fn test_merged_sources_share_batch_checks() {
        let all = ["TH-C", "TH-N", "TH-NE", "TH-S", "TH-E"];
        let mut batch = located_in("energy_stats.jsonl", &all);
        batch.extend(located_in("energy_stats_clean.csv", &all));

        let mut v = validator().with_merged_sources(true);
        assert!(!v.validate_batch_parallel(&batch));
        let report = v.finish();

        assert_eq!(report.error_count(), 5);
        assert!(report.errors().iter().all(|f| f.kind == FindingKind::Duplicate
            && f.location.source.as_deref() == Some("energy_stats_clean.csv")));
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut batch = reference_batch();
        batch.push_record(reference_record("TH-S").with(RecordField::Customers, "many"));
        batch.push_malformed("trailing characters");
        batch.push_record(RawRecord::new().with(RecordField::RegionCode, "TH-E"));

        let mut sequential = validator();
        let mut parallel = validator();
        assert_eq!(
            sequential.validate_batch(&batch),
            parallel.validate_batch_parallel(&batch)
        );
        let (a, b) = (sequential.finish(), parallel.finish());
        assert_eq!(a.findings, b.findings);
        assert_eq!(a.records_checked, b.records_checked);
    }
}
