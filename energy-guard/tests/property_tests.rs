//! Property-based tests for the per-record and batch checks.
//!
//! Records are generated around the reference rows and then pushed across
//! rule boundaries, so each property pins down one rule.

mod common;

use common::{record, REGIONS};
use energy_guard::catalog::{DEFAULT_CATALOG, DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR};
use energy_guard::core::{
    check_record, FindingKind, Location, RawRecord, RecordField, Severity, Validator,
};
use energy_guard::ingest::Batch;
use proptest::prelude::*;

fn region_code() -> impl Strategy<Value = &'static str> {
    prop::sample::select(REGIONS.iter().map(|row| row.0).collect::<Vec<_>>())
}

fn check(record: &RawRecord) -> energy_guard::core::RecordOutcome {
    check_record(&DEFAULT_CATALOG, record, &Location::row(1))
}

proptest! {
    #[test]
    fn prop_valid_records_have_no_errors(
        code in region_code(),
        year in DEFAULT_MIN_YEAR..=DEFAULT_MAX_YEAR,
        consumption in 0.001f64..=100_000.0,
        customers in 1i64..100_000_000,
        growth in -100.0f64..=100.0,
    ) {
        let record = record(code)
            .with(RecordField::Year, year)
            .with(RecordField::ConsumptionGwh, consumption)
            .with(RecordField::Customers, customers)
            .with(RecordField::GrowthRate, growth);
        let outcome = check(&record);
        prop_assert!(outcome.valid);
        prop_assert!(outcome.findings.is_empty());
    }

    #[test]
    fn prop_missing_fields_only_report_presence(
        code in region_code(),
        mask in 1u8..128,
        growth in 101.0f64..1000.0,
    ) {
        let mut record = record(code).with(RecordField::GrowthRate, growth);
        let mut removed = Vec::new();
        for (bit, field) in RecordField::ALL.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                record = record.without(*field);
                removed.push(*field);
            }
        }

        let outcome = check(&record);
        prop_assert!(!outcome.valid);
        prop_assert_eq!(outcome.findings.len(), removed.len());
        prop_assert!(outcome
            .findings
            .iter()
            .all(|f| f.kind == FindingKind::MissingField && f.severity == Severity::Error));
        let reported: Vec<_> = outcome.findings.iter().filter_map(|f| f.field).collect();
        prop_assert_eq!(reported, removed);
    }

    #[test]
    fn prop_year_outside_range_is_one_error(
        year in prop_oneof![0i64..DEFAULT_MIN_YEAR, (DEFAULT_MAX_YEAR + 1)..5000],
    ) {
        let outcome = check(&record("TH-C").with(RecordField::Year, year));
        prop_assert!(!outcome.valid);
        prop_assert_eq!(outcome.findings.len(), 1);
        prop_assert_eq!(outcome.findings[0].kind, FindingKind::OutOfRange);
    }

    #[test]
    fn prop_high_consumption_only_warns(consumption in 100_000.001f64..1e9) {
        let outcome = check(&record("TH-E").with(RecordField::ConsumptionGwh, consumption));
        prop_assert!(outcome.valid);
        prop_assert_eq!(outcome.findings.len(), 1);
        prop_assert_eq!(outcome.findings[0].severity, Severity::Warning);
    }

    #[test]
    fn prop_non_positive_consumption_is_an_error(consumption in -1e9f64..=0.0) {
        let outcome = check(&record("TH-E").with(RecordField::ConsumptionGwh, consumption));
        prop_assert!(!outcome.valid);
        prop_assert_eq!(outcome.findings[0].kind, FindingKind::NotPositive);
    }

    #[test]
    fn prop_text_numbers_match_native_numbers(year in DEFAULT_MIN_YEAR - 50..DEFAULT_MAX_YEAR + 50) {
        let native = check(&record("TH-N").with(RecordField::Year, year));
        let text = check(&record("TH-N").with(RecordField::Year, year.to_string()));
        prop_assert_eq!(native, text);
    }

    #[test]
    fn prop_parallel_matches_sequential(
        codes in prop::collection::vec(region_code(), 0..40),
        bad_rows in prop::collection::vec(any::<bool>(), 0..40),
    ) {
        let mut batch = Batch::new();
        for (i, code) in codes.iter().enumerate() {
            if bad_rows.get(i).copied().unwrap_or(false) {
                batch.push_malformed("invalid JSON - trailing comma");
            } else {
                batch.push_record(record(code));
            }
        }

        let mut sequential = Validator::with_default_catalog("seq");
        let mut parallel = Validator::with_default_catalog("par");
        prop_assert_eq!(
            sequential.validate_batch(&batch),
            parallel.validate_batch_parallel(&batch)
        );
        let (a, b) = (sequential.finish(), parallel.finish());
        prop_assert_eq!(a.records_checked, b.records_checked);
        prop_assert_eq!(a.findings, b.findings);
    }
}
