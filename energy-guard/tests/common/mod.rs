//! Shared fixtures for integration tests.
#![allow(dead_code)]

use energy_guard::core::{RawRecord, RecordField};
use energy_guard::ingest::Batch;
use serde_json::json;

pub const REGIONS: [(&str, &str, &str, f64, i64, f64); 5] = [
    ("TH-C", "ภาคกลาง", "Central", 45230.0, 8_542_000, 3.2),
    ("TH-N", "ภาคเหนือ", "North", 18450.0, 4_125_000, 2.8),
    ("TH-NE", "ภาคตะวันออกเฉียงเหนือ", "Northeast", 22180.0, 7_890_000, 4.1),
    ("TH-S", "ภาคใต้", "South", 15620.0, 3_456_000, 2.5),
    ("TH-E", "ภาคตะวันออก", "East", 28970.0, 2_987_000, 5.3),
];

pub const CSV_HEADER: &str =
    "region_code,region_th,region_en,year,consumption_gwh,customers,growth_rate";

/// A valid 2566 record for one of the five reference regions.
pub fn record(code: &str) -> RawRecord {
    let (code, th, en, consumption, customers, growth) = *REGIONS
        .iter()
        .find(|row| row.0 == code)
        .unwrap_or_else(|| panic!("unknown reference region {code}"));
    RawRecord::new()
        .with(RecordField::RegionCode, code)
        .with(RecordField::RegionTh, th)
        .with(RecordField::RegionEn, en)
        .with(RecordField::Year, 2566_i64)
        .with(RecordField::ConsumptionGwh, consumption)
        .with(RecordField::Customers, customers)
        .with(RecordField::GrowthRate, growth)
}

/// The five reference records in rows 1 to 5.
pub fn reference_batch() -> Batch {
    Batch::from_records(REGIONS.iter().map(|row| record(row.0)).collect())
}

/// The reference data as JSON lines.
pub fn reference_jsonl() -> String {
    REGIONS
        .iter()
        .map(|(code, th, en, consumption, customers, growth)| {
            json!({
                "region_code": code,
                "region_th": th,
                "region_en": en,
                "year": 2566,
                "consumption_gwh": consumption,
                "customers": customers,
                "growth_rate": growth,
            })
            .to_string()
                + "\n"
        })
        .collect()
}

/// The reference data as CSV with a header row.
pub fn reference_csv() -> String {
    let mut out = format!("{CSV_HEADER}\n");
    for (code, th, en, consumption, customers, growth) in REGIONS {
        out.push_str(&format!(
            "{code},{th},{en},2566,{consumption},{customers},{growth}\n"
        ));
    }
    out
}
