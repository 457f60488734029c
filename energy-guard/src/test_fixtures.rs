//! Reference records shared by unit tests.

use crate::core::{RawRecord, RecordField};
use crate::ingest::Batch;

/// Region code, Thai name, English name, consumption (GWh), customers, growth (%).
const REFERENCE: [(&str, &str, &str, f64, i64, f64); 5] = [
    ("TH-C", "ภาคกลาง", "Central", 45230.0, 8_542_000, 3.2),
    ("TH-N", "ภาคเหนือ", "North", 18450.0, 4_125_000, 2.8),
    ("TH-NE", "ภาคตะวันออกเฉียงเหนือ", "Northeast", 22180.0, 7_890_000, 4.1),
    ("TH-S", "ภาคใต้", "South", 15620.0, 3_456_000, 2.5),
    ("TH-E", "ภาคตะวันออก", "East", 28970.0, 2_987_000, 5.3),
];

/// A complete, valid 2566 record for `code`.
///
/// Codes outside the reference set still get a structurally complete record.
pub(crate) fn reference_record(code: &str) -> RawRecord {
    let (_, region_th, region_en, consumption, customers, growth) = REFERENCE
        .iter()
        .copied()
        .find(|row| row.0 == code)
        .unwrap_or(("", "ไม่ทราบ", "Unknown", 1000.0, 1000, 1.0));

    RawRecord::new()
        .with(RecordField::RegionCode, code)
        .with(RecordField::RegionTh, region_th)
        .with(RecordField::RegionEn, region_en)
        .with(RecordField::Year, 2566_i64)
        .with(RecordField::ConsumptionGwh, consumption)
        .with(RecordField::Customers, customers)
        .with(RecordField::GrowthRate, growth)
}

/// All five reference regions in rows 1 to 5.
pub(crate) fn reference_batch() -> Batch {
    Batch::from_records(REFERENCE.iter().map(|row| reference_record(row.0)).collect())
}
