use std::cmp::Ordering;

use crate::types::ProcessedRecord;

/// Orders records by overall mark, highest first.
///
/// The sort is stable: records with equal marks keep their input order.
pub fn rank(mut records: Vec<ProcessedRecord>) -> Vec<ProcessedRecord> {
    // `partial_cmp` keeps 0.0 and -0.0 equal, which `total_cmp` would not.
    records.sort_by(|a, b| {
        b.overall_mark
            .partial_cmp(&a.overall_mark)
            .unwrap_or(Ordering::Equal)
    });
    records
}
