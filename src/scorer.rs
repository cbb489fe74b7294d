use crate::config::Weighting;
use crate::grade::grade;
use crate::types::{ProcessedRecord, RawRecord};

/// Computes the weighted overall mark for `raw` and grades it.
///
/// No rounding is applied; the grade is taken from the full-precision mark.
pub fn score_and_grade(raw: RawRecord, weighting: &Weighting) -> ProcessedRecord {
    let overall_mark =
        raw.exam_mark * weighting.exam() + raw.coursework_mark * weighting.coursework();

    ProcessedRecord {
        id: raw.id,
        exam_mark: raw.exam_mark,
        coursework_mark: raw.coursework_mark,
        overall_mark,
        grade: grade(overall_mark),
    }
}
