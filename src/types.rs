//! Record types flowing through the marks pipeline.

use serde::Serialize;
use std::fmt;

/// One validated input line: an identifier and two marks in `[0, 100]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub id: String,
    pub exam_mark: f64,
    pub coursework_mark: f64,
}

/// Letter grade assigned from an overall mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Every grade, in report order.
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    // `pad` so width/alignment specs in the report layout apply.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A raw record with its weighted overall mark and grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedRecord {
    #[serde(rename = "reg_number")]
    pub id: String,
    pub exam_mark: f64,
    pub coursework_mark: f64,
    pub overall_mark: f64,
    pub grade: Grade,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_display_respects_width() {
        assert_eq!(format!("{:<5}|", Grade::A), "A    |");
        assert_eq!(format!("{}", Grade::F), "F");
    }

    #[test]
    fn test_grade_all_order() {
        let letters: Vec<_> = Grade::ALL.iter().map(Grade::as_str).collect();
        assert_eq!(letters, vec!["A", "B", "C", "D", "F"]);
    }
}
