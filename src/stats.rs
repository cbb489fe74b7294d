use serde::Serialize;

use crate::types::{Grade, ProcessedRecord};

/// Number and share of records holding one grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeCount {
    pub grade: Grade,
    pub count: usize,
    pub percentage: f64,
}

/// Grade distribution and mean marks over a set of processed records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeStatistics {
    pub total: usize,

    // one entry per grade, in `Grade::ALL` order
    pub grades: Vec<GradeCount>,

    pub mean_exam: f64,
    pub mean_coursework: f64,
    pub mean_overall: f64,
}

impl GradeStatistics {
    pub fn from_records(records: &[ProcessedRecord]) -> Self {
        let total = records.len();

        let grades = Grade::ALL
            .iter()
            .map(|&grade| {
                let count = records.iter().filter(|r| r.grade == grade).count();
                GradeCount {
                    grade,
                    count,
                    percentage: Self::pct(count, total),
                }
            })
            .collect();

        let exam: Vec<f64> = records.iter().map(|r| r.exam_mark).collect();
        let coursework: Vec<f64> = records.iter().map(|r| r.coursework_mark).collect();
        let overall: Vec<f64> = records.iter().map(|r| r.overall_mark).collect();

        GradeStatistics {
            total,
            grades,
            mean_exam: mean(&exam),
            mean_coursework: mean(&coursework),
            mean_overall: mean(&overall),
        }
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn count(&self, grade: Grade) -> usize {
        self.grades
            .iter()
            .find(|g| g.grade == grade)
            .map_or(0, |g| g.count)
    }
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::grade;

    fn processed(exam: f64, coursework: f64, overall: f64) -> ProcessedRecord {
        ProcessedRecord {
            id: "S".to_string(),
            exam_mark: exam,
            coursework_mark: coursework,
            overall_mark: overall,
            grade: grade(overall),
        }
    }

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(GradeStatistics::pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(GradeStatistics::pct(50, 100), 50.0);
        assert_eq!(GradeStatistics::pct(1, 4), 25.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[10.0, 20.0, 60.0]), 30.0);
    }

    #[test]
    fn test_from_records_distribution() {
        let records = vec![
            processed(80.0, 80.0, 80.0),
            processed(75.0, 65.0, 71.0),
            processed(60.0, 60.0, 60.0),
            processed(30.0, 20.0, 26.0),
        ];
        let stats = GradeStatistics::from_records(&records);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.count(Grade::A), 2);
        assert_eq!(stats.count(Grade::B), 1);
        assert_eq!(stats.count(Grade::C), 0);
        assert_eq!(stats.count(Grade::D), 0);
        assert_eq!(stats.count(Grade::F), 1);
        assert_eq!(stats.grades[0].percentage, 50.0);
        assert_eq!(stats.grades[2].percentage, 0.0);

        assert_eq!(stats.mean_exam, 61.25);
        assert_eq!(stats.mean_coursework, 56.25);
        assert_eq!(stats.mean_overall, 59.25);
    }

    #[test]
    fn test_counts_and_percentages_are_consistent() {
        let records: Vec<_> = (0..37)
            .map(|i| {
                let mark = (i * 7 % 101) as f64;
                processed(mark, mark, mark)
            })
            .collect();
        let stats = GradeStatistics::from_records(&records);

        let counted: usize = stats.grades.iter().map(|g| g.count).sum();
        assert_eq!(counted, records.len());

        let pct_sum: f64 = stats.grades.iter().map(|g| g.percentage).sum();
        assert!((pct_sum - 100.0).abs() < 1e-9);

        let order: Vec<Grade> = stats.grades.iter().map(|g| g.grade).collect();
        assert_eq!(order, Grade::ALL.to_vec());
    }

    #[test]
    fn test_from_records_empty() {
        let stats = GradeStatistics::from_records(&[]);

        assert_eq!(stats.total, 0);
        assert!(stats.grades.iter().all(|g| g.count == 0 && g.percentage == 0.0));
        assert_eq!(stats.mean_overall, 0.0);
    }
}
