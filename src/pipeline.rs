//! Ingest → score → rank for one run.
//!
//! A run either produces a [`Run`] holding the ranked [`ReportSet`] together
//! with the diagnostics for every skipped line, or fails with a
//! [`MarksError`]. An input without a single valid record is
//! [`MarksError::NoData`]; no report set is built for it.

use std::path::Path;
use tracing::info;

use crate::config::Weighting;
use crate::error::MarksError;
use crate::parser::{Diagnostic, ParsedMarks, parse_lines, read_marks_file};
use crate::ranker::rank;
use crate::scorer::score_and_grade;
use crate::stats::GradeStatistics;
use crate::types::ProcessedRecord;

/// Processed records for one run, ordered by overall mark (highest first),
/// with the weighting that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSet {
    records: Vec<ProcessedRecord>,
    weighting: Weighting,
}

impl ReportSet {
    /// Ranks `records` and wraps them with their weighting.
    pub fn new(records: Vec<ProcessedRecord>, weighting: Weighting) -> Self {
        Self {
            records: rank(records),
            weighting,
        }
    }

    pub fn records(&self) -> &[ProcessedRecord] {
        &self.records
    }

    pub fn weighting(&self) -> &Weighting {
        &self.weighting
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Recomputes grade statistics over the whole set.
    pub fn statistics(&self) -> GradeStatistics {
        GradeStatistics::from_records(&self.records)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub report: ReportSet,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the pipeline with a fixed weighting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Processor {
    weighting: Weighting,
}

impl Processor {
    pub fn new(weighting: Weighting) -> Self {
        Self { weighting }
    }

    /// Processes in-memory lines.
    ///
    /// # Errors
    ///
    /// Returns [`MarksError::NoData`] if no line yields a valid record.
    pub fn process_lines<I, S>(&self, lines: I) -> Result<Run, MarksError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.process(parse_lines(lines))
    }

    /// Reads and processes a marks file.
    ///
    /// # Errors
    ///
    /// Returns [`MarksError::InputUnreadable`] before any parsing if the file
    /// cannot be read, and [`MarksError::NoData`] if it holds no valid record.
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub fn process_file(&self, path: &Path) -> Result<Run, MarksError> {
        self.process(read_marks_file(path)?)
    }

    fn process(&self, parsed: ParsedMarks) -> Result<Run, MarksError> {
        let ParsedMarks {
            records,
            diagnostics,
        } = parsed;

        if records.is_empty() {
            return Err(MarksError::NoData { diagnostics });
        }

        info!(
            records = records.len(),
            skipped = diagnostics.len(),
            "Successfully read student records"
        );

        let processed = records
            .into_iter()
            .map(|raw| score_and_grade(raw, &self.weighting))
            .collect();

        Ok(Run {
            report: ReportSet::new(processed, self.weighting),
            diagnostics,
        })
    }
}
