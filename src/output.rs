//! Report rendering and persistence.
//!
//! The fixed-width report is the persisted artifact. Column widths and
//! 2-decimal formatting must not change. Statistics render to a separate text
//! block; records and statistics can also be exported as CSV/JSON.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt;
use std::io;
use std::path::Path;
use tracing::{debug, error, info};

use crate::config::Weighting;
use crate::error::{BoxError, MarksError};
use crate::pipeline::ReportSet;
use crate::stats::GradeStatistics;

const REPORT_WIDTH: usize = 80;
const STATS_WIDTH: usize = 60;

impl fmt::Display for ReportSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(REPORT_WIDTH);

        writeln!(f, "{heavy}")?;
        writeln!(f, "STUDENT MARKS REPORT")?;
        writeln!(f, "{heavy}")?;
        writeln!(f)?;
        writeln!(f, "{}", weighting_line(self.weighting()))?;
        writeln!(f)?;

        writeln!(
            f,
            "{:<15} {:<8} {:<12} {:<10} {:<5}",
            "Reg Number", "Exam", "Coursework", "Overall", "Grade"
        )?;
        writeln!(f, "{}", "-".repeat(REPORT_WIDTH))?;

        for r in self.records() {
            writeln!(
                f,
                "{:<15} {:<8.2} {:<12.2} {:<10.2} {:<5}",
                r.id, r.exam_mark, r.coursework_mark, r.overall_mark, r.grade
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{heavy}")
    }
}

impl fmt::Display for GradeStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(STATS_WIDTH);
        let light = "-".repeat(STATS_WIDTH);

        writeln!(f, "{heavy}")?;
        writeln!(f, "GRADE STATISTICS")?;
        writeln!(f, "{heavy}")?;
        writeln!(f)?;
        writeln!(f, "Total Students: {}", self.total)?;
        writeln!(f)?;
        writeln!(f, "{:<10} {:<10} {:<15}", "Grade", "Count", "Percentage")?;
        writeln!(f, "{light}")?;

        for g in &self.grades {
            writeln!(f, "{:<10} {:<10} {:<15.2}%", g.grade, g.count, g.percentage)?;
        }

        writeln!(f)?;
        writeln!(f, "{light}")?;
        writeln!(f)?;
        writeln!(f, "AVERAGE MARKS")?;
        writeln!(f, "{light}")?;
        writeln!(f, "Average Exam Mark:       {:.2}", self.mean_exam)?;
        writeln!(f, "Average Coursework Mark: {:.2}", self.mean_coursework)?;
        writeln!(f, "Average Overall Mark:    {:.2}", self.mean_overall)?;
        writeln!(f)?;
        writeln!(f, "{heavy}")
    }
}

/// Renders the fixed-width marks report.
pub fn render_report(report: &ReportSet) -> String {
    report.to_string()
}

/// Renders the grade distribution and mean marks as a console block.
pub fn render_statistics(stats: &GradeStatistics) -> String {
    stats.to_string()
}

/// `Weighting: Exam 60%, Coursework 40%`, rounded to whole percent.
pub fn weighting_line(weighting: &Weighting) -> String {
    format!(
        "Weighting: Exam {:.0}%, Coursework {:.0}%",
        weighting.exam() * 100.0,
        weighting.coursework() * 100.0
    )
}

/// Writes the rendered report to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`MarksError::OutputUnwritable`] if the file cannot be written.
#[tracing::instrument(skip(path, report), fields(path = %path.display(), records = report.len()))]
pub fn write_report(path: &Path, report: &ReportSet) -> Result<(), MarksError> {
    std::fs::write(path, render_report(report)).map_err(|source| {
        MarksError::OutputUnwritable {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!("Results written");
    Ok(())
}

/// Writes the report to `path` and the statistics block to `console`.
///
/// The statistics block is written even when the report cannot be; the
/// report failure is returned after it, as a [`MarksError`].
pub fn publish<W: io::Write>(
    report: &ReportSet,
    path: &Path,
    console: &mut W,
) -> Result<GradeStatistics> {
    let stats = report.statistics();

    let written = write_report(path, report);
    if let Err(e) = &written {
        error!(error = ?e, "Failed to write report");
    }

    write!(console, "{stats}")?;
    console.flush()?;

    written?;
    Ok(stats)
}

/// Statistics as exported to JSON, stamped with the weighting and time.
#[derive(Debug, Serialize)]
pub struct StatisticsExport<'a> {
    pub generated_at: DateTime<Utc>,
    pub weighting: &'a Weighting,
    pub statistics: &'a GradeStatistics,
}

impl<'a> StatisticsExport<'a> {
    pub fn new(report: &'a ReportSet, statistics: &'a GradeStatistics) -> Self {
        Self {
            generated_at: Utc::now(),
            weighting: report.weighting(),
            statistics,
        }
    }
}

/// Logs statistics as pretty-printed JSON.
pub fn log_statistics_json(export: &StatisticsExport<'_>) -> Result<()> {
    debug!("{}", serde_json::to_string_pretty(export)?);
    Ok(())
}

/// Writes statistics as pretty-printed JSON to `path`.
pub fn write_statistics_json(path: &Path, export: &StatisticsExport<'_>) -> Result<(), MarksError> {
    let write = || -> Result<(), BoxError> {
        let json = serde_json::to_string_pretty(export)?;
        std::fs::write(path, json)?;
        Ok(())
    };

    write().map_err(|source| MarksError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "Statistics JSON written");
    Ok(())
}

/// Writes every record of the report set as a CSV row, replacing any
/// existing file. The header row comes from the record field names.
pub fn write_csv(path: &Path, report: &ReportSet) -> Result<(), MarksError> {
    let write = || -> Result<(), BoxError> {
        let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
        for record in report.records() {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    };

    write().map_err(|source| MarksError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = report.len(), "CSV written");
    Ok(())
}
