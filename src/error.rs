//! Terminal failures of a marks pipeline run.
//!
//! Per-line input problems are not errors; they are reported as
//! [`Diagnostic`]s and the line is dropped.

use std::io;
use std::path::PathBuf;

use crate::parser::Diagnostic;

/// Boxed source for failures coming from more than one library.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An enum to represent the ways a pipeline run can fail outright.
#[derive(thiserror::Error, Debug)]
pub enum MarksError {
    /// The input file could not be opened or read.
    #[error("input file `{}` could not be read", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Parsing finished without a single valid record.
    #[error("no valid student data found ({} line(s) skipped)", diagnostics.len())]
    NoData {
        /// Diagnostics for every skipped line, in input order.
        diagnostics: Vec<Diagnostic>,
    },
    /// The report destination could not be written.
    #[error("report could not be written to `{}`", path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A CSV or JSON side artifact could not be written.
    #[error("export to `{}` failed", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
    /// The weighting is not usable for scoring.
    #[error("invalid weighting (exam {exam}, coursework {coursework}): {reason}")]
    InvalidWeighting {
        exam: f64,
        coursework: f64,
        reason: &'static str,
    },
}

impl MarksError {
    /// Returns the skipped-line diagnostics carried by a [`MarksError::NoData`].
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            MarksError::NoData { diagnostics } => diagnostics,
            _ => &[],
        }
    }
}
