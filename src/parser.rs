//! Line parser for whitespace-delimited student marks files.
//!
//! Each line is `<reg_number> <exam_mark> <coursework_mark>`. Blank lines and
//! lines starting with `#` are skipped silently; anything else that does not
//! yield a valid [`RawRecord`] is dropped with a [`Diagnostic`].

use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::MarksError;
use crate::types::RawRecord;

/// Lowest accepted mark.
pub const MIN_MARK: f64 = 0.0;
/// Highest accepted mark.
pub const MAX_MARK: f64 = 100.0;

const FIELD_COUNT: usize = 3;

/// Why a line was skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// The line did not split into exactly three fields.
    InvalidFormat { fields: usize },
    /// A mark field was not a number.
    InvalidNumber { value: String },
    /// A mark was outside `[0, 100]`.
    OutOfRange,
}

/// A skipped input line and the reason it was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 1-based line number in the input.
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::InvalidFormat { fields } => write!(
                f,
                "line {}: invalid format (expected {} fields, found {})",
                self.line, FIELD_COUNT, fields
            ),
            DiagnosticKind::InvalidNumber { value } => {
                write!(f, "line {}: invalid numeric value `{}`", self.line, value)
            }
            DiagnosticKind::OutOfRange => write!(
                f,
                "line {}: marks out of range ({}-{})",
                self.line, MIN_MARK, MAX_MARK
            ),
        }
    }
}

/// Records and diagnostics from one parse, both in input order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedMarks {
    pub records: Vec<RawRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses marks lines into [`RawRecord`]s, collecting a diagnostic for every
/// malformed line.
pub fn parse_lines<I, S>(lines: I) -> ParsedMarks
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedMarks::default();

    for (index, line) in lines.into_iter().enumerate() {
        match parse_line(index + 1, line.as_ref()) {
            Ok(Some(record)) => parsed.records.push(record),
            Ok(None) => {}
            Err(diagnostic) => {
                debug!(line = diagnostic.line, "Skipping line: {}", diagnostic);
                parsed.diagnostics.push(diagnostic);
            }
        }
    }

    parsed
}

/// Reads and parses a marks file.
///
/// # Errors
///
/// Returns [`MarksError::InputUnreadable`] if the file cannot be read as UTF-8
/// text. Malformed lines are not errors.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn read_marks_file(path: &Path) -> Result<ParsedMarks, MarksError> {
    let content = std::fs::read_to_string(path).map_err(|source| MarksError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(bytes = content.len(), "Marks file read, parsing");

    Ok(parse_lines(split_lines(&content)))
}

/// Splits text into lines ending in `\n`, `\r\n` or a bare `\r`.
///
/// A trailing terminator does not start an extra empty line.
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        let Some(end) = rest.find(['\r', '\n']) else {
            lines.push(rest);
            break;
        };
        lines.push(&rest[..end]);
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
    }

    lines
}

fn parse_line(line_no: usize, line: &str) -> Result<Option<RawRecord>, Diagnostic> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [id, exam, coursework] = fields.as_slice() else {
        return Err(Diagnostic {
            line: line_no,
            kind: DiagnosticKind::InvalidFormat {
                fields: fields.len(),
            },
        });
    };

    let exam_mark = parse_mark(line_no, exam)?;
    let coursework_mark = parse_mark(line_no, coursework)?;

    if !in_range(exam_mark) || !in_range(coursework_mark) {
        return Err(Diagnostic {
            line: line_no,
            kind: DiagnosticKind::OutOfRange,
        });
    }

    Ok(Some(RawRecord {
        id: id.to_string(),
        exam_mark,
        coursework_mark,
    }))
}

fn parse_mark(line_no: usize, value: &str) -> Result<f64, Diagnostic> {
    value.parse::<f64>().map_err(|_| Diagnostic {
        line: line_no,
        kind: DiagnosticKind::InvalidNumber {
            value: value.to_string(),
        },
    })
}

// NaN fails both comparisons, so it is rejected here too.
fn in_range(mark: f64) -> bool {
    (MIN_MARK..=MAX_MARK).contains(&mark)
}
