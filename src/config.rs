//! Scoring configuration.
//!
//! [`Weighting`] is the value handed to the scorer. [`ProcessorConfig`] is the
//! optional on-disk form, stored as a plain JSON object:
//! ```json
//! {
//!   "exam_weight": 0.7,
//!   "coursework_weight": 0.3
//! }
//! ```
//! Either key may be omitted; missing keys fall back to the defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::error::MarksError;

pub const DEFAULT_EXAM_WEIGHT: f64 = 0.6;
pub const DEFAULT_COURSEWORK_WEIGHT: f64 = 0.4;

const NORMALIZED_TOLERANCE: f64 = 1e-9;

/// Exam and coursework weights for the overall mark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weighting {
    exam: f64,
    coursework: f64,
}

impl Default for Weighting {
    fn default() -> Self {
        Self {
            exam: DEFAULT_EXAM_WEIGHT,
            coursework: DEFAULT_COURSEWORK_WEIGHT,
        }
    }
}

impl Weighting {
    /// Builds a weighting from two weights.
    ///
    /// Weights must be finite and non-negative. They do not have to sum to 1;
    /// an unnormalized weighting is accepted with a warning and can push
    /// overall marks outside `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns [`MarksError::InvalidWeighting`] for NaN, infinite or negative
    /// weights.
    pub fn new(exam: f64, coursework: f64) -> Result<Self, MarksError> {
        let invalid = |reason| MarksError::InvalidWeighting {
            exam,
            coursework,
            reason,
        };

        if !exam.is_finite() || !coursework.is_finite() {
            return Err(invalid("weights must be finite"));
        }
        if exam < 0.0 || coursework < 0.0 {
            return Err(invalid("weights must not be negative"));
        }

        let weighting = Self { exam, coursework };
        if !weighting.is_normalized() {
            warn!(
                exam,
                coursework,
                sum = exam + coursework,
                "Weights do not sum to 1; overall marks may fall outside 0-100"
            );
        }
        Ok(weighting)
    }

    pub fn exam(&self) -> f64 {
        self.exam
    }

    pub fn coursework(&self) -> f64 {
        self.coursework
    }

    /// True when the two weights sum to 1.
    pub fn is_normalized(&self) -> bool {
        (self.exam + self.coursework - 1.0).abs() < NORMALIZED_TOLERANCE
    }
}

/// Weights as read from a JSON config file.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorConfig {
    pub exam_weight: Option<f64>,
    pub coursework_weight: Option<f64>,
}

impl ProcessorConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file `{}`", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config file `{}`", path.display()))?;
        Ok(config)
    }

    /// Resolves the final weighting. `exam`/`coursework` (from the command
    /// line) win over file values, which win over the defaults.
    pub fn weighting(&self, exam: Option<f64>, coursework: Option<f64>) -> Result<Weighting> {
        let exam = exam
            .or(self.exam_weight)
            .unwrap_or(DEFAULT_EXAM_WEIGHT);
        let coursework = coursework
            .or(self.coursework_weight)
            .unwrap_or(DEFAULT_COURSEWORK_WEIGHT);
        Ok(Weighting::new(exam, coursework)?)
    }
}
