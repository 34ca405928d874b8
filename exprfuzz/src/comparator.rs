//! Comparing candidate output with the reference value

use crate::number::Number;
use crate::{FuzzError, FuzzResult};

/// Difference allowed between reference and candidate
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToleranceMode {
    /// `|reference - candidate| < epsilon`
    #[default]
    Symmetric,
    /// `reference - candidate < epsilon`: any candidate above the reference passes.
    OneSided,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub epsilon: f64,
    pub mode: ToleranceMode,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_TOLERANCE,
            mode: ToleranceMode::Symmetric,
        }
    }
}

impl Tolerance {
    /// NaN on either side never passes.
    pub fn accepts(&self, reference: f64, candidate: f64) -> bool {
        let difference = reference - candidate;
        match self.mode {
            ToleranceMode::Symmetric => difference.abs() < self.epsilon,
            ToleranceMode::OneSided => difference < self.epsilon,
        }
    }
}

/// The outcome of one generate-evaluate-compare iteration
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    pub index: usize,
    pub expression: String,
    pub reference: Number,
    /// Raw text printed by the system under test
    pub output: String,
    pub candidate: f64,
    pub passed: bool,
}

/// Parse candidate output the way a float literal is read from text:
/// surrounding whitespace is ignored, single underscores may separate digits
/// (`1_000`), anything else must be a number.
pub fn parse_candidate(output: &str, expression: &str) -> FuzzResult<f64> {
    let not_numeric = || FuzzError::CandidateNotNumeric {
        expression: expression.to_string(),
        output: output.to_string(),
    };

    let text = output.trim();
    let digits = if text.contains('_') {
        strip_digit_separators(text).ok_or_else(not_numeric)?
    } else {
        text.to_string()
    };
    digits.parse::<f64>().map_err(|_| not_numeric())
}

/// Removes `_` found between two ASCII digits; `None` for any other underscore
fn strip_digit_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut stripped = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        if c == '_' {
            let before = i.checked_sub(1).map(|j| bytes[j]);
            let after = bytes.get(i + 1).copied();
            match (before, after) {
                (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => continue,
                _ => return None,
            }
        }
        stripped.push(c);
    }
    Some(stripped)
}

pub fn compare(
    index: usize,
    expression: &str,
    reference: Number,
    output: String,
    tolerance: &Tolerance,
) -> FuzzResult<Trial> {
    let candidate = parse_candidate(&output, expression)?;
    let passed = tolerance.accepts(reference.to_f64(), candidate);
    Ok(Trial {
        index,
        expression: expression.to_string(),
        reference,
        output,
        candidate,
        passed,
    })
}
