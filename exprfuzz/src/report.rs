//! Console reporting of trials
//!
//! Text output is the classic `RESULT == CONTROL` table; JSON output is one
//! object per line for machine consumption.

use crate::comparator::Trial;
use crate::number::Number;
use crate::FuzzResult;
use serde::Serialize;
use std::io::Write;

pub const TEXT_HEADER: &str = "RESULT == CONTROL";
pub const FAILURE_MARKER: &str = "FAILED:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct TrialRecord<'a> {
    index: usize,
    expression: &'a str,
    reference: Number,
    candidate: &'a str,
    passed: bool,
}

#[derive(Serialize)]
struct FailureRecord<'a> {
    failed: &'a str,
}

pub struct Reporter<W: Write> {
    out: W,
    format: ReportFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: ReportFormat) -> Self {
        Self { out, format }
    }

    pub fn header(&mut self) -> FuzzResult<()> {
        if self.format == ReportFormat::Text {
            writeln!(self.out, "{}", TEXT_HEADER)?;
        }
        Ok(())
    }

    pub fn trial(&mut self, trial: &Trial) -> FuzzResult<()> {
        let candidate = trial.output.trim();
        match self.format {
            ReportFormat::Text => writeln!(self.out, "{} == {}", candidate, trial.reference)?,
            ReportFormat::Json => {
                let record = TrialRecord {
                    index: trial.index,
                    expression: &trial.expression,
                    reference: trial.reference,
                    candidate,
                    passed: trial.passed,
                };
                serde_json::to_writer(&mut self.out, &record)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    pub fn failure(&mut self, trial: &Trial) -> FuzzResult<()> {
        match self.format {
            ReportFormat::Text => {
                writeln!(self.out, "{}", FAILURE_MARKER)?;
                writeln!(self.out, "{}", trial.expression)?;
            }
            ReportFormat::Json => {
                serde_json::to_writer(
                    &mut self.out,
                    &FailureRecord {
                        failed: &trial.expression,
                    },
                )?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn flush(&mut self) -> FuzzResult<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
