//! The differential driver loop
//!
//! Runs trials strictly one after another: generate an expression, evaluate it
//! with the reference evaluator, hand it to the candidate, compare, report.
//! The first mismatch ends the run.

use crate::comparator::{self, Trial};
use crate::config::FuzzConfig;
use crate::evaluator;
use crate::generator::ExpressionGenerator;
use crate::process::CandidateEvaluator;
use crate::report::Reporter;
use crate::{FuzzError, FuzzResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use tracing::{debug, info, info_span, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Every trial passed (or was skipped)
    Completed { passed: usize, skipped: usize },
    /// The run stopped at this trial
    Mismatch(Trial),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }
}

pub struct Runner {
    config: FuzzConfig,
    seed: u64,
    rng: StdRng,
}

impl Runner {
    pub fn new(config: FuzzConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The seed actually in use; pass it back via `FuzzConfig::seed` to replay a run
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn run<E, W>(
        &mut self,
        candidate: &mut E,
        reporter: &mut Reporter<W>,
    ) -> FuzzResult<RunOutcome>
    where
        E: CandidateEvaluator + ?Sized,
        W: Write,
    {
        let config = &self.config;
        info!(
            seed = self.seed,
            iterations = config.iterations,
            binary = %config.binary.display(),
            "Starting differential run"
        );

        reporter.header()?;

        let mut passed = 0;
        let mut skipped = 0;
        let generator = ExpressionGenerator::new(&mut self.rng, &config.generator);

        for (index, generated) in generator.take(config.iterations).enumerate() {
            let _span = info_span!("trial", index).entered();
            let expression = generated.to_string();
            debug!(%expression, "Generated expression");

            let reference = match evaluator::evaluate_str(&expression, &config.limits) {
                Ok(value) => value,
                Err(FuzzError::DivisionByZero(details)) if config.skip_undefined => {
                    warn!(
                        %expression,
                        span = ?details.span,
                        "Skipping trial without a reference value"
                    );
                    skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let output = candidate.evaluate(&expression)?;
            let trial =
                comparator::compare(index, &expression, reference, output, &config.tolerance)?;
            reporter.trial(&trial)?;

            if !trial.passed {
                reporter.failure(&trial)?;
                warn!(
                    %expression,
                    reference = %trial.reference,
                    candidate = trial.candidate,
                    "Candidate disagrees with reference"
                );
                return Ok(RunOutcome::Mismatch(trial));
            }
            passed += 1;
        }

        reporter.flush()?;
        info!(passed, skipped, "Differential run completed");
        Ok(RunOutcome::Completed { passed, skipped })
    }
}
