//! # exprfuzz
//!
//! **Differential fuzzing for arithmetic expression evaluators**
//!
//! exprfuzz generates random infix arithmetic expressions, evaluates each one
//! with a trusted reference evaluator and with an external binary, and stops at
//! the first disagreement.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exprfuzz::{ExternalEvaluator, FuzzConfig, FuzzResult, ReportFormat, Reporter, Runner};
//!
//! fn main() -> FuzzResult<()> {
//!     let config = FuzzConfig::default();
//!     let mut candidate = ExternalEvaluator::new(&config.binary);
//!     let mut reporter = Reporter::new(std::io::stdout(), ReportFormat::Text);
//!
//!     let outcome = Runner::new(config).run(&mut candidate, &mut reporter)?;
//!     assert!(outcome.is_success());
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Generator
//! Builds expressions from non-zero integer operands in `[-100, 100]`, the
//! operators `+ - * /` and balanced parentheses.
//!
//! ### Reference evaluator
//! Parses with a small grammar and evaluates with standard precedence. Integer
//! arithmetic stays exact; division is always true division.
//!
//! ### Candidate
//! Anything implementing [`CandidateEvaluator`]; normally an external binary
//! called with the quoted expression as its only argument.

pub mod ast;
pub mod comparator;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod number;
pub mod parser;
pub mod process;
pub mod report;
pub mod resource_limits;
pub mod runner;
pub mod semantic;

pub use ast::Span;
pub use comparator::{Tolerance, ToleranceMode, Trial};
pub use config::FuzzConfig;
pub use error::{ErrorDetails, FuzzError};
pub use evaluator::{evaluate, evaluate_str};
pub use generator::{ExpressionGenerator, GeneratedExpression, GeneratorConfig, Token};
pub use number::Number;
pub use parser::{parse, ParsedExpression};
pub use process::{CandidateEvaluator, ExternalEvaluator};
pub use report::{ReportFormat, Reporter};
pub use resource_limits::ReferenceLimits;
pub use runner::{RunOutcome, Runner};
pub use semantic::{ArithmeticOperation, Expression, ExpressionKind};

/// Result type for exprfuzz operations
pub type FuzzResult<T> = Result<T, FuzzError>;

#[cfg(test)]
mod tests;
