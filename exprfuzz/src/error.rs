use crate::ast::Span;
use std::fmt;
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Detailed error information with its location in the expression
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_text: Arc<str>,
}

impl ErrorDetails {
    pub fn new(message: impl Into<String>, span: Span, source_text: Arc<str>) -> Self {
        Self {
            message: message.into(),
            span,
            source_text,
        }
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}:{} in '{}'",
            self.message, self.span.line, self.span.col, self.source_text
        )
    }
}

/// Everything that can abort a differential run
#[derive(Debug, Error)]
pub enum FuzzError {
    /// The reference grammar rejected the expression
    #[error("Parse error: {0}")]
    Parse(Box<ErrorDetails>),

    /// The reference evaluation divided by zero
    #[error("Division by zero: {0}")]
    DivisionByZero(Box<ErrorDetails>),

    /// Input rejected by one of the `ReferenceLimits`
    #[error("Resource limit exceeded: {limit_name} (limit {limit_value}, actual {actual_value})")]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
    },

    /// The system under test could not be started
    #[error("Failed to spawn '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: io::Error,
    },

    /// The system under test did not exit within the configured timeout
    #[error("'{binary}' did not exit within {timeout_ms}ms for expression {expression}")]
    Timeout {
        binary: String,
        timeout_ms: u128,
        expression: String,
    },

    /// The system under test printed something that is not a number
    #[error("Candidate output {output:?} for expression {expression} is not a number")]
    CandidateNotNumeric { expression: String, output: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize report record: {0}")]
    Report(#[from] serde_json::Error),
}

impl FuzzError {
    pub fn parse(message: impl Into<String>, span: Span, source_text: Arc<str>) -> Self {
        Self::Parse(Box::new(ErrorDetails::new(message, span, source_text)))
    }

    pub fn division_by_zero(span: Span, source_text: Arc<str>) -> Self {
        Self::DivisionByZero(Box::new(ErrorDetails::new(
            "divisor evaluates to zero",
            span,
            source_text,
        )))
    }

    /// Source location details, for errors that point into an expression
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            FuzzError::Parse(details) | FuzzError::DivisionByZero(details) => Some(details),
            _ => None,
        }
    }
}
