//! Numeric values produced by the reference evaluator
//!
//! Integers stay exact until they are divided or overflow; division always
//! yields a float. This is the numeric model the checked binaries are compared
//! against.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i128),
    Float(f64),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Integer(n) => n as f64,
            Number::Float(x) => x,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Integer(n) => n == 0,
            Number::Float(x) => x == 0.0,
        }
    }

    pub fn negate(self) -> Number {
        match self {
            Number::Integer(n) => n
                .checked_neg()
                .map(Number::Integer)
                .unwrap_or(Number::Float(-(n as f64))),
            Number::Float(x) => Number::Float(-x),
        }
    }
}

/// Integers print without a fraction, floats in their shortest round-trip
/// form with at least one fractional digit (`-1.0`, `0.5`).
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}
