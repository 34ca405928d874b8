//! Reference evaluation
//!
//! The trusted side of every comparison. Walks the tree built by the parser
//! using standard precedence and true division.

pub mod operations;

use crate::error::FuzzError;
use crate::number::Number;
use crate::parser::{self, ParsedExpression};
use crate::resource_limits::ReferenceLimits;
use crate::semantic::{Expression, ExpressionKind};
use crate::FuzzResult;
use std::sync::Arc;

/// Parse and evaluate `content` in one step
pub fn evaluate_str(content: &str, limits: &ReferenceLimits) -> FuzzResult<Number> {
    let parsed = parser::parse(content, limits)?;
    evaluate(&parsed)
}

/// Evaluate an already parsed expression
pub fn evaluate(parsed: &ParsedExpression) -> FuzzResult<Number> {
    evaluate_expression(&parsed.root, &parsed.source)
}

fn evaluate_expression(expression: &Expression, source: &Arc<str>) -> FuzzResult<Number> {
    match &expression.kind {
        ExpressionKind::Literal(value) => Ok(*value),
        ExpressionKind::Negation(inner) => Ok(evaluate_expression(inner, source)?.negate()),
        ExpressionKind::Arithmetic(left, op, right) => {
            let l = evaluate_expression(left, source)?;
            let r = evaluate_expression(right, source)?;
            operations::arithmetic_operation(l, op, r)
                .ok_or_else(|| FuzzError::division_by_zero(right.span, source.clone()))
        }
    }
}
