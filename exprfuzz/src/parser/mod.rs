use crate::ast::Span;
use crate::error::FuzzError;
use crate::resource_limits::ReferenceLimits;
use crate::semantic::Expression;
use crate::FuzzResult;
use pest::Parser;
use pest_derive::Parser;
use std::sync::Arc;

pub mod expressions;

#[derive(Parser)]
#[grammar = "src/parser/expression.pest"]
pub struct ExpressionParser;

/// A parsed expression together with the text it was parsed from
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpression {
    pub source: Arc<str>,
    pub root: Expression,
}

pub fn parse(content: &str, limits: &ReferenceLimits) -> FuzzResult<ParsedExpression> {
    if content.len() > limits.max_expression_bytes {
        return Err(FuzzError::ResourceLimitExceeded {
            limit_name: "max_expression_bytes".to_string(),
            limit_value: format!("{} bytes", limits.max_expression_bytes),
            actual_value: format!("{} bytes", content.len()),
        });
    }

    // pest descends once per parenthesis, so the depth is checked before parsing.
    let depth = nesting_depth(content);
    if depth > limits.max_expression_depth {
        return Err(FuzzError::ResourceLimitExceeded {
            limit_name: "max_expression_depth".to_string(),
            limit_value: limits.max_expression_depth.to_string(),
            actual_value: depth.to_string(),
        });
    }

    let source: Arc<str> = Arc::from(content);

    match ExpressionParser::parse(Rule::expression, content) {
        Ok(mut pairs) => {
            let expression = pairs.next().ok_or_else(|| {
                FuzzError::parse("Empty parse result", Span::default(), source.clone())
            })?;
            let sum = expression
                .into_inner()
                .find(|pair| pair.as_rule() == Rule::sum)
                .ok_or_else(|| {
                    FuzzError::parse("Missing expression body", Span::default(), source.clone())
                })?;
            let root = expressions::parse_sum(sum, &source)?;
            Ok(ParsedExpression { source, root })
        }
        Err(e) => {
            let (start, end) = match e.location {
                pest::error::InputLocation::Pos(pos) => (pos, pos),
                pest::error::InputLocation::Span((start, end)) => (start, end),
            };
            let (line, col) = match e.line_col {
                pest::error::LineColLocation::Pos(line_col) => line_col,
                pest::error::LineColLocation::Span(start_line_col, _) => start_line_col,
            };

            Err(FuzzError::parse(
                format!("{}", e.variant),
                Span {
                    start,
                    end,
                    line,
                    col,
                },
                source,
            ))
        }
    }
}

/// Deepest parenthesis nesting in `content`, ignoring balance errors
fn nesting_depth(content: &str) -> usize {
    let mut depth: usize = 0;
    let mut max_depth = 0;
    for ch in content.chars() {
        match ch {
            '(' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max_depth
}
