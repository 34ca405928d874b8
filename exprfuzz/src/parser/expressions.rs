use crate::ast::Span;
use crate::error::FuzzError;
use crate::number::Number;
use crate::parser::Rule;
use crate::semantic::{ArithmeticOperation, Expression, ExpressionKind};
use crate::FuzzResult;
use pest::iterators::{Pair, Pairs};
use std::sync::Arc;

fn malformed(message: &str, pair: &Pair<Rule>, source: &Arc<str>) -> FuzzError {
    FuzzError::parse(
        format!("{}: '{}'", message, pair.as_str()),
        Span::from_pest_span(pair.as_span()),
        source.clone(),
    )
}

pub(crate) fn parse_sum(pair: Pair<Rule>, source: &Arc<str>) -> FuzzResult<Expression> {
    // sum = { product ~ (additive_op ~ product)* }
    parse_left_associative(pair, source, parse_product)
}

fn parse_product(pair: Pair<Rule>, source: &Arc<str>) -> FuzzResult<Expression> {
    // product = { unary ~ (multiplicative_op ~ unary)* }
    parse_left_associative(pair, source, parse_unary)
}

/// Folds `operand (op operand)*` into a left-leaning tree
fn parse_left_associative(
    pair: Pair<Rule>,
    source: &Arc<str>,
    parse_operand: fn(Pair<Rule>, &Arc<str>) -> FuzzResult<Expression>,
) -> FuzzResult<Expression> {
    let outer = pair.clone();
    let mut inner: Pairs<Rule> = pair.into_inner();

    let first = inner
        .next()
        .ok_or_else(|| malformed("Missing operand", &outer, source))?;
    let mut left = parse_operand(first, source)?;

    while let Some(op_pair) = inner.next() {
        let op = ArithmeticOperation::from_symbol(op_pair.as_str())
            .ok_or_else(|| malformed("Unknown operator", &op_pair, source))?;
        let right_pair = inner
            .next()
            .ok_or_else(|| malformed("Operator without right operand", &op_pair, source))?;
        let right = parse_operand(right_pair, source)?;

        let span = left.span.to(&right.span);
        left = Expression::new(
            ExpressionKind::Arithmetic(Box::new(left), op, Box::new(right)),
            span,
        );
    }

    Ok(left)
}

fn parse_unary(pair: Pair<Rule>, source: &Arc<str>) -> FuzzResult<Expression> {
    // unary = { sign* ~ primary }
    let span = Span::from_pest_span(pair.as_span());
    let outer = pair.clone();

    let mut negations = 0usize;
    let mut primary = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::sign => {
                if inner.as_str() == "-" {
                    negations += 1;
                }
            }
            Rule::primary => primary = Some(parse_primary(inner, source)?),
            _ => return Err(malformed("Unexpected token in operand", &inner, source)),
        }
    }

    let mut expression = primary.ok_or_else(|| malformed("Missing operand", &outer, source))?;

    // A negated literal folds into the literal itself, so `-5` is the number -5.
    for _ in 0..negations {
        let literal = match expression.kind {
            ExpressionKind::Literal(value) => Some(value),
            _ => None,
        };
        expression = match literal {
            Some(value) => Expression::new(ExpressionKind::Literal(value.negate()), span),
            None => Expression::new(ExpressionKind::Negation(Box::new(expression)), span),
        };
    }

    Ok(expression)
}

fn parse_primary(pair: Pair<Rule>, source: &Arc<str>) -> FuzzResult<Expression> {
    // primary = { number | "(" ~ sum ~ ")" }
    let outer = pair.clone();
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| malformed("Empty operand", &outer, source))?;

    match inner.as_rule() {
        Rule::number => parse_number(inner, source),
        Rule::sum => {
            // The group's span includes its parentheses.
            let mut group = parse_sum(inner, source)?;
            group.span = Span::from_pest_span(outer.as_span());
            Ok(group)
        }
        _ => Err(malformed("Unexpected operand", &inner, source)),
    }
}

fn parse_number(pair: Pair<Rule>, source: &Arc<str>) -> FuzzResult<Expression> {
    let text = pair.as_str();
    let span = Span::from_pest_span(pair.as_span());

    let value = if text.contains('.') {
        text.parse::<f64>()
            .map(Number::Float)
            .map_err(|_| malformed("Invalid number", &pair, source))?
    } else {
        match text.parse::<i128>() {
            Ok(n) => Number::Integer(n),
            // Too large for an exact integer; keep going as a float.
            Err(_) => text
                .parse::<f64>()
                .map(Number::Float)
                .map_err(|_| malformed("Invalid number", &pair, source))?,
        }
    };

    Ok(Expression::new(ExpressionKind::Literal(value), span))
}
