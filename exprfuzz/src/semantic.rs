use crate::ast::Span;
use crate::number::Number;
use std::fmt;

/// A node of a parsed arithmetic expression
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Literal(Number),
    Negation(Box<Expression>),
    Arithmetic(Box<Expression>, ArithmeticOperation, Box<Expression>),
}

/// Binary operators understood by both the generator and the reference evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOperation {
    /// All operators, in the order the generator draws them from
    pub const ALL: [ArithmeticOperation; 4] = [
        ArithmeticOperation::Add,
        ArithmeticOperation::Subtract,
        ArithmeticOperation::Multiply,
        ArithmeticOperation::Divide,
    ];

    pub fn symbol(&self) -> char {
        match self {
            ArithmeticOperation::Add => '+',
            ArithmeticOperation::Subtract => '-',
            ArithmeticOperation::Multiply => '*',
            ArithmeticOperation::Divide => '/',
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(ArithmeticOperation::Add),
            "-" => Some(ArithmeticOperation::Subtract),
            "*" => Some(ArithmeticOperation::Multiply),
            "/" => Some(ArithmeticOperation::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for ArithmeticOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
