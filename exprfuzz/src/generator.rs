//! Random expression generation
//!
//! Expressions are built token by token: every position may open a group, always
//! emits a non-zero operand, may close a group, and is followed by an operator.
//! The trailing operator is dropped and groups still open are closed at the end,
//! so the output is always well formed even though late closing parentheses may
//! group operands unrelated to where the group was opened.

use crate::semantic::ArithmeticOperation;
use rand::Rng;
use std::fmt;

/// Knobs for the generator; the defaults reproduce the classic fuzz run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Fewest operands in one expression
    pub min_operands: usize,
    /// Most operands in one expression
    pub max_operands: usize,
    /// Chance of opening a group before each operand. The chance of closing
    /// one after it is this value times the number of open groups.
    pub paren_probability: f64,
    /// Operands are drawn from `[-operand_magnitude, operand_magnitude]` without 0
    pub operand_magnitude: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_operands: 3,
            max_operands: 9,
            paren_probability: 0.2,
            operand_magnitude: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    OpenParen,
    CloseParen,
    Operand(i64),
    Operator(ArithmeticOperation),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::Operand(n) => write!(f, "{}", n),
            Token::Operator(op) => write!(f, " {} ", op),
        }
    }
}

/// One generated expression, kept as tokens and rendered on demand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedExpression {
    tokens: Vec<Token>,
}

impl GeneratedExpression {
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn operand_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|token| matches!(token, Token::Operand(_)))
            .count()
    }
}

impl fmt::Display for GeneratedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// Draws expressions from a borrowed random number generator
///
/// The generator never owns randomness; whoever drives the run owns the RNG and
/// lends it out, so a seed fully determines the sequence of expressions.
pub struct ExpressionGenerator<'a, R: Rng> {
    rng: &'a mut R,
    config: &'a GeneratorConfig,
}

impl<'a, R: Rng> ExpressionGenerator<'a, R> {
    pub fn new(rng: &'a mut R, config: &'a GeneratorConfig) -> Self {
        Self { rng, config }
    }

    pub fn generate(&mut self) -> GeneratedExpression {
        let length = self
            .rng
            .random_range(self.config.min_operands..=self.config.max_operands);
        let p_paren = self.config.paren_probability;

        let mut tokens = Vec::with_capacity(length * 4);
        let mut open_groups = 0usize;

        for _ in 0..length {
            if self.rng.random::<f64>() < p_paren {
                tokens.push(Token::OpenParen);
                open_groups += 1;
            }

            tokens.push(Token::Operand(self.operand()));

            if self.rng.random::<f64>() < p_paren * open_groups as f64 {
                tokens.push(Token::CloseParen);
                open_groups -= 1;
            }

            let index = self.rng.random_range(0..ArithmeticOperation::ALL.len());
            tokens.push(Token::Operator(ArithmeticOperation::ALL[index]));
        }

        tokens.pop();
        tokens.extend(std::iter::repeat(Token::CloseParen).take(open_groups));

        GeneratedExpression { tokens }
    }

    fn operand(&mut self) -> i64 {
        let magnitude = self.config.operand_magnitude.max(1);
        loop {
            let n = self.rng.random_range(-magnitude..=magnitude);
            if n != 0 {
                return n;
            }
        }
    }
}

impl<R: Rng> Iterator for ExpressionGenerator<'_, R> {
    type Item = GeneratedExpression;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }
}
