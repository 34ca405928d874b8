//! Arithmetic on reference numbers
//!
//! Integer operands stay exact for `+ - *`; anything involving a float is
//! carried out in `f64`. Division always yields an `f64`, rounded once.

use crate::number::Number;
use crate::semantic::ArithmeticOperation;

/// Perform an arithmetic operation.
///
/// Returns `None` when dividing by zero (integer or float).
///
/// # Examples
/// ```text
/// 5 + 3     = 8
/// 7 / 2     = 3.5
/// 6 / 3     = 2.0
/// 1.5 * 2   = 3.0
/// 1 / 0     -> None
/// ```
pub fn arithmetic_operation(
    left: Number,
    op: &ArithmeticOperation,
    right: Number,
) -> Option<Number> {
    match op {
        ArithmeticOperation::Divide => {
            if right.is_zero() {
                return None;
            }
            match (left, right) {
                (Number::Integer(l), Number::Integer(r)) => {
                    Some(Number::Float(integer_division(l, r)))
                }
                _ => Some(Number::Float(left.to_f64() / right.to_f64())),
            }
        }
        _ => match (left, right) {
            (Number::Integer(l), Number::Integer(r)) => Some(
                integer_arithmetic(l, op, r)
                    .map(Number::Integer)
                    .unwrap_or_else(|| Number::Float(float_arithmetic(l as f64, op, r as f64))),
            ),
            _ => Some(Number::Float(float_arithmetic(
                left.to_f64(),
                op,
                right.to_f64(),
            ))),
        },
    }
}

/// Largest magnitude every integer below which converts to `f64` exactly
const EXACT_F64_INTEGER: u128 = 1 << 53;

/// Bits kept in the scaled quotient: 53 for the mantissa, a round bit and a
/// sticky bit.
const QUOTIENT_BITS: u32 = 55;

/// Correctly rounded `l / r` for a nonzero `r`.
///
/// Converting both operands to `f64` first rounds twice once either of them
/// is above 2^53, so large operands go through long division instead.
fn integer_division(l: i128, r: i128) -> f64 {
    let (a, b) = (l.unsigned_abs(), r.unsigned_abs());
    if a <= EXACT_F64_INTEGER && b <= EXACT_F64_INTEGER {
        return l as f64 / r as f64;
    }

    let mut quotient = a / b;
    let mut remainder = a % b;
    let mut shift = 0i32;
    while quotient < 1 << (QUOTIENT_BITS - 1) {
        // remainder < b <= 2^127, so doubling it cannot overflow
        remainder <<= 1;
        quotient <<= 1;
        if remainder >= b {
            remainder -= b;
            quotient |= 1;
        }
        shift += 1;
    }
    if remainder != 0 {
        quotient |= 1;
    }

    // u128 -> f64 rounds to nearest even; scaling by a power of two is exact.
    let magnitude = quotient as f64 * 2f64.powi(-shift);
    if (l < 0) != (r < 0) {
        -magnitude
    } else {
        magnitude
    }
}

/// Exact integer arithmetic; `None` on overflow
fn integer_arithmetic(l: i128, op: &ArithmeticOperation, r: i128) -> Option<i128> {
    match op {
        ArithmeticOperation::Add => l.checked_add(r),
        ArithmeticOperation::Subtract => l.checked_sub(r),
        ArithmeticOperation::Multiply => l.checked_mul(r),
        ArithmeticOperation::Divide => None,
    }
}

fn float_arithmetic(l: f64, op: &ArithmeticOperation, r: f64) -> f64 {
    match op {
        ArithmeticOperation::Add => l + r,
        ArithmeticOperation::Subtract => l - r,
        ArithmeticOperation::Multiply => l * r,
        ArithmeticOperation::Divide => l / r,
    }
}
