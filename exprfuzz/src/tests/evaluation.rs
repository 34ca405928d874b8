use crate::evaluator::operations::arithmetic_operation;
use crate::evaluator::{evaluate, evaluate_str};
use crate::parser::parse;
use crate::semantic::ArithmeticOperation;
use crate::{FuzzError, Number, ReferenceLimits};

fn eval(expr: &str) -> Number {
    evaluate_str(expr, &ReferenceLimits::default())
        .unwrap_or_else(|e| panic!("Failed to evaluate {}: {}", expr, e))
}

#[test]
fn test_precedence_scenario() {
    let value = eval("5 + 3 * 2");
    assert_eq!(value, Number::Integer(11));
    assert_eq!(value.to_f64(), 11.0);
    assert_eq!(value.to_string(), "11");
}

#[test]
fn test_grouped_division_scenario() {
    let value = eval("(2 - 7) / 5");
    assert_eq!(value, Number::Float(-1.0));
    assert_eq!(value.to_string(), "-1.0");
}

#[test]
fn test_true_division() {
    assert_eq!(eval("7 / 2"), Number::Float(3.5));
    assert_eq!(eval("6 / 3"), Number::Float(2.0));
    assert_eq!(eval("100 / 10 / 5"), Number::Float(2.0));
    assert_eq!(eval("1 / 3").to_string(), "0.3333333333333333");
}

#[test]
fn test_integer_arithmetic_stays_exact() {
    assert_eq!(eval("10 - 4 - 3"), Number::Integer(3));
    assert_eq!(eval("3 - -5"), Number::Integer(8));
    assert_eq!(eval("-5 * (3 + -8)"), Number::Integer(25));
    assert_eq!(
        eval("100 * 100 * 100 * 100 * 100 * 100 * 100 * 100 * 100"),
        Number::Integer(1_000_000_000_000_000_000)
    );
}

#[test]
fn test_float_contaminates() {
    assert_eq!(eval("2 * 3 - 4 / 2"), Number::Float(4.0));
    assert_eq!(eval("1.5 * 2"), Number::Float(3.0));
    assert_eq!(eval("-(1 / 4)"), Number::Float(-0.25));
}

#[test]
fn test_division_by_zero() {
    let err = evaluate_str("1 / (3 - 3)", &ReferenceLimits::default()).unwrap_err();
    match err {
        FuzzError::DivisionByZero(details) => {
            assert_eq!(&details.source_text[details.span.start..details.span.end], "(3 - 3)");
        }
        other => panic!("Expected division by zero, got {:?}", other),
    }

    assert!(matches!(
        evaluate_str("2 / (0.5 - 0.5)", &ReferenceLimits::default()),
        Err(FuzzError::DivisionByZero(_))
    ));
}

#[test]
fn test_multiplying_by_zero_is_fine() {
    assert_eq!(eval("5 * (3 - 3)"), Number::Integer(0));
}

#[test]
fn test_evaluation_is_repeatable() {
    let parsed = parse("(-17 / 3 + 4) * 9 - 2", &ReferenceLimits::default()).unwrap();
    let first = evaluate(&parsed).unwrap();
    let second = evaluate(&parsed).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_integer_overflow_promotes_to_float() {
    let result = arithmetic_operation(
        Number::Integer(i128::MAX),
        &ArithmeticOperation::Add,
        Number::Integer(1),
    );
    assert!(matches!(result, Some(Number::Float(_))));
}

#[test]
fn test_operation_division_by_zero() {
    assert_eq!(
        arithmetic_operation(
            Number::Integer(1),
            &ArithmeticOperation::Divide,
            Number::Float(0.0)
        ),
        None
    );
}

#[test]
fn test_division_of_large_integers_is_correctly_rounded() {
    // 99^8 is above 2^53; converting it before dividing would give ...066.5
    let value = eval("99 * 99 * 99 * 99 * 99 * 99 * 99 * 99 / 3");
    assert_eq!(value, Number::Float(3075815648093067.0));
    assert_eq!(value.to_string(), "3075815648093067.0");

    let value = eval("-99 * 99 * 99 * 99 * 99 * 99 * 99 * 99 / 3");
    assert_eq!(value, Number::Float(-3075815648093067.0));
}

#[test]
fn test_large_integer_division_rounds_half_to_even() {
    let divide = |l: i128, r: i128| {
        arithmetic_operation(
            Number::Integer(l),
            &ArithmeticOperation::Divide,
            Number::Integer(r),
        )
    };
    let two_53: i128 = 1 << 53;

    assert_eq!(divide(two_53 + 1, 1), Some(Number::Float(9007199254740992.0)));
    assert_eq!(divide(two_53 + 3, 1), Some(Number::Float(9007199254740996.0)));
    assert_eq!(divide(two_53 + 1, -1), Some(Number::Float(-9007199254740992.0)));
    assert_eq!(divide(1, two_53 * 4), Some(Number::Float(2f64.powi(-55))));
    assert_eq!(divide(i128::MIN, 2), Some(Number::Float(-(2f64.powi(126)))));
}
