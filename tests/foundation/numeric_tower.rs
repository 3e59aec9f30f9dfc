//! Numeric tower promotion and radix handling.

use proptest::prelude::*;
use threadcell::foundation::{ErrorKind, Number, Rank, format_number, parse_number, promote};

#[test]
fn promotion_lifts_to_the_higher_rank() {
    let (a, b) = promote(Number::Int(2), Number::Float(0.5));
    assert_eq!(a, Number::Float(2.0));
    assert_eq!(b, Number::Float(0.5));
    assert_eq!(a.rank(), Rank::Float);

    let (a, b) = promote(Number::Int(2), Number::Int(3));
    assert_eq!((a, b), (Number::Int(2), Number::Int(3)));
}

#[test]
fn integer_arithmetic_wraps() {
    assert_eq!(Number::Int(i64::MAX).plus(Number::Int(1)), Number::Int(i64::MIN));
    assert_eq!(Number::Int(i64::MIN).negate(), Number::Int(i64::MIN));
}

#[test]
fn division_by_zero_fails_for_both_ranks() {
    let err = Number::Int(1).divide(Number::Int(0)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::DivisionByZero);
    let err = Number::Float(1.0).remainder(Number::Float(0.0)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::DivisionByZero);
}

#[test]
fn prefixes_override_base() {
    assert_eq!(parse_number("$FF", 10), Some(255));
    assert_eq!(parse_number("#99", 16), Some(99));
    assert_eq!(parse_number("%101", 10), Some(5));
    assert_eq!(parse_number("-$10", 10), Some(-16));
}

#[test]
fn digits_must_fit_the_base() {
    assert_eq!(parse_number("19", 8), None);
    assert_eq!(parse_number("zz", 36), Some(35 * 36 + 35));
    assert_eq!(parse_number("10", 1), None);
    assert_eq!(parse_number("-", 10), None);
    assert_eq!(parse_number("", 10), None);
}

#[test]
fn formatting_uses_upper_case_digits() {
    assert_eq!(format_number(255, 16), "FF");
    assert_eq!(format_number(-5, 2), "-101");
    assert_eq!(format_number(0, 7), "0");
    assert_eq!(format_number(42, 99), "42");
    assert_eq!(format_number(i64::MIN, 16), "-8000000000000000");
}

proptest! {
    #[test]
    fn format_then_parse_in_any_base(n in any::<i64>(), base in 2u32..=36) {
        prop_assert_eq!(parse_number(&format_number(n, base), base), Some(n));
    }
}
