//! The numeric tower and radix-aware integer parsing.
//!
//! Arithmetic words lift both operands into [`Number`] and promote them to
//! the higher [`Rank`] before operating.

#![allow(clippy::cast_precision_loss)]

use std::cmp::Ordering;

use crate::error::{Error, ErrorKind};
use crate::types::Type;
use crate::value::Value;
use crate::Result;

/// Lowest radix accepted by [`parse_number`] and [`format_number`].
pub const MIN_BASE: u32 = 2;
/// Highest radix accepted by [`parse_number`] and [`format_number`].
pub const MAX_BASE: u32 = 36;

/// A member of the closed numeric tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
}

/// Promotion rank. Mixed operands are lifted to the higher rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    /// Integers.
    Int,
    /// Floats.
    Float,
}

impl Number {
    /// Returns this number's rank.
    #[must_use]
    pub const fn rank(self) -> Rank {
        match self {
            Self::Int(_) => Rank::Int,
            Self::Float(_) => Rank::Float,
        }
    }

    /// Lifts this number to `rank`. Never lowers.
    #[must_use]
    pub fn lift(self, rank: Rank) -> Self {
        match (self, rank) {
            (Self::Int(n), Rank::Float) => Self::Float(n as f64),
            (n, _) => n,
        }
    }

    /// Extracts a number from a value, failing with a type mismatch.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the value is not numeric.
    pub fn from_value(value: &Value) -> Result<Self> {
        value
            .as_number()
            .ok_or_else(|| Error::type_mismatch(Type::Number, value.value_type()))
    }

    /// Adds two numbers. Integer addition wraps.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        match promote(self, other) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a.wrapping_add(b)),
            (a, b) => Self::Float(a.to_f64() + b.to_f64()),
        }
    }

    /// Subtracts `other` from `self`. Integer subtraction wraps.
    #[must_use]
    pub fn minus(self, other: Self) -> Self {
        match promote(self, other) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a.wrapping_sub(b)),
            (a, b) => Self::Float(a.to_f64() - b.to_f64()),
        }
    }

    /// Multiplies two numbers. Integer multiplication wraps.
    #[must_use]
    pub fn times(self, other: Self) -> Self {
        match promote(self, other) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a.wrapping_mul(b)),
            (a, b) => Self::Float(a.to_f64() * b.to_f64()),
        }
    }

    /// Divides `self` by `other`. Integer division truncates toward zero.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if `other` is zero.
    pub fn divide(self, other: Self) -> Result<Self> {
        if other.is_zero() {
            return Err(Error::new(ErrorKind::DivisionByZero));
        }
        Ok(match promote(self, other) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a.wrapping_div(b)),
            (a, b) => Self::Float(a.to_f64() / b.to_f64()),
        })
    }

    /// Remainder of `self` divided by `other`, with the sign of `self`.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if `other` is zero.
    pub fn remainder(self, other: Self) -> Result<Self> {
        if other.is_zero() {
            return Err(Error::new(ErrorKind::DivisionByZero));
        }
        Ok(match promote(self, other) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a.wrapping_rem(b)),
            (a, b) => Self::Float(a.to_f64() % b.to_f64()),
        })
    }

    /// Negates this number.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::Int(n) => Self::Int(n.wrapping_neg()),
            Self::Float(n) => Self::Float(-n),
        }
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        match self {
            Self::Int(n) => Self::Int(n.wrapping_abs()),
            Self::Float(n) => Self::Float(n.abs()),
        }
    }

    /// Compares two numbers after promotion. `None` if either is NaN.
    #[must_use]
    pub fn compare(self, other: Self) -> Option<Ordering> {
        match promote(self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.to_f64().partial_cmp(&b.to_f64()),
        }
    }

    /// Returns true if this number is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(n) => n == 0,
            Self::Float(n) => n == 0.0,
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Float(n) => n,
        }
    }
}

/// Lifts both operands to the higher of their two ranks.
#[must_use]
pub fn promote(a: Number, b: Number) -> (Number, Number) {
    let rank = a.rank().max(b.rank());
    (a.lift(rank), b.lift(rank))
}

/// Parses a signed integer token in the given radix.
///
/// A leading `$`, `#` or `%` selects hex, decimal or binary regardless of
/// `base`. Returns `None` if the token is not an integer in that radix, if it
/// does not fit in an `i64`, or if `base` is outside `2..=36`.
#[must_use]
pub fn parse_number(token: &str, base: u32) -> Option<i64> {
    let (negative, rest) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };
    let (radix, digits) = match rest.as_bytes().first()? {
        b'$' => (16, &rest[1..]),
        b'#' => (10, &rest[1..]),
        b'%' => (2, &rest[1..]),
        _ => (base, rest),
    };
    if !(MIN_BASE..=MAX_BASE).contains(&radix) || digits.is_empty() {
        return None;
    }

    // Negative tokens accumulate downward so that i64::MIN parses.
    let mut acc: i64 = 0;
    for c in digits.chars() {
        let digit = i64::from(c.to_digit(radix)?);
        let shifted = acc.checked_mul(i64::from(radix))?;
        acc = if negative {
            shifted.checked_sub(digit)?
        } else {
            shifted.checked_add(digit)?
        };
    }
    Some(acc)
}

/// Formats a signed integer in the given radix with upper-case digits.
///
/// Radixes outside `2..=36` fall back to decimal.
#[must_use]
pub fn format_number(n: i64, base: u32) -> String {
    let radix = if (MIN_BASE..=MAX_BASE).contains(&base) {
        base
    } else {
        10
    };
    if radix == 10 {
        return n.to_string();
    }

    let mut magnitude = n.unsigned_abs();
    if magnitude == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while magnitude > 0 {
        let digit = u32::try_from(magnitude % u64::from(radix)).unwrap_or(0);
        digits.push(char::from_digit(digit, radix).map_or('?', |c| c.to_ascii_uppercase()));
        magnitude /= u64::from(radix);
    }
    if n < 0 {
        digits.push('-');
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn promotion_lifts_to_float() {
        let (a, b) = promote(Number::Int(2), Number::Float(0.5));
        assert_eq!(a, Number::Float(2.0));
        assert_eq!(b, Number::Float(0.5));
    }

    #[test]
    fn integer_arithmetic_stays_integer() {
        assert_eq!(Number::Int(7).plus(Number::Int(5)), Number::Int(12));
        assert_eq!(Number::Int(7).divide(Number::Int(2)).unwrap(), Number::Int(3));
        assert_eq!(Number::Int(-7).remainder(Number::Int(2)).unwrap(), Number::Int(-1));
    }

    #[test]
    fn mixed_arithmetic_promotes() {
        assert_eq!(Number::Int(1).plus(Number::Float(0.5)), Number::Float(1.5));
        assert_eq!(Number::Float(3.0).times(Number::Int(2)), Number::Float(6.0));
    }

    #[test]
    fn division_by_zero_fails() {
        let err = Number::Int(1).divide(Number::Int(0)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DivisionByZero));
        let err = Number::Float(1.0).remainder(Number::Float(0.0)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DivisionByZero));
    }

    #[test]
    fn overflow_wraps() {
        assert_eq!(Number::Int(i64::MAX).plus(Number::Int(1)), Number::Int(i64::MIN));
    }

    #[test]
    fn compare_across_ranks() {
        assert_eq!(
            Number::Int(2).compare(Number::Float(2.5)),
            Some(Ordering::Less)
        );
        assert_eq!(Number::Float(f64::NAN).compare(Number::Int(1)), None);
    }

    #[test]
    fn parse_decimal() {
        assert_eq!(parse_number("42", 10), Some(42));
        assert_eq!(parse_number("-17", 10), Some(-17));
        assert_eq!(parse_number("+3", 10), Some(3));
    }

    #[test]
    fn parse_respects_base() {
        assert_eq!(parse_number("ff", 16), Some(255));
        assert_eq!(parse_number("FF", 16), Some(255));
        assert_eq!(parse_number("ff", 10), None);
        assert_eq!(parse_number("101", 2), Some(5));
        assert_eq!(parse_number("2", 2), None);
    }

    #[test]
    fn parse_prefixes_override_base() {
        assert_eq!(parse_number("$ff", 10), Some(255));
        assert_eq!(parse_number("#10", 16), Some(10));
        assert_eq!(parse_number("%101", 10), Some(5));
        assert_eq!(parse_number("-$10", 10), Some(-16));
    }

    #[test]
    fn parse_rejects_junk() {
        assert_eq!(parse_number("", 10), None);
        assert_eq!(parse_number("-", 10), None);
        assert_eq!(parse_number("$", 10), None);
        assert_eq!(parse_number("12a", 10), None);
        assert_eq!(parse_number("10", 1), None);
        assert_eq!(parse_number("10", 37), None);
    }

    #[test]
    fn parse_rejects_out_of_range() {
        assert_eq!(parse_number("9223372036854775807", 10), Some(i64::MAX));
        assert_eq!(parse_number("-9223372036854775808", 10), Some(i64::MIN));
        assert_eq!(parse_number("9223372036854775808", 10), None);
        assert_eq!(parse_number("-9223372036854775809", 10), None);
        assert_eq!(parse_number("99999999999999999999", 10), None);
        assert_eq!(parse_number("$10000000000000000", 10), None);
    }

    #[test]
    fn format_in_bases() {
        assert_eq!(format_number(255, 16), "FF");
        assert_eq!(format_number(-255, 16), "-FF");
        assert_eq!(format_number(5, 2), "101");
        assert_eq!(format_number(0, 16), "0");
        assert_eq!(format_number(i64::MIN, 16), "-8000000000000000");
        assert_eq!(format_number(12, 99), "12");
    }

    proptest! {
        #[test]
        fn formatted_numbers_parse_back(n in any::<i64>(), base in 2u32..=36) {
            prop_assert_eq!(parse_number(&format_number(n, base), base), Some(n));
        }

        #[test]
        fn tokens_beyond_i64_do_not_parse(excess in 1i128..=i128::from(u64::MAX), negative: bool) {
            let n = if negative {
                i128::from(i64::MIN) - excess
            } else {
                i128::from(i64::MAX) + excess
            };
            prop_assert_eq!(parse_number(&n.to_string(), 10), None);
        }
    }
}
