//! Literal classification and value behavior.

use threadcell::foundation::{Type, Value};

#[test]
fn floats_need_a_leading_digit() {
    assert_eq!(Value::parse_literal("3.5"), Some(Value::Float(3.5)));
    assert_eq!(Value::parse_literal("-1e3"), Some(Value::Float(-1000.0)));
    assert_eq!(Value::parse_literal(".5"), Some(Value::Float(0.5)));
    assert_eq!(Value::parse_literal("inf"), None);
    assert_eq!(Value::parse_literal("nan"), None);
    assert_eq!(Value::parse_literal("e10"), None);
}

#[test]
fn character_and_string_literals() {
    assert_eq!(Value::parse_literal("'x'"), Some(Value::Char('x')));
    assert_eq!(Value::parse_literal("'xy'"), None);
    assert_eq!(Value::parse_literal("\"hello\""), Some(Value::from("hello")));
    assert_eq!(Value::parse_literal("\"\""), Some(Value::from("")));
    assert_eq!(Value::parse_literal("\""), None);
}

#[test]
fn unknown_tokens_are_not_literals() {
    assert_eq!(Value::parse_literal("FROB"), None);
    assert_eq!(Value::parse_literal("'"), None);
}

#[test]
fn truthiness_follows_numeric_zero() {
    assert!(!Value::Int(0).is_truthy());
    assert!(!Value::Float(0.0).is_truthy());
    assert!(Value::Int(-1).is_truthy());
    assert!(Value::Char('\0').is_truthy());
    assert!(Value::from("").is_truthy());
}

#[test]
fn flags() {
    assert_eq!(Value::flag(true), Value::Int(-1));
    assert_eq!(Value::flag(false), Value::Int(0));
}

#[test]
fn types_name_themselves() {
    assert_eq!(Value::Int(1).value_type(), Type::Int);
    assert_eq!(Value::from("s").value_type().to_string(), "string");
    assert_eq!(Type::Number.to_string(), "number");
}
