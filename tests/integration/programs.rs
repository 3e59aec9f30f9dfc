//! Whole programs written against the standard library.

use threadcell::foundation::{ErrorKind, Value};

use crate::session;

#[test]
fn factorial_by_recursion() {
    let mut s = session();
    s.eval(": FACT DUP 1 > IF DUP 1- RECURSE * THEN ;").unwrap();
    assert_eq!(s.eval("10 FACT .").unwrap(), "3628800 ");
}

#[test]
fn countdown_with_begin_until() {
    let mut s = session();
    s.eval(": DOWN BEGIN DUP . 1- DUP 0= UNTIL DROP ;").unwrap();
    assert_eq!(s.eval("5 DOWN").unwrap(), "5 4 3 2 1 ");
}

#[test]
fn gcd_with_while_loop() {
    let mut s = session();
    s.eval(": GCD BEGIN DUP WHILE TUCK MOD REPEAT DROP ;").unwrap();
    assert_eq!(s.eval("48 18 GCD .").unwrap(), "6 ");
}

#[test]
fn hex_output_follows_base() {
    let mut s = session();
    assert_eq!(s.eval("255 HEX . DECIMAL 255 .").unwrap(), "FF 255 ");
}

#[test]
fn mixed_numeric_tower() {
    let mut s = session();
    assert_eq!(s.eval("1 2.5 + .").unwrap(), "3.5 ");
    assert_eq!(s.eval("7 2 / .").unwrap(), "3 ");
}

#[test]
fn strings_print_through_type() {
    let mut s = session();
    s.eval(": GREET \"hello\" TYPE SPACE ;").unwrap();
    assert_eq!(s.eval("GREET GREET").unwrap(), "hello hello ");
}

#[test]
fn execute_runs_ticked_words() {
    let mut s = session();
    s.eval(": SQ DUP * ;").unwrap();
    assert_eq!(s.eval("6 ' SQ EXECUTE .").unwrap(), "36 ");
}

#[test]
fn failing_line_keeps_the_stack() {
    let mut s = session();
    let err = s.eval("1 2 NOPE 3").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidInput(ref w) if w == "NOPE"));
    let stack: Vec<Value> = s.machine().params().iter().cloned().collect();
    assert_eq!(stack, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn type_errors_name_the_word() {
    let mut s = session();
    let err = s.eval("'a' \"b\" +").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert_eq!(
        err.context.and_then(|c| c.word).as_deref(),
        Some("+")
    );
}

#[test]
fn oversized_counts_are_recoverable_errors() {
    let mut s = session();
    let err = s.eval("9223372036854775807 SPACES").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CountOutOfRange { ref word, .. } if word == "SPACES"));
    let err = s.eval("DROP 9223372036854775807 ALLOT").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CountOutOfRange { ref word, .. } if word == "ALLOT"));
    assert_eq!(s.eval("DROP 2 SPACES 1 .").unwrap(), "  1 ");
}

#[test]
fn integers_beyond_i64_read_as_floats() {
    let mut s = session();
    s.eval("99999999999999999999").unwrap();
    assert_eq!(s.machine().params().iter().last(), Some(&Value::Float(1e20)));
    assert_eq!(s.eval("DROP -9223372036854775808 .").unwrap(), "-9223372036854775808 ");
}

#[test]
fn reusing_an_address_reveals_only_the_new_word() {
    let mut s = session();
    s.eval("HERE @ : OLD 1 ; HIDE OLD HERE @ SWAP - NEGATE ALLOT : NEW 2 ;")
        .unwrap();
    assert_eq!(s.eval("NEW .").unwrap(), "2 ");
    let err = s.eval("OLD").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidInput(ref w) if w == "OLD"));
}
