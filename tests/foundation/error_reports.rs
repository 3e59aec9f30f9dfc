//! Error display and context.

use threadcell::foundation::{Error, ErrorContext, ErrorKind, StackKind, Type};

#[test]
fn kinds_render_readable_messages() {
    assert_eq!(
        Error::stack_underflow(StackKind::Return).to_string(),
        "return stack underflow"
    );
    assert_eq!(Error::unknown_cell(7).to_string(), "unknown cell at address 7");
    assert_eq!(Error::invalid_input("FROB").to_string(), "undefined word: FROB");
    assert_eq!(
        Error::type_mismatch(Type::Int, Type::String).to_string(),
        "type mismatch: expected int, got string"
    );
    assert_eq!(
        Error::invalid_stack_pointer(StackKind::Parameter, 5, 2).to_string(),
        "invalid parameter stack pointer: 5 (depth 2)"
    );
}

#[test]
fn context_lists_callers_innermost_first() {
    let context = ErrorContext::new()
        .with_word("@")
        .with_address(12)
        .with_frame("INNER")
        .with_frame("OUTER");
    assert_eq!(
        context.to_string(),
        "in @ at 12\n  called from INNER\n  called from OUTER"
    );
}

#[test]
fn context_does_not_change_the_kind() {
    let err = Error::new(ErrorKind::UnbalancedReturn).with_context(ErrorContext::new().with_word("EXIT"));
    assert_eq!(err.kind, ErrorKind::UnbalancedReturn);
    assert_eq!(err.context.and_then(|c| c.word).as_deref(), Some("EXIT"));
}
