//! Token classification and the interpret/compile duality.

use threadcell::engine::{Mode, StringInput, Token, Variable, classify};
use threadcell::foundation::{ErrorKind, Value};
use threadcell::storage::Cell;

use crate::{address_of, ints, machine};

#[test]
fn compile_mode_appends_a_thread_ref() {
    let (mut m, _) = machine();
    let foo = address_of(&m, "FOO");
    let here = m.here().unwrap();

    m.set_mode(Mode::Compile);
    m.set_input(StringInput::new("FOO"));
    m.set_ip(m.kernel().unwrap().interpret);
    m.step().unwrap();

    assert_eq!(m.memory().get(here), &Cell::ThreadRef(foo));
    assert_eq!(m.here().unwrap(), here + 1);
    assert!(m.params().is_empty());
}

#[test]
fn interpret_mode_pushes_numbers() {
    let (mut m, _) = machine();
    let here = m.here().unwrap();

    m.set_input(StringInput::new("42"));
    m.set_ip(m.kernel().unwrap().interpret);
    m.step().unwrap();

    assert_eq!(ints(&m), vec![42]);
    assert_eq!(m.here().unwrap(), here);
}

#[test]
fn compile_mode_inlines_literals() {
    let (mut m, _) = machine();
    let lit = m.kernel().unwrap().lit;
    let here = m.here().unwrap();

    m.set_mode(Mode::Compile);
    m.set_input(StringInput::new("'z'"));
    m.set_ip(m.kernel().unwrap().interpret);
    m.step().unwrap();

    assert_eq!(m.memory().get(here), &Cell::ThreadRef(lit));
    assert_eq!(m.memory().get(here + 1), &Cell::Literal(Value::Char('z')));
    assert_eq!(m.here().unwrap(), here + 2);
}

#[test]
fn classification_order() {
    let (mut m, _) = machine();
    assert!(matches!(classify(&m, "FOO").unwrap(), Token::Word(e) if e.name.as_ref() == "FOO"));
    assert_eq!(classify(&m, "-17").unwrap(), Token::Literal(Value::Int(-17)));
    assert_eq!(classify(&m, "2.5").unwrap(), Token::Literal(Value::Float(2.5)));
    assert_eq!(
        classify(&m, "\"hi\"").unwrap(),
        Token::Literal(Value::from("hi"))
    );
    assert!(matches!(
        classify(&m, "FROB").unwrap_err().kind,
        ErrorKind::InvalidInput(ref t) if t == "FROB"
    ));

    m.set_variable(Variable::Base, 16);
    assert_eq!(classify(&m, "ff").unwrap(), Token::Literal(Value::Int(255)));
}

#[test]
fn words_shadow_numbers() {
    let (mut m, _) = machine();
    m.run_source(": 7 FOO ; 7").unwrap();
    assert_eq!(ints(&m), vec![42]);
}

#[test]
fn immediate_words_run_while_compiling() {
    let (mut m, _) = machine();
    m.run_source(": NOW FOO ; IMMEDIATE : LATER NOW ; LATER").unwrap();
    assert!(m.recovered_errors().is_empty());
    assert_eq!(ints(&m), vec![42]);
}

#[test]
fn hidden_definition_is_invisible_until_closed() {
    let (mut m, _) = machine();
    m.run_source(": FOO FOO FOO ; FOO").unwrap();
    assert!(m.recovered_errors().is_empty());
    assert_eq!(ints(&m), vec![42, 42]);
}

#[test]
fn bad_base_is_reported() {
    let (mut m, _) = machine();
    m.run_source("99 BASE ! 1").unwrap();
    assert_eq!(m.recovered_errors()[0].kind, ErrorKind::InvalidBase(99));
}
