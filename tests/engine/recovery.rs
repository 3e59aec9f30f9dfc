//! The run loop: recovery, shutdown, resumption, and snapshots.

use std::cell::Cell as Counter;
use std::rc::Rc;

use threadcell::engine::{Mode, Shutdown, StringInput};
use threadcell::foundation::ErrorKind;

use crate::{ints, machine};

#[test]
fn errors_never_escape_run() {
    let (mut m, _) = machine();
    let reason = m.run_source("DROP FOO\nFROB\nFOO").unwrap();
    assert_eq!(reason, Shutdown::EndOfInput);
    let kinds: Vec<ErrorKind> = m.recovered_errors().iter().map(|e| e.kind.clone()).collect();
    assert!(matches!(kinds[0], ErrorKind::StackUnderflow(_)));
    assert!(matches!(kinds[1], ErrorKind::InvalidInput(_)));
    assert_eq!(ints(&m), vec![42]);
}

#[test]
fn recovery_clears_the_return_stack_and_state() {
    let (mut m, _) = machine();
    m.run_source(": BAD 1 >R DROP ;\nBAD\n: OPEN FOO").unwrap();
    assert!(!m.recovered_errors().is_empty());
    assert!(m.returns().is_empty());
    assert_eq!(m.depth(), 1);

    let (mut m, _) = machine();
    m.run_source(": HALF FROB\nFOO").unwrap();
    assert_eq!(m.mode().unwrap(), Mode::Interpret);
    assert_eq!(ints(&m), vec![42]);
}

#[test]
fn errors_are_written_to_the_output() {
    let (mut m, out) = machine();
    m.config_mut().report_errors = true;
    m.run_source("FROB").unwrap();
    assert_eq!(out.take(), "error: undefined word: FROB\n");
}

#[test]
fn shutdown_hook_runs_once() {
    let (mut m, _) = machine();
    let calls = Rc::new(Counter::new(0));
    let seen = Rc::clone(&calls);
    m.set_shutdown_hook(move |reason| {
        assert_eq!(reason, Shutdown::Bye);
        seen.set(seen.get() + 1);
    });

    assert_eq!(m.run_source("FOO BYE FOO").unwrap(), Shutdown::Bye);
    assert_eq!(m.run_source("FOO").unwrap(), Shutdown::EndOfInput);
    assert_eq!(calls.get(), 1);
}

#[test]
fn run_resumes_with_new_input() {
    let (mut m, _) = machine();
    m.run_source(": TWO FOO").unwrap();
    assert_eq!(m.mode().unwrap(), Mode::Compile);
    m.set_input(StringInput::new("FOO ; TWO"));
    m.run().unwrap();
    assert_eq!(ints(&m), vec![42, 42]);
}

#[test]
fn step_limit_stops_runaway_loops() {
    let (mut m, _) = machine();
    m.run_source(": SPIN RECURSE ;").unwrap();
    m.config_mut().step_limit = Some(500);
    assert_eq!(m.run_source("SPIN").unwrap(), Shutdown::StepLimit);
}

#[test]
fn restore_returns_to_the_snapshot() {
    let (mut m, _) = machine();
    let image = m.snapshot();
    m.run_source(": EXTRA FOO ; EXTRA").unwrap();
    m.restore(&image).unwrap();

    assert!(m.params().is_empty());
    assert_eq!(m.memory(), image.memory());
    m.run_source("EXTRA").unwrap();
    assert!(matches!(
        m.recovered_errors()[0].kind,
        ErrorKind::InvalidInput(_)
    ));
}
