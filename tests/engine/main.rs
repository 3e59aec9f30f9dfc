//! Integration tests for Layer 2: Engine
//!
//! Tests for per-cell dispatch, subroutine linkage, the outer interpreter,
//! and run-loop recovery.

mod dispatch;
mod outer_interpreter;
mod recovery;

use threadcell::engine::{Bootstrap, CapturedOutput, EngineConfig, Machine, Primitive};
use threadcell::foundation::{Result, Value};

fn push_42(m: &mut Machine) -> Result<()> {
    m.push(Value::Int(42));
    Ok(())
}

fn drop_top(m: &mut Machine) -> Result<()> {
    m.pop()?;
    Ok(())
}

/// A minimal word set on top of the kernel.
pub static WORDS: &[Primitive] = &[
    Primitive::new("FOO", push_42),
    Primitive::new("DROP", drop_top),
];

/// A bootstrapped machine writing into a captured buffer.
pub fn machine() -> (Machine, CapturedOutput) {
    let mut m = Machine::new(EngineConfig::quiet());
    let out = CapturedOutput::new();
    m.set_output(out.clone());
    Bootstrap::new().with_library(WORDS).install(&mut m).unwrap();
    (m, out)
}

/// Address of a visible word.
pub fn address_of(m: &Machine, name: &str) -> i64 {
    m.dictionary().resolve_for_execution(name).unwrap().address
}

/// Integers on the parameter stack, bottom first.
pub fn ints(m: &Machine) -> Vec<i64> {
    m.params().iter().filter_map(Value::as_int).collect()
}
