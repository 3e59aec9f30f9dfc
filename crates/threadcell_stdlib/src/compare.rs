//! Comparisons. Flags are `-1` (true) and `0` (false).

use std::cmp::Ordering;

use threadcell_engine::Machine;
use threadcell_foundation::{Number, Result, Value};

use crate::arithmetic::{binary, unary};

fn ordered(m: &mut Machine, test: fn(Ordering) -> bool) -> Result<()> {
    binary(m, |a, b| Ok(Value::flag(a.compare(b).is_some_and(test))))
}

/// Numbers compare after promotion; anything else compares structurally.
fn equal(m: &Machine) -> Result<bool> {
    let a = m.pick(1)?;
    let b = m.pick(0)?;
    Ok(match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.compare(y) == Some(Ordering::Equal),
        _ => a == b,
    })
}

/// `=` ( a b -- flag )
pub(crate) fn eq(m: &mut Machine) -> Result<()> {
    let flag = equal(m)?;
    m.pop()?;
    m.pop()?;
    m.push(Value::flag(flag));
    Ok(())
}

/// `<>` ( a b -- flag )
pub(crate) fn ne(m: &mut Machine) -> Result<()> {
    let flag = !equal(m)?;
    m.pop()?;
    m.pop()?;
    m.push(Value::flag(flag));
    Ok(())
}

/// `<`
pub(crate) fn lt(m: &mut Machine) -> Result<()> {
    ordered(m, Ordering::is_lt)
}

/// `>`
pub(crate) fn gt(m: &mut Machine) -> Result<()> {
    ordered(m, Ordering::is_gt)
}

/// `<=`
pub(crate) fn le(m: &mut Machine) -> Result<()> {
    ordered(m, Ordering::is_le)
}

/// `>=`
pub(crate) fn ge(m: &mut Machine) -> Result<()> {
    ordered(m, Ordering::is_ge)
}

/// `0=`
pub(crate) fn zero_eq(m: &mut Machine) -> Result<()> {
    unary(m, |n| Value::flag(n.is_zero()))
}

/// `0<`
pub(crate) fn zero_lt(m: &mut Machine) -> Result<()> {
    unary(m, |n| Value::flag(n.compare(Number::Int(0)) == Some(Ordering::Less)))
}

/// `0>`
pub(crate) fn zero_gt(m: &mut Machine) -> Result<()> {
    unary(m, |n| Value::flag(n.compare(Number::Int(0)) == Some(Ordering::Greater)))
}
