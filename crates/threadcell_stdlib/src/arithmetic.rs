//! Arithmetic over the numeric tower.
//!
//! Every word reads and type-checks its operands in place before popping, so
//! a failing word leaves the parameter stack as it found it.

use std::cmp::Ordering;

use threadcell_engine::Machine;
use threadcell_foundation::{Number, Result, Value, promote};

/// Applies `f` to the top two values (`a` below `b`) and replaces them with
/// the result.
pub(crate) fn binary(
    m: &mut Machine,
    f: impl FnOnce(Number, Number) -> Result<Value>,
) -> Result<()> {
    let a = Number::from_value(m.pick(1)?)?;
    let b = Number::from_value(m.pick(0)?)?;
    let result = f(a, b)?;
    m.pop()?;
    m.pop()?;
    m.push(result);
    Ok(())
}

/// Applies `f` to the top value and replaces it with the result.
pub(crate) fn unary(m: &mut Machine, f: impl FnOnce(Number) -> Value) -> Result<()> {
    let n = Number::from_value(m.peek()?)?;
    m.pop()?;
    m.push(f(n));
    Ok(())
}

/// `+` ( a b -- a+b )
pub(crate) fn add(m: &mut Machine) -> Result<()> {
    binary(m, |a, b| Ok(a.plus(b).into()))
}

/// `-` ( a b -- a-b )
pub(crate) fn sub(m: &mut Machine) -> Result<()> {
    binary(m, |a, b| Ok(a.minus(b).into()))
}

/// `*` ( a b -- a*b )
pub(crate) fn mul(m: &mut Machine) -> Result<()> {
    binary(m, |a, b| Ok(a.times(b).into()))
}

/// `/` ( a b -- a/b )
pub(crate) fn div(m: &mut Machine) -> Result<()> {
    binary(m, |a, b| a.divide(b).map(Value::from))
}

/// `MOD` ( a b -- a%b )
pub(crate) fn rem(m: &mut Machine) -> Result<()> {
    binary(m, |a, b| a.remainder(b).map(Value::from))
}

/// `/MOD` ( a b -- rem quot )
pub(crate) fn div_mod(m: &mut Machine) -> Result<()> {
    let a = Number::from_value(m.pick(1)?)?;
    let b = Number::from_value(m.pick(0)?)?;
    let quot = a.divide(b)?;
    let rem = a.remainder(b)?;
    m.pop()?;
    m.pop()?;
    m.push(rem.into());
    m.push(quot.into());
    Ok(())
}

/// `NEGATE` ( n -- -n )
pub(crate) fn negate(m: &mut Machine) -> Result<()> {
    unary(m, |n| n.negate().into())
}

/// `ABS` ( n -- |n| )
pub(crate) fn abs(m: &mut Machine) -> Result<()> {
    unary(m, |n| n.abs().into())
}

/// `MIN` ( a b -- min )
pub(crate) fn min(m: &mut Machine) -> Result<()> {
    binary(m, |a, b| {
        let (a, b) = promote(a, b);
        let smaller = if a.compare(b) == Some(Ordering::Greater) { b } else { a };
        Ok(smaller.into())
    })
}

/// `MAX` ( a b -- max )
pub(crate) fn max(m: &mut Machine) -> Result<()> {
    binary(m, |a, b| {
        let (a, b) = promote(a, b);
        let larger = if a.compare(b) == Some(Ordering::Less) { b } else { a };
        Ok(larger.into())
    })
}

/// `1+`
pub(crate) fn one_plus(m: &mut Machine) -> Result<()> {
    unary(m, |n| n.plus(Number::Int(1)).into())
}

/// `1-`
pub(crate) fn one_minus(m: &mut Machine) -> Result<()> {
    unary(m, |n| n.minus(Number::Int(1)).into())
}

/// `+!` ( n addr -- ): adds `n` to the value stored at `addr`.
pub(crate) fn plus_store(m: &mut Machine) -> Result<()> {
    let n = Number::from_value(m.pick(1)?)?;
    let addr = m.peek_int()?;
    let current = Number::from_value(&m.fetch(addr)?)?;
    m.pop()?;
    m.pop()?;
    m.store(addr, current.plus(n).into());
    Ok(())
}
