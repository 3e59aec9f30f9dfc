//! Bitwise logic on integers and the flag constants.

use threadcell_engine::Machine;
use threadcell_foundation::{Error, Result, Type, Value};

fn int_at(m: &Machine, n: usize) -> Result<i64> {
    let value = m.pick(n)?;
    value
        .as_int()
        .ok_or_else(|| Error::type_mismatch(Type::Int, value.value_type()))
}

fn bitwise(m: &mut Machine, f: fn(i64, i64) -> i64) -> Result<()> {
    let a = int_at(m, 1)?;
    let b = int_at(m, 0)?;
    m.pop()?;
    m.pop()?;
    m.push(Value::Int(f(a, b)));
    Ok(())
}

/// `AND`
pub(crate) fn and(m: &mut Machine) -> Result<()> {
    bitwise(m, |a, b| a & b)
}

/// `OR`
pub(crate) fn or(m: &mut Machine) -> Result<()> {
    bitwise(m, |a, b| a | b)
}

/// `XOR`
pub(crate) fn xor(m: &mut Machine) -> Result<()> {
    bitwise(m, |a, b| a ^ b)
}

/// `INVERT` ( n -- !n )
pub(crate) fn invert(m: &mut Machine) -> Result<()> {
    let n = m.pop_int()?;
    m.push(Value::Int(!n));
    Ok(())
}

/// `TRUE` ( -- -1 )
pub(crate) fn true_(m: &mut Machine) -> Result<()> {
    m.push(Value::TRUE);
    Ok(())
}

/// `FALSE` ( -- 0 )
pub(crate) fn false_(m: &mut Machine) -> Result<()> {
    m.push(Value::FALSE);
    Ok(())
}
