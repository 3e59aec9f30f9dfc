//! Raw stack-pointer access.

use threadcell_foundation::{Error, Result, StackKind, Value};

use crate::machine::Machine;

fn index(stack: StackKind, requested: i64, len: usize) -> Result<usize> {
    usize::try_from(requested)
        .ok()
        .filter(|i| *i < len)
        .ok_or_else(|| Error::invalid_stack_pointer(stack, requested, len))
}

fn as_cell(n: usize) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

/// `DSP@` ( -- p ): index of the current top.
pub(crate) fn dsp_fetch(m: &mut Machine) -> Result<()> {
    let p = m.params().pointer()?;
    m.push(as_cell(p));
    Ok(())
}

/// `DSP!` ( p -- ): truncates the parameter stack to `p`.
pub(crate) fn dsp_store(m: &mut Machine) -> Result<()> {
    let requested = m.peek_int()?;
    let p = index(StackKind::Parameter, requested, m.params().len() - 1)?;
    m.pop()?;
    m.params_mut().set_pointer(p)
}

/// `RSP@` ( -- p )
pub(crate) fn rsp_fetch(m: &mut Machine) -> Result<()> {
    let p = m.returns().pointer()?;
    m.push(as_cell(p));
    Ok(())
}

/// `RSP!` ( p -- )
pub(crate) fn rsp_store(m: &mut Machine) -> Result<()> {
    let requested = m.peek_int()?;
    let p = index(StackKind::Return, requested, m.returns().len())?;
    m.pop()?;
    m.returns_mut().set_pointer(p)
}

/// `DS-ITEM` ( i -- x ): the parameter-stack slot at bottom index `i`.
pub(crate) fn ds_item(m: &mut Machine) -> Result<()> {
    let requested = m.peek_int()?;
    let i = index(StackKind::Parameter, requested, m.params().len() - 1)?;
    let value = m.params().item(i)?.clone();
    m.pop()?;
    m.push(value);
    Ok(())
}

/// `RS-ITEM` ( i -- x )
pub(crate) fn rs_item(m: &mut Machine) -> Result<()> {
    let requested = m.peek_int()?;
    let i = index(StackKind::Return, requested, m.returns().len())?;
    let value = m.returns().item(i)?.clone();
    m.pop()?;
    m.push(value);
    Ok(())
}

/// `>R` ( x -- ) ( R: -- x )
pub(crate) fn to_r(m: &mut Machine) -> Result<()> {
    let value = m.pop()?;
    m.returns_mut().push(value);
    Ok(())
}

/// `R>` ( -- x ) ( R: x -- )
pub(crate) fn r_from(m: &mut Machine) -> Result<()> {
    let value = m.returns_mut().pop()?;
    m.push(value);
    Ok(())
}

/// `R@` ( -- x ) ( R: x -- x )
pub(crate) fn r_fetch(m: &mut Machine) -> Result<()> {
    let value = m.returns().peek()?.clone();
    m.push(value);
    Ok(())
}

/// `RDROP` ( R: x -- )
pub(crate) fn rdrop(m: &mut Machine) -> Result<()> {
    m.returns_mut().pop()?;
    Ok(())
}
