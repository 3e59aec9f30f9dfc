//! Parameter stack shuffling.

use threadcell_engine::Machine;
use threadcell_foundation::{Error, Result, StackKind, Value};

/// Pops `n` values, returning them bottom-first.
fn take(m: &mut Machine, n: usize) -> Result<Vec<Value>> {
    m.require(n)?;
    let mut items = Vec::with_capacity(n);
    for _ in 0..n {
        items.push(m.pop()?);
    }
    items.reverse();
    Ok(items)
}

/// Replaces the top `n` values with `order` applied to them.
fn permute(m: &mut Machine, n: usize, order: &[usize]) -> Result<()> {
    let items = take(m, n)?;
    for &i in order {
        m.push(items[i].clone());
    }
    Ok(())
}

/// `DROP` ( a -- )
pub(crate) fn drop(m: &mut Machine) -> Result<()> {
    m.pop()?;
    Ok(())
}

/// `DUP` ( a -- a a )
pub(crate) fn dup(m: &mut Machine) -> Result<()> {
    let top = m.peek()?.clone();
    m.push(top);
    Ok(())
}

/// `SWAP` ( a b -- b a )
pub(crate) fn swap(m: &mut Machine) -> Result<()> {
    permute(m, 2, &[1, 0])
}

/// `OVER` ( a b -- a b a )
pub(crate) fn over(m: &mut Machine) -> Result<()> {
    let second = m.pick(1)?.clone();
    m.push(second);
    Ok(())
}

/// `ROT` ( a b c -- b c a )
pub(crate) fn rot(m: &mut Machine) -> Result<()> {
    permute(m, 3, &[1, 2, 0])
}

/// `-ROT` ( a b c -- c a b )
pub(crate) fn minus_rot(m: &mut Machine) -> Result<()> {
    permute(m, 3, &[2, 0, 1])
}

/// `NIP` ( a b -- b )
pub(crate) fn nip(m: &mut Machine) -> Result<()> {
    permute(m, 2, &[1])
}

/// `TUCK` ( a b -- b a b )
pub(crate) fn tuck(m: &mut Machine) -> Result<()> {
    permute(m, 2, &[1, 0, 1])
}

/// `2DUP` ( a b -- a b a b )
pub(crate) fn two_dup(m: &mut Machine) -> Result<()> {
    permute(m, 2, &[0, 1, 0, 1])
}

/// `2DROP` ( a b -- )
pub(crate) fn two_drop(m: &mut Machine) -> Result<()> {
    permute(m, 2, &[])
}

/// `2SWAP` ( a b c d -- c d a b )
pub(crate) fn two_swap(m: &mut Machine) -> Result<()> {
    permute(m, 4, &[2, 3, 0, 1])
}

/// `?DUP` ( a -- a a | 0 )
pub(crate) fn question_dup(m: &mut Machine) -> Result<()> {
    let top = m.peek()?;
    if top.is_truthy() {
        let top = top.clone();
        m.push(top);
    }
    Ok(())
}

/// `PICK` ( xu ... x0 u -- xu ... x0 xu )
pub(crate) fn pick(m: &mut Machine) -> Result<()> {
    let u = m.peek_int()?;
    let below = m.params().len() - 1;
    let index = usize::try_from(u)
        .ok()
        .filter(|&i| i < below)
        .ok_or_else(|| Error::invalid_stack_pointer(StackKind::Parameter, u, below))?;
    let value = m.pick(index + 1)?.clone();
    m.pop()?;
    m.push(value);
    Ok(())
}

/// `DEPTH` ( -- n )
pub(crate) fn depth(m: &mut Machine) -> Result<()> {
    let depth = i64::try_from(m.params().len())
        .map_err(|_| Error::internal("parameter stack depth overflows a cell"))?;
    m.push(Value::Int(depth));
    Ok(())
}
