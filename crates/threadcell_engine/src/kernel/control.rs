//! Control-transfer words and the fixed-variable words.

use threadcell_foundation::{Result, Value};

use crate::machine::{Machine, Shutdown};
use crate::variables::Variable;

/// `(NEXT)`: return to the caller's next cell.
pub(crate) fn next(m: &mut Machine) -> Result<()> {
    m.set_ip(m.nip());
    Ok(())
}

/// `DOCOL`: codeword of every colon definition.
pub(crate) fn docol(m: &mut Machine) -> Result<()> {
    m.enter();
    Ok(())
}

/// `EXIT`
pub(crate) fn exit(m: &mut Machine) -> Result<()> {
    m.exit()
}

/// `LIT`: push the literal in the caller's next cell and skip it.
pub(crate) fn lit(m: &mut Machine) -> Result<()> {
    let at = m.nip();
    let value = m.inline_literal(at)?;
    m.push(value);
    m.set_nip(at.wrapping_add(1));
    Ok(())
}

/// `BRANCH`: offsets are relative to the offset cell.
pub(crate) fn branch(m: &mut Machine) -> Result<()> {
    let at = m.nip();
    let target = at.wrapping_add(m.inline_offset(at)?);
    m.set_nip(target);
    m.set_ip(target);
    Ok(())
}

/// `0BRANCH`
pub(crate) fn zero_branch(m: &mut Machine) -> Result<()> {
    let at = m.nip();
    let offset = m.inline_offset(at)?;
    let flag = m.pop()?;
    let target = if flag.is_truthy() {
        at.wrapping_add(1)
    } else {
        at.wrapping_add(offset)
    };
    m.set_nip(target);
    m.set_ip(target);
    Ok(())
}

/// `EXECUTE` ( xt -- )
pub(crate) fn execute(m: &mut Machine) -> Result<()> {
    let xt = m.pop_int()?;
    m.set_ip(xt);
    Ok(())
}

/// `QUIT`
pub(crate) fn quit(m: &mut Machine) -> Result<()> {
    m.reset_to_outer_loop()
}

/// `BYE`
pub(crate) fn bye(m: &mut Machine) -> Result<()> {
    m.request_shutdown(Shutdown::Bye);
    Ok(())
}

fn push_slot(m: &mut Machine, variable: Variable) -> Result<()> {
    m.push(Value::Int(variable.address()));
    Ok(())
}

/// `HERE` ( -- addr )
pub(crate) fn here(m: &mut Machine) -> Result<()> {
    push_slot(m, Variable::Here)
}

/// `STATE` ( -- addr )
pub(crate) fn state(m: &mut Machine) -> Result<()> {
    push_slot(m, Variable::State)
}

/// `BASE` ( -- addr )
pub(crate) fn base(m: &mut Machine) -> Result<()> {
    push_slot(m, Variable::Base)
}

/// `LATEST` ( -- addr )
pub(crate) fn latest(m: &mut Machine) -> Result<()> {
    push_slot(m, Variable::Latest)
}
