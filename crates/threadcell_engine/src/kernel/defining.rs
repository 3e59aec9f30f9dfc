//! Defining and compiling words.

use threadcell_foundation::{Error, ErrorKind, Result, Value};
use threadcell_storage::Cell;

use crate::machine::Machine;
use crate::variables::{Mode, Variable};

pub(crate) fn compile_only(m: &Machine, word: &str) -> Result<()> {
    match m.mode()? {
        Mode::Compile => Ok(()),
        Mode::Interpret => Err(Error::new(ErrorKind::CompileOnly(word.to_string()))),
    }
}

/// Appends `LIT value`.
pub(crate) fn compile_literal(m: &mut Machine, value: Value) -> Result<()> {
    let lit = m.kernel()?.lit;
    m.compile(Cell::ThreadRef(lit))?;
    m.compile(Cell::Literal(value))?;
    Ok(())
}

/// Creates a header for `name` at `HERE` and makes it `LATEST`.
fn header(m: &mut Machine, name: &str, hidden: bool) -> Result<i64> {
    let here = m.here()?;
    m.dictionary_mut().define(name, here, false, hidden);
    m.set_variable(Variable::Latest, here);
    tracing::debug!(word = name, address = here, "defined");
    Ok(here)
}

/// `:` name: starts a hidden definition and enters compile mode.
pub(crate) fn colon(m: &mut Machine) -> Result<()> {
    let docol = m.kernel()?.docol;
    let name = m.read_token()?;
    header(m, &name, true)?;
    m.compile(Cell::NativeOp(docol))?;
    m.set_mode(Mode::Compile);
    Ok(())
}

/// `;`: closes the definition, reveals it, and returns to interpret mode.
pub(crate) fn semicolon(m: &mut Machine) -> Result<()> {
    compile_only(m, ";")?;
    let exit = m.kernel()?.exit;
    let latest = m.latest()?;
    m.compile(Cell::ThreadRef(exit))?;
    m.dictionary_mut().set_hidden(latest, false);
    m.set_mode(Mode::Interpret);
    Ok(())
}

/// `[`
pub(crate) fn left_bracket(m: &mut Machine) -> Result<()> {
    m.set_mode(Mode::Interpret);
    Ok(())
}

/// `]`
pub(crate) fn right_bracket(m: &mut Machine) -> Result<()> {
    m.set_mode(Mode::Compile);
    Ok(())
}

/// `IMMEDIATE`: flags the latest definition.
pub(crate) fn immediate(m: &mut Machine) -> Result<()> {
    let latest = m.latest()?;
    if m.dictionary_mut().set_immediate(latest, true) {
        Ok(())
    } else {
        Err(Error::lookup_failure(format!("no word at {latest}")))
    }
}

/// `HIDDEN` ( addr -- ): toggles the hidden flag of the word at `addr`.
pub(crate) fn hidden(m: &mut Machine) -> Result<()> {
    let addr = m.peek_int()?;
    if !m.dictionary_mut().toggle_hidden(addr) {
        return Err(Error::lookup_failure(format!("no word at {addr}")));
    }
    m.pop()?;
    Ok(())
}

/// `HIDE` name
pub(crate) fn hide(m: &mut Machine) -> Result<()> {
    let name = m.read_token()?;
    let addr = m
        .dictionary()
        .resolve_by_name(&name)
        .map(|e| e.address)
        .ok_or_else(|| Error::lookup_failure(name.clone()))?;
    m.dictionary_mut().toggle_hidden(addr);
    Ok(())
}

/// `CREATE` name: a word that pushes the address of the cells that follow it.
pub(crate) fn create(m: &mut Machine) -> Result<()> {
    let dovar = m.kernel()?.dovar;
    let name = m.read_token()?;
    header(m, &name, false)?;
    m.compile(Cell::NativeOp(dovar))?;
    Ok(())
}

/// `VARIABLE` name
pub(crate) fn variable(m: &mut Machine) -> Result<()> {
    create(m)?;
    m.compile(Cell::Literal(Value::Int(0)))?;
    Ok(())
}

/// `CONSTANT` name ( x -- )
pub(crate) fn constant(m: &mut Machine) -> Result<()> {
    let docon = m.kernel()?.docon;
    m.peek()?;
    let name = m.read_token()?;
    let value = m.pop()?;
    header(m, &name, false)?;
    m.compile(Cell::NativeOp(docon))?;
    m.compile(Cell::Literal(value))?;
    Ok(())
}

/// `(DOVAR)`: pushes the address after the codeword.
pub(crate) fn dovar(m: &mut Machine) -> Result<()> {
    m.push(Value::Int(m.ip() + 1));
    m.set_ip(m.nip());
    Ok(())
}

/// `(DOCON)`: pushes the literal after the codeword.
pub(crate) fn docon(m: &mut Machine) -> Result<()> {
    let value = m.inline_literal(m.ip() + 1)?;
    m.push(value);
    m.set_ip(m.nip());
    Ok(())
}

/// `LITERAL` ( x -- ): compiles `LIT x`.
pub(crate) fn literal(m: &mut Machine) -> Result<()> {
    compile_only(m, "LITERAL")?;
    let value = m.pop()?;
    compile_literal(m, value)
}

/// `RECURSE`: compiles a call to the definition in progress.
pub(crate) fn recurse(m: &mut Machine) -> Result<()> {
    compile_only(m, "RECURSE")?;
    let latest = m.latest()?;
    m.compile(Cell::ThreadRef(latest))?;
    Ok(())
}

fn find_xt(m: &Machine, name: &str) -> Result<i64> {
    m.dictionary()
        .resolve_for_execution(name)
        .map(|e| e.address)
        .ok_or_else(|| Error::lookup_failure(name))
}

/// `'` name ( -- xt )
pub(crate) fn tick(m: &mut Machine) -> Result<()> {
    let name = m.read_token()?;
    let xt = find_xt(m, &name)?;
    m.push(Value::Int(xt));
    Ok(())
}

/// `[']` name: compiles `LIT xt`.
pub(crate) fn bracket_tick(m: &mut Machine) -> Result<()> {
    compile_only(m, "[']")?;
    let name = m.read_token()?;
    let xt = find_xt(m, &name)?;
    compile_literal(m, Value::Int(xt))
}

/// `FORGET` name: drops every definition of `name`. Memory is not reclaimed.
pub(crate) fn forget(m: &mut Machine) -> Result<()> {
    let name = m.read_token()?;
    if m.dictionary_mut().remove(&name) {
        tracing::debug!(word = %name, "forgotten");
        Ok(())
    } else {
        Err(Error::lookup_failure(name))
    }
}
