//! Fetch, store, and compile words.

use threadcell_foundation::{Error, Result, Value};
use threadcell_storage::Cell;

use crate::machine::Machine;
use crate::variables::Variable;

/// `@` ( addr -- x )
pub(crate) fn fetch(m: &mut Machine) -> Result<()> {
    let value = m.fetch(m.peek_int()?)?;
    m.pop()?;
    m.push(value);
    Ok(())
}

/// `!` ( x addr -- )
pub(crate) fn store(m: &mut Machine) -> Result<()> {
    m.require(2)?;
    let addr = m.pop_int()?;
    let value = m.pop()?;
    m.store(addr, value);
    Ok(())
}

/// `,` ( x -- )
pub(crate) fn comma(m: &mut Machine) -> Result<()> {
    let value = m.pop()?;
    m.compile(Cell::Literal(value))?;
    Ok(())
}

/// `COMPILE,` ( xt -- )
pub(crate) fn compile_comma(m: &mut Machine) -> Result<()> {
    let xt = m.pop_int()?;
    m.compile(Cell::ThreadRef(xt))?;
    Ok(())
}

/// Largest number of cells a single `ALLOT` may reserve or release.
pub const MAX_ALLOT: i64 = 1 << 20;

/// `ALLOT` ( n -- ): reserves `n` zeroed cells. A negative `n` moves `HERE`
/// back without clearing anything.
pub(crate) fn allot(m: &mut Machine) -> Result<()> {
    let n = m.peek_int()?;
    if n.unsigned_abs() > MAX_ALLOT.unsigned_abs() {
        return Err(Error::count_out_of_range("ALLOT", n, MAX_ALLOT));
    }
    let here = m.here()?;
    m.pop()?;
    if n < 0 {
        m.set_variable(Variable::Here, here.saturating_add(n));
        return Ok(());
    }
    for _ in 0..n {
        m.compile(Cell::Literal(Value::Int(0)))?;
    }
    Ok(())
}
