//! Number and spacing output.

use threadcell_engine::Machine;
use threadcell_foundation::{Error, Result, Value, format_number};

/// Integers render in the current `BASE`; other values use their display.
fn render(m: &Machine, value: &Value) -> Result<String> {
    Ok(match value {
        Value::Int(n) => format_number(*n, m.base()?),
        other => other.to_string(),
    })
}

/// `.` ( x -- )
pub(crate) fn dot(m: &mut Machine) -> Result<()> {
    let text = render(m, m.peek()?)?;
    m.pop()?;
    m.write(&text)?;
    m.write(" ")
}

/// `.S` ( -- ): prints the stack depth and contents, bottom first.
pub(crate) fn dot_s(m: &mut Machine) -> Result<()> {
    let mut text = format!("<{}> ", m.params().len());
    for value in m.params() {
        text.push_str(&render(m, value)?);
        text.push(' ');
    }
    m.write(&text)
}

/// `CR`
pub(crate) fn cr(m: &mut Machine) -> Result<()> {
    m.write("\n")
}

/// `SPACE`
pub(crate) fn space(m: &mut Machine) -> Result<()> {
    m.write(" ")
}

/// Largest count `SPACES` accepts.
pub const MAX_SPACES: i64 = 1 << 16;

/// `SPACES` ( n -- ): a non-positive count prints nothing; a count above
/// [`MAX_SPACES`] fails and leaves `n` on the stack.
pub(crate) fn spaces(m: &mut Machine) -> Result<()> {
    let n = m.peek_int()?;
    if n > MAX_SPACES {
        return Err(Error::count_out_of_range("SPACES", n, MAX_SPACES));
    }
    m.pop()?;
    let count = usize::try_from(n).unwrap_or(0);
    m.write(&" ".repeat(count))
}

/// `BL` ( -- c ): the space character.
pub(crate) fn bl(m: &mut Machine) -> Result<()> {
    m.push(Value::Char(' '));
    Ok(())
}
