//! Dictionary introspection: `WORDS` and `SEE`.

use threadcell_foundation::{format_number, Address, Error, Result, Value};
use threadcell_storage::{Cell, DictionaryEntry};

use crate::machine::Machine;

/// `WORDS`: lists visible words, newest first.
pub(crate) fn words(m: &mut Machine) -> Result<()> {
    let names: Vec<String> = m
        .dictionary()
        .visible_names()
        .iter()
        .map(ToString::to_string)
        .collect();
    m.write(&names.join(" "))?;
    m.write("\n")
}

/// `SEE` name: prints a decompiled definition.
pub(crate) fn see(m: &mut Machine) -> Result<()> {
    let name = m.read_token()?;
    let entry = m
        .dictionary()
        .resolve_by_name(&name)
        .cloned()
        .ok_or_else(|| Error::lookup_failure(name))?;
    let text = decompile(m, &entry)?;
    m.write(&text)?;
    m.write("\n")
}

/// Renders a dictionary entry as source-like text.
///
/// # Errors
///
/// Fails if the machine was never bootstrapped or `HERE`/`BASE` are corrupt.
pub fn decompile(m: &Machine, entry: &DictionaryEntry) -> Result<String> {
    let kernel = m.kernel()?;
    let base = m.base()?;
    let here = m.here()?;
    let name = &entry.name;
    let suffix = if entry.immediate { " IMMEDIATE" } else { "" };

    match m.memory().get(entry.address) {
        Cell::NativeOp(id) if *id == kernel.docol => {}
        Cell::NativeOp(id) if *id == kernel.dovar => return Ok(format!("CREATE {name}")),
        Cell::NativeOp(id) if *id == kernel.docon => {
            let value = m.inline_literal(entry.address + 1)?;
            return Ok(format!("{} CONSTANT {name}", render(&value, base)));
        }
        Cell::NativeOp(_) => return Ok(format!("{name} is a primitive{suffix}")),
        other => return Ok(format!("{name} is data: {other}")),
    }

    let mut parts = vec![format!(": {name}")];
    let mut at = entry.address + 1;
    while at < here {
        let cell = m.memory().get(at);
        match cell {
            Cell::ThreadRef(x) if *x == kernel.exit && ends_body(m, at + 1, here) => break,
            Cell::ThreadRef(x) if *x == kernel.lit => {
                at += 1;
                match m.memory().get(at) {
                    Cell::Literal(v) => parts.push(render(v, base)),
                    other => parts.push(format!("LIT {other}")),
                }
            }
            Cell::ThreadRef(x) if *x == kernel.branch || *x == kernel.zero_branch => {
                let word = label(m, *x);
                at += 1;
                let offset = m.inline_offset(at).unwrap_or_default();
                parts.push(format!("{word}({offset})"));
            }
            Cell::ThreadRef(x) => parts.push(label(m, *x)),
            Cell::Literal(v) => parts.push(render(v, base)),
            other => parts.push(other.to_string()),
        }
        at += 1;
    }
    parts.push(format!(";{suffix}"));
    Ok(parts.join(" "))
}

fn ends_body(m: &Machine, next: Address, here: Address) -> bool {
    next >= here || m.dictionary().name_of(next).is_some()
}

fn label(m: &Machine, address: Address) -> String {
    m.dictionary()
        .name_of(address)
        .map_or_else(|| format!("->{address}"), ToString::to_string)
}

fn render(value: &Value, base: u32) -> String {
    match value {
        Value::Int(n) => format_number(*n, base),
        Value::Char(c) => format!("'{c}'"),
        Value::Str(s) => format!("S\" {s}\""),
        Value::Float(_) => value.to_string(),
    }
}
