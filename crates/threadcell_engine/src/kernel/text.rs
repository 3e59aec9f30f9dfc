//! Character and string input/output words.

use std::sync::Arc;

use threadcell_foundation::{Error, ErrorKind, Result, Type, Value};
use threadcell_storage::Cell;

use super::defining::{compile_literal, compile_only};
use crate::machine::Machine;
use crate::variables::Mode;

fn end_of_input() -> Error {
    Error::new(ErrorKind::EndOfInput)
}

/// `KEY` ( -- c )
pub(crate) fn key(m: &mut Machine) -> Result<()> {
    let c = m.input_mut().next_char().ok_or_else(end_of_input)?;
    m.push(Value::Char(c));
    Ok(())
}

/// `WORD` ( -- s ): the next whitespace-delimited token.
pub(crate) fn word(m: &mut Machine) -> Result<()> {
    let token = m.read_token()?;
    m.push(Value::Str(Arc::from(token)));
    Ok(())
}

fn first_char(m: &mut Machine) -> Result<char> {
    let token = m.read_token()?;
    let first = token.chars().next();
    first.ok_or_else(|| Error::invalid_input(token))
}

/// `CHAR` name ( -- c )
pub(crate) fn char(m: &mut Machine) -> Result<()> {
    let c = first_char(m)?;
    m.push(Value::Char(c));
    Ok(())
}

/// `[CHAR]` name: compiles `LIT c`.
pub(crate) fn bracket_char(m: &mut Machine) -> Result<()> {
    compile_only(m, "[CHAR]")?;
    let c = first_char(m)?;
    compile_literal(m, Value::Char(c))
}

/// `EMIT` ( c -- ): accepts characters and integer code points.
pub(crate) fn emit(m: &mut Machine) -> Result<()> {
    let top = m.peek()?;
    let c = top
        .as_char()
        .ok_or_else(|| Error::type_mismatch(Type::Char, top.value_type()))?;
    m.pop()?;
    m.write(c.encode_utf8(&mut [0; 4]))
}

/// `TYPE` ( x -- ): writes a value's text without decoration.
pub(crate) fn type_(m: &mut Machine) -> Result<()> {
    let value = m.pop()?;
    m.write(&value.to_string())
}

/// `."` text": prints `text`, or compiles code that prints it.
pub(crate) fn dot_quote(m: &mut Machine) -> Result<()> {
    let text = m.input_mut().read_until('"').ok_or_else(end_of_input)?;
    match m.mode()? {
        Mode::Interpret => m.write(&text),
        Mode::Compile => {
            let type_word = m.kernel()?.type_word;
            compile_literal(m, Value::Str(Arc::from(text)))?;
            m.compile(Cell::ThreadRef(type_word))?;
            Ok(())
        }
    }
}

/// `S"` text" ( -- s )
pub(crate) fn s_quote(m: &mut Machine) -> Result<()> {
    let text = m.input_mut().read_until('"').ok_or_else(end_of_input)?;
    let value = Value::Str(Arc::from(text));
    match m.mode()? {
        Mode::Interpret => {
            m.push(value);
            Ok(())
        }
        Mode::Compile => compile_literal(m, value),
    }
}

/// `(` comment `)`; an unterminated comment runs to end of input.
pub(crate) fn paren(m: &mut Machine) -> Result<()> {
    m.input_mut().read_until(')');
    Ok(())
}

/// `\` comment to end of line.
pub(crate) fn backslash(m: &mut Machine) -> Result<()> {
    m.input_mut().discard_line();
    Ok(())
}
