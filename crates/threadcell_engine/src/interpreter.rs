//! The outer interpreter.
//!
//! `INTERPRET` is an ordinary primitive reached through the outer-loop thread.
//! Each time it runs it reads one token and classifies it:
//!
//! 1. A visible dictionary word executes, or is compiled as a `ThreadRef`
//!    while `STATE` is 1 unless the word is immediate.
//! 2. An integer in the current `BASE` is pushed, or compiled as `LIT n`.
//! 3. Any other literal (float, `'c'`, `"text"`) is handled like a number.
//! 4. Anything else is an `InvalidInput` error.

use threadcell_foundation::{parse_number, Error, Result, Value};
use threadcell_storage::{Cell, DictionaryEntry};

use crate::machine::{Machine, Shutdown};
use crate::variables::Mode;

/// What a token means.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A visible dictionary word.
    Word(DictionaryEntry),
    /// A number or other literal.
    Literal(Value),
}

/// Classifies `token` against the dictionary and `BASE`.
///
/// # Errors
///
/// Returns `InvalidBase` if a number parse is needed and `BASE` is out of
/// range, or `InvalidInput` if nothing matches.
pub fn classify(m: &Machine, token: &str) -> Result<Token> {
    if let Some(entry) = m.dictionary().resolve_for_execution(token) {
        return Ok(Token::Word(entry.clone()));
    }
    if let Some(n) = parse_number(token, m.base()?) {
        return Ok(Token::Literal(Value::Int(n)));
    }
    Value::parse_literal(token)
        .map(Token::Literal)
        .ok_or_else(|| Error::invalid_input(token))
}

/// `INTERPRET`: handles one token. At end of input it requests shutdown and
/// leaves IP in place so the next `run` resumes here.
pub(crate) fn interpret(m: &mut Machine) -> Result<()> {
    let Some(token) = m.input_mut().next_token() else {
        m.request_shutdown(Shutdown::EndOfInput);
        return Ok(());
    };
    let mode = m.mode()?;
    tracing::trace!(%token, ?mode, "interpret");

    match classify(m, &token)? {
        Token::Word(entry) if mode == Mode::Interpret || entry.immediate => {
            m.set_ip(entry.address);
        }
        Token::Word(entry) => {
            m.compile(Cell::ThreadRef(entry.address))?;
            m.set_ip(m.nip());
        }
        Token::Literal(value) => {
            match mode {
                Mode::Interpret => m.push(value),
                Mode::Compile => {
                    let lit = m.kernel()?.lit;
                    m.compile(Cell::ThreadRef(lit))?;
                    m.compile(Cell::Literal(value))?;
                }
            }
            m.set_ip(m.nip());
        }
    }
    Ok(())
}
