//! Input and output collaborators.
//!
//! The engine reads characters through an [`InputSource`] and writes text
//! through an [`OutputSink`]. Both are blocking from the engine's point of
//! view.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use threadcell_foundation::Result;

/// A character stream feeding token acquisition.
pub trait InputSource {
    /// Next character, or `None` at end of input.
    fn next_char(&mut self) -> Option<char>;

    /// Drops whatever remains of the current line.
    ///
    /// Must not block waiting for a new line when the current one is already
    /// exhausted.
    fn discard_line(&mut self);

    /// Next whitespace-delimited token. The single delimiter that ends the
    /// token is consumed.
    fn next_token(&mut self) -> Option<String> {
        let mut c = loop {
            match self.next_char()? {
                c if c.is_whitespace() => {}
                c => break c,
            }
        };
        let mut token = String::new();
        loop {
            token.push(c);
            match self.next_char() {
                Some(n) if !n.is_whitespace() => c = n,
                _ => return Some(token),
            }
        }
    }

    /// Characters up to, not including, `delim`. The delimiter is consumed.
    /// `None` if input ends first.
    fn read_until(&mut self, delim: char) -> Option<String> {
        let mut text = String::new();
        loop {
            match self.next_char()? {
                c if c == delim => return Some(text),
                c => text.push(c),
            }
        }
    }
}

/// Input drawn from an in-memory string.
#[derive(Clone, Debug, Default)]
pub struct StringInput {
    chars: Vec<char>,
    pos: usize,
}

impl StringInput {
    /// Creates an input over `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    /// Returns true once every character has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.chars.len()
    }
}

impl InputSource for StringInput {
    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        Some(c)
    }

    fn discard_line(&mut self) {
        if self.pos > 0 && self.chars.get(self.pos - 1) == Some(&'\n') {
            return;
        }
        while let Some(c) = self.next_char() {
            if c == '\n' {
                break;
            }
        }
    }
}

/// A text destination.
pub trait OutputSink {
    /// Writes text.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the destination fails.
    fn write_str(&mut self, text: &str) -> Result<()>;

    /// Flushes buffered text.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the destination fails.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Output to the process's standard output.
#[derive(Debug, Default)]
pub struct Console;

impl OutputSink for Console {
    fn write_str(&mut self, text: &str) -> Result<()> {
        std::io::stdout().write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }
}

/// Output collected into a shared buffer.
///
/// Clones share the buffer, so a host can keep one handle while the machine
/// owns another.
#[derive(Clone, Debug, Default)]
pub struct CapturedOutput(Rc<RefCell<String>>);

impl CapturedOutput {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    #[must_use]
    pub fn contents(&self) -> String {
        self.0.borrow().clone()
    }

    /// Takes everything written so far, leaving the buffer empty.
    #[must_use]
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl OutputSink for CapturedOutput {
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.0.borrow_mut().push_str(text);
        Ok(())
    }
}
