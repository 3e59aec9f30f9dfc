//! Error types for threadcell.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::Address;
use crate::types::Type;

/// The main error type for threadcell operations.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a stack underflow error for the given stack.
    #[must_use]
    pub fn stack_underflow(stack: StackKind) -> Self {
        Self::new(ErrorKind::StackUnderflow(stack))
    }

    /// Creates an invalid stack pointer error.
    #[must_use]
    pub fn invalid_stack_pointer(stack: StackKind, index: i64, len: usize) -> Self {
        Self::new(ErrorKind::InvalidStackPointer { stack, index, len })
    }

    /// Creates an unknown cell error for the given address.
    #[must_use]
    pub fn unknown_cell(address: Address) -> Self {
        Self::new(ErrorKind::UnknownCell(address))
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates a dictionary lookup failure for `name`.
    #[must_use]
    pub fn lookup_failure(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DictionaryLookupFailure(name.into()))
    }

    /// Creates an error for a count `word` refuses to honor.
    #[must_use]
    pub fn count_out_of_range(word: impl Into<String>, count: i64, limit: i64) -> Self {
        Self::new(ErrorKind::CountOutOfRange {
            word: word.into(),
            count,
            limit,
        })
    }

    /// Creates an invalid input error for `token`.
    #[must_use]
    pub fn invalid_input(token: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput(token.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err.to_string()))
    }
}

/// Which of the two stacks an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackKind {
    /// The parameter (operand) stack.
    Parameter,
    /// The return (call-linkage) stack.
    Return,
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter => f.write_str("parameter"),
            Self::Return => f.write_str("return"),
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    /// Pop, peek, or pointer read on an empty stack.
    #[error("{0} stack underflow")]
    StackUnderflow(StackKind),

    /// Stack index outside the live region.
    #[error("invalid {stack} stack pointer: {index} (depth {len})")]
    InvalidStackPointer {
        /// The stack that was addressed.
        stack: StackKind,
        /// The requested index.
        index: i64,
        /// The stack's depth at the time.
        len: usize,
    },

    /// Execution reached a cell with no content.
    #[error("unknown cell at address {0}")]
    UnknownCell(Address),

    /// EXIT with an empty return stack.
    #[error("unbalanced return: return stack is empty")]
    UnbalancedReturn,

    /// Threaded-code depth would drop below zero.
    #[error("invalid threaded-code depth: exit without matching entry")]
    InvalidDepth,

    /// A word that had to exist was not in the dictionary.
    #[error("dictionary lookup failed: {0}")]
    DictionaryLookupFailure(String),

    /// A token matched no classification.
    #[error("undefined word: {0}")]
    InvalidInput(String),

    /// Operand had the wrong type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// An inline operand cell did not hold a literal.
    #[error("expected literal cell at address {0}")]
    ExpectedLiteral(Address),

    /// BASE holds a radix outside 2..=36.
    #[error("invalid numeric base: {0}")]
    InvalidBase(i64),

    /// A repeat or reservation count exceeded what a word accepts.
    #[error("{word} count out of range: {count} (limit {limit})")]
    CountOutOfRange {
        /// The word that rejected the count.
        word: String,
        /// The requested count.
        count: i64,
        /// The largest accepted count.
        limit: i64,
    },

    /// A compile-only word was used while interpreting.
    #[error("{0} is compile-only")]
    CompileOnly(String),

    /// The input source ran dry while a word still needed input.
    #[error("unexpected end of input")]
    EndOfInput,

    /// Failure in an input or output collaborator.
    #[error("i/o error: {0}")]
    Io(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    /// The word executing when the error was raised.
    pub word: Option<String>,
    /// The instruction pointer at the time.
    pub address: Option<Address>,
    /// Calling words, innermost first.
    pub frames: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the executing word.
    #[must_use]
    pub fn with_word(mut self, word: impl Into<String>) -> Self {
        self.word = Some(word.into());
        self
    }

    /// Sets the faulting address.
    #[must_use]
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Adds a caller frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frames.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.word, self.address) {
            (Some(word), Some(addr)) => write!(f, "in {word} at {addr}")?,
            (Some(word), None) => write!(f, "in {word}")?,
            (None, Some(addr)) => write!(f, "at {addr}")?,
            (None, None) => {}
        }
        for frame in &self.frames {
            write!(f, "\n  called from {frame}")?;
        }
        Ok(())
    }
}
