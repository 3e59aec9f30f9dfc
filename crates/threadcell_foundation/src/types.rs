//! Type descriptors for error reporting.

use std::fmt;

/// Type descriptor for a [`Value`](crate::Value).
///
/// Cells are classified dynamically, so types only show up when a word
/// receives an operand it cannot use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// Any member of the numeric tower.
    Number,
    /// A single character.
    Char,
    /// String type.
    String,
}

impl Type {
    /// Returns the lower-case name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Number => "number",
            Self::Char => "char",
            Self::String => "string",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
