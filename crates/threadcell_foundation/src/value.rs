//! The opaque payload carried by literal cells and by both stacks.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::number::Number;
use crate::types::Type;

/// A value on a stack or inside a `Literal` cell.
///
/// The engine never inspects values for control flow; only words do.
/// Cloning is O(1).
#[derive(Clone)]
pub enum Value {
    /// 64-bit signed integer. Addresses and flags are integers too.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// A single character.
    Char(char),
    /// Immutable string.
    Str(Arc<str>),
}

impl Value {
    /// Canonical true flag.
    pub const TRUE: Value = Value::Int(-1);
    /// Canonical false flag.
    pub const FALSE: Value = Value::Int(0);

    /// Builds a flag value from a boolean.
    #[must_use]
    pub const fn flag(b: bool) -> Self {
        if b { Self::TRUE } else { Self::FALSE }
    }

    /// Returns the type of this value.
    #[must_use]
    pub const fn value_type(&self) -> Type {
        match self {
            Self::Int(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::Char(_) => Type::Char,
            Self::Str(_) => Type::String,
        }
    }

    /// Returns true unless this is a numeric zero.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Int(n) => *n != 0,
            Self::Float(n) => *n != 0.0,
            Self::Char(_) | Self::Str(_) => true,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a character.
    ///
    /// Integers in the Unicode scalar range are accepted as code points.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            Self::Int(n) => u32::try_from(*n).ok().and_then(char::from_u32),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Views this value as a member of the numeric tower.
    #[must_use]
    pub const fn as_number(&self) -> Option<Number> {
        match self {
            Self::Int(n) => Some(Number::Int(*n)),
            Self::Float(n) => Some(Number::Float(*n)),
            _ => None,
        }
    }

    /// Parses a non-integer literal token.
    ///
    /// Recognizes floats (`3.5`, `-1e3`, `.5`), character literals (`'x'`)
    /// and whitespace-free string literals (`"text"`). Integers are handled
    /// separately because they depend on the current radix.
    #[must_use]
    pub fn parse_literal(token: &str) -> Option<Self> {
        if let Some(c) = parse_char(token) {
            return Some(Self::Char(c));
        }
        if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
            return Some(Self::Str(Arc::from(&token[1..token.len() - 1])));
        }
        if looks_numeric(token) {
            return token.parse::<f64>().ok().map(Self::Float);
        }
        None
    }
}

fn parse_char(token: &str) -> Option<char> {
    let inner = token.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut chars = inner.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

// Rejects `inf`, `nan` and friends, which `f64::from_str` would accept.
fn looks_numeric(token: &str) -> bool {
    let body = token.strip_prefix(['-', '+']).unwrap_or(token);
    let body = body.strip_prefix('.').unwrap_or(body);
    body.starts_with(|c: char| c.is_ascii_digit())
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => Self::Int(i),
            Number::Float(f) => Self::Float(f),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Int(n) => n.hash(state),
            Self::Float(n) => n.to_bits().hash(state),
            Self::Char(c) => c.hash(state),
            Self::Str(s) => s.hash(state),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "Int({n})"),
            Self::Float(n) => write!(f, "Float({n})"),
            Self::Char(c) => write!(f, "Char({c:?})"),
            Self::Str(s) => write!(f, "Str({s:?})"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n:?}"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}
