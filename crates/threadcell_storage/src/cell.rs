//! The content of one address.

use std::fmt;

use threadcell_foundation::{Address, Value};

/// Handle to a native primitive in the engine's primitive table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub u32);

impl PrimitiveId {
    /// Returns the table index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One addressable unit of memory.
///
/// The engine classifies a cell only when IP reaches it.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Cell {
    /// A bound native primitive behavior.
    NativeOp(PrimitiveId),
    /// Continue execution at this address.
    ThreadRef(Address),
    /// Inert data embedded in the instruction stream.
    Literal(Value),
    /// Never written.
    #[default]
    Empty,
}

impl Cell {
    /// Returns true if nothing was ever written here.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the literal payload, if any.
    #[must_use]
    pub const fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the jump target, if this is a thread reference.
    #[must_use]
    pub const fn as_thread_ref(&self) -> Option<Address> {
        match self {
            Self::ThreadRef(a) => Some(*a),
            _ => None,
        }
    }

    /// Reads this cell as data, the way `@` does.
    ///
    /// Literals yield their payload and thread references yield their target
    /// address. Native ops and empty cells hold no data.
    #[must_use]
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::Literal(v) => Some(v.clone()),
            Self::ThreadRef(a) => Some(Value::Int(*a)),
            Self::NativeOp(_) | Self::Empty => None,
        }
    }
}

impl From<Value> for Cell {
    fn from(v: Value) -> Self {
        Self::Literal(v)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NativeOp(id) => write!(f, "native#{}", id.0),
            Self::ThreadRef(a) => write!(f, "->{a}"),
            Self::Literal(v) => write!(f, "{v:?}"),
            Self::Empty => f.write_str("empty"),
        }
    }
}
