//! Fixed variable slots at the bottom of the address space.

use std::fmt;

use threadcell_foundation::Address;

/// A bootstrapped variable with a fixed address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variable {
    /// Next free compile address.
    Here,
    /// 0 while interpreting, 1 while compiling.
    State,
    /// Numeric radix for parsing and printing.
    Base,
    /// Address of the most recent definition.
    Latest,
}

impl Variable {
    /// Every variable, in slot order.
    pub const ALL: [Self; 4] = [Self::Here, Self::State, Self::Base, Self::Latest];

    /// The variable's slot.
    #[must_use]
    pub const fn address(self) -> Address {
        match self {
            Self::Here => 0,
            Self::State => 1,
            Self::Base => 2,
            Self::Latest => 3,
        }
    }

    /// The dictionary name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Here => "HERE",
            Self::State => "STATE",
            Self::Base => "BASE",
            Self::Latest => "LATEST",
        }
    }

    /// Value written by bootstrap before any primitive is installed.
    #[must_use]
    pub const fn initial(self) -> i64 {
        match self {
            Self::Base => 10,
            Self::Here | Self::State | Self::Latest => 0,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First address after the variable slots.
pub const FIRST_PRIMITIVE: Address = 4;

/// Interpreter mode, as stored in `STATE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Tokens execute immediately.
    Interpret,
    /// Tokens are appended at `HERE`.
    Compile,
}

impl Mode {
    /// Decodes a `STATE` value. Any nonzero value means compile.
    #[must_use]
    pub const fn from_state(state: i64) -> Self {
        if state == 0 {
            Self::Interpret
        } else {
            Self::Compile
        }
    }

    /// The `STATE` encoding.
    #[must_use]
    pub const fn to_state(self) -> i64 {
        match self {
            Self::Interpret => 0,
            Self::Compile => 1,
        }
    }
}
