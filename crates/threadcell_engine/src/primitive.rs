//! Native primitives and the table that binds them to [`PrimitiveId`]s.

use threadcell_foundation::{Error, Result};
use threadcell_storage::PrimitiveId;

use crate::machine::Machine;

/// Signature of a native primitive behavior.
pub type PrimitiveFn = fn(&mut Machine) -> Result<()>;

/// Who moves IP after a primitive returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlFlow {
    /// The engine advances IP to the next cell.
    Advance,
    /// The primitive assigns IP (and NIP) itself.
    Owned,
}

/// A named native behavior with its dictionary metadata.
#[derive(Clone, Copy, Debug)]
pub struct Primitive {
    /// Dictionary name.
    pub name: &'static str,
    /// Executes even while compiling.
    pub immediate: bool,
    /// Installed hidden from the outer interpreter.
    pub hidden: bool,
    /// Declared control-flow capability.
    pub control: ControlFlow,
    /// The behavior.
    pub func: PrimitiveFn,
}

impl Primitive {
    /// A primitive after which the engine advances IP.
    #[must_use]
    pub const fn new(name: &'static str, func: PrimitiveFn) -> Self {
        Self {
            name,
            immediate: false,
            hidden: false,
            control: ControlFlow::Advance,
            func,
        }
    }

    /// A primitive that sets IP itself.
    #[must_use]
    pub const fn owning(name: &'static str, func: PrimitiveFn) -> Self {
        Self {
            control: ControlFlow::Owned,
            ..Self::new(name, func)
        }
    }

    /// Marks the primitive immediate.
    #[must_use]
    pub const fn immediate(mut self) -> Self {
        self.immediate = true;
        self
    }

    /// Marks the primitive hidden.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Registered primitives, indexed by [`PrimitiveId`].
#[derive(Clone, Debug, Default)]
pub struct PrimitiveTable {
    entries: Vec<Primitive>,
}

impl PrimitiveTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a primitive and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns an internal error once the handle space is exhausted.
    pub fn register(&mut self, primitive: Primitive) -> Result<PrimitiveId> {
        let index = u32::try_from(self.entries.len())
            .map_err(|_| Error::internal("primitive table overflow"))?;
        self.entries.push(primitive);
        Ok(PrimitiveId(index))
    }

    /// Looks up a primitive by handle.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the handle was never registered.
    pub fn get(&self, id: PrimitiveId) -> Result<&Primitive> {
        self.entries
            .get(id.index())
            .ok_or_else(|| Error::internal(format!("unbound primitive #{}", id.0)))
    }

    /// Finds the most recently registered primitive with `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<PrimitiveId> {
        self.entries
            .iter()
            .rposition(|p| p.name.eq_ignore_ascii_case(name))
            .and_then(|i| u32::try_from(i).ok())
            .map(PrimitiveId)
    }

    /// Number of registered primitives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
