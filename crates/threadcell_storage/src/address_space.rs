//! Flat, append-oriented memory.
//!
//! The address space maps integer addresses to [`Cell`]s. It never shrinks
//! and performs no validation; unwritten addresses read as [`Cell::Empty`].
//! Backed by a persistent ordered map, so cloning is O(1) and a clone is a
//! full snapshot of memory.

use threadcell_foundation::Address;

use crate::cell::Cell;

static EMPTY: Cell = Cell::Empty;

/// Flat mapping from address to cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddressSpace {
    cells: im::OrdMap<Address, Cell>,
}

impl AddressSpace {
    /// Creates an empty address space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a cell.
    pub fn set(&mut self, address: Address, cell: Cell) {
        self.cells.insert(address, cell);
    }

    /// Reads a cell; [`Cell::Empty`] if never written.
    #[must_use]
    pub fn get(&self, address: Address) -> &Cell {
        self.cells.get(&address).unwrap_or(&EMPTY)
    }

    /// Number of written cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Highest written address.
    #[must_use]
    pub fn highest(&self) -> Option<Address> {
        self.cells.get_max().map(|(a, _)| *a)
    }

    /// Iterates written cells with addresses in `from..to`, in order.
    pub fn range(&self, from: Address, to: Address) -> impl Iterator<Item = (Address, &Cell)> {
        self.cells.range(from..to).map(|(a, c)| (*a, c))
    }
}
