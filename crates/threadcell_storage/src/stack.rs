//! LIFO stack with bottom-indexed random access.
//!
//! Index 0 is the bottom. The "pointer" is the index of the current top, so a
//! stack of depth `n` has pointer `n - 1`. Truncation via
//! [`set_pointer`](Stack::set_pointer) keeps everything up to and including the
//! given index.

use threadcell_foundation::{Error, Result, StackKind};

/// A LIFO stack tagged with the role it plays.
#[derive(Clone, Debug)]
pub struct Stack<T> {
    kind: StackKind,
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    #[must_use]
    pub fn new(kind: StackKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    /// Which stack this is.
    #[must_use]
    pub fn kind(&self) -> StackKind {
        self.kind
    }

    /// Pushes onto the top.
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Removes and returns the top.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn pop(&mut self) -> Result<T> {
        self.items
            .pop()
            .ok_or_else(|| Error::stack_underflow(self.kind))
    }

    /// Returns the top without removing it.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn peek(&self) -> Result<&T> {
        self.items
            .last()
            .ok_or_else(|| Error::stack_underflow(self.kind))
    }

    /// Index of the current top.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn pointer(&self) -> Result<usize> {
        self.items
            .len()
            .checked_sub(1)
            .ok_or_else(|| Error::stack_underflow(self.kind))
    }

    /// Truncates everything above `index`; afterwards `pointer() == index`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStackPointer` if `index` is not a live slot.
    pub fn set_pointer(&mut self, index: usize) -> Result<()> {
        self.check(index)?;
        self.items.truncate(index + 1);
        Ok(())
    }

    /// Reads the slot at `index` without mutation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStackPointer` if `index` is not a live slot.
    pub fn item(&self, index: usize) -> Result<&T> {
        self.check(index)?;
        Ok(&self.items[index])
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(Error::invalid_stack_pointer(
                self.kind,
                i64::try_from(index).unwrap_or(i64::MAX),
                self.items.len(),
            ))
        }
    }

    /// Current depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the stack holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates bottom to top.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Contents, bottom first.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
