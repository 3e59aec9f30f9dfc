//! Address space, dictionary, and stacks for threadcell.
//!
//! This crate provides:
//! - [`Cell`] - The closed variant stored at every address
//! - [`AddressSpace`] - Flat, append-oriented memory with structural sharing
//! - [`Dictionary`] - Name chains with shadowing, hiding, and reverse lookup
//! - [`Stack`] - LIFO with bottom-indexed access and truncation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod address_space;
pub mod cell;
pub mod dictionary;
pub mod stack;

pub use address_space::AddressSpace;
pub use cell::{Cell, PrimitiveId};
pub use dictionary::{Dictionary, DictionaryEntry};
pub use stack::Stack;
