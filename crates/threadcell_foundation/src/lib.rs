//! Core values, numeric tower, and error types for threadcell.
//!
//! This crate provides:
//! - [`Value`] - The opaque payload carried by literal cells and both stacks
//! - [`Type`] - Type descriptors used in error reporting
//! - [`Number`] - The closed numeric tower with its promotion ranks
//! - [`Error`] - Rich error types with context
//! - Radix-aware number parsing and formatting ([`parse_number`], [`format_number`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod number;
pub mod types;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind, StackKind};
pub use number::{Number, Rank, format_number, parse_number, promote};
pub use types::Type;
pub use value::Value;

/// A cell address in the flat address space.
///
/// Addresses are plain integers: they are pushed on stacks, stored in cells,
/// and subject to ordinary arithmetic.
pub type Address = i64;

/// Result type for threadcell operations.
pub type Result<T> = std::result::Result<T, Error>;
