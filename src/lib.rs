//! threadcell - Threaded-code virtual machine for a Forth-family language
//!
//! This crate re-exports all layers of the threadcell system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: threadcell_runtime    — Session, REPL, CLI, logging setup
//! Layer 3: threadcell_stdlib     — Library words and the control-flow prelude
//! Layer 2: threadcell_engine     — Machine, dispatch loop, bootstrap, kernel words
//! Layer 1: threadcell_storage    — Cells, address space, dictionary, stacks
//! Layer 0: threadcell_foundation — Core types (Value, Number, Error)
//! ```

pub use threadcell_engine as engine;
pub use threadcell_foundation as foundation;
pub use threadcell_runtime as runtime;
pub use threadcell_stdlib as stdlib;
pub use threadcell_storage as storage;
