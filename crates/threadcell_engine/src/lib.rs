//! Threaded-code execution engine for threadcell.
//!
//! This crate provides:
//! - [`Machine`] - Execution state and the per-cell dispatch loop
//! - [`Bootstrap`] - One-shot installation of variables and primitives
//! - [`Primitive`] - Native behaviors with a declared [`ControlFlow`]
//! - [`classify`] - The outer interpreter's token classification
//! - [`InputSource`] / [`OutputSink`] - The I/O collaborators
//! - [`KERNEL`] - The words the engine itself depends on

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bootstrap;
pub mod config;
pub mod interpreter;
pub mod io;
pub mod kernel;
pub mod machine;
pub mod primitive;
pub mod variables;


pub use bootstrap::Bootstrap;
pub use config::EngineConfig;
pub use interpreter::{Token, classify};
pub use io::{CapturedOutput, Console, InputSource, OutputSink, StringInput};
pub use kernel::{KERNEL, MAX_ALLOT, decompile};
pub use machine::{Image, KernelAddresses, Machine, Shutdown, Status};
pub use primitive::{ControlFlow, Primitive, PrimitiveFn, PrimitiveTable};
pub use variables::{FIRST_PRIMITIVE, Mode, Variable};
