//! REPL, CLI, and session management for threadcell.
//!
//! This crate provides:
//! - [`Session`] - A bootstrapped machine with the library and prelude loaded
//! - [`Repl`] - Interactive loop driving the engine from a line editor
//! - [`RuntimeConfig`] - Banner, prompt, prelude, history, and log settings
//! - [`logging::init`] - `tracing` subscriber setup for the CLI

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod highlight;
pub mod logging;
pub mod repl;
pub mod session;

pub use config::RuntimeConfig;
pub use editor::{EditorInput, LineEditor, ReadResult, RustylineEditor};
pub use highlight::ThreadcellHighlighter;
pub use repl::Repl;
pub use session::Session;
