//! Workspace-level integration tests
//!
//! These exercise every layer together through a runtime session.

mod programs;
mod snapshots;

use threadcell::engine::EngineConfig;
use threadcell::runtime::{RuntimeConfig, Session};

/// A session with the prelude loaded and error reports suppressed.
pub fn session() -> Session {
    Session::with_config(RuntimeConfig::new().with_engine(EngineConfig::quiet())).unwrap()
}
