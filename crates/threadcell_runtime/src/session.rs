//! Session state shared by the REPL and the CLI.
//!
//! A session owns a machine bootstrapped with the kernel and the standard
//! library, with the prelude already evaluated, plus a snapshot of that
//! pristine image for [`Session::reset`].

use std::fs;
use std::path::Path;

use threadcell_engine::{Bootstrap, CapturedOutput, Console, Image, Machine, Shutdown};
use threadcell_foundation::{Error, ErrorKind, Result};
use threadcell_stdlib::{LIBRARY, PRELUDE};

use crate::config::RuntimeConfig;

/// A bootstrapped machine plus its pristine image.
#[derive(Debug)]
pub struct Session {
    machine: Machine,
    pristine: Image,
    config: RuntimeConfig,
}

impl Session {
    /// Creates a session with the default configuration.
    ///
    /// # Errors
    ///
    /// Fails if bootstrap fails or the prelude raises an error.
    pub fn new() -> Result<Self> {
        Self::with_config(RuntimeConfig::default())
    }

    /// Creates a session with `config`.
    ///
    /// # Errors
    ///
    /// Fails if bootstrap fails or the prelude raises an error.
    pub fn with_config(config: RuntimeConfig) -> Result<Self> {
        let mut machine = Machine::new(config.engine.clone());
        Bootstrap::new().with_library(LIBRARY).install(&mut machine)?;

        if config.prelude {
            machine.set_output(CapturedOutput::new());
            machine.run_source(PRELUDE)?;
            if let Some(err) = machine.take_recovered_errors().into_iter().next() {
                return Err(err);
            }
        }
        machine.set_output(Console);

        let pristine = machine.snapshot();
        tracing::debug!(prelude = config.prelude, "session ready");
        Ok(Self {
            machine,
            pristine,
            config,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Returns the machine.
    #[must_use]
    pub const fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Returns the machine mutably.
    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    /// Runs `source` to the end of its input and returns what it printed.
    ///
    /// # Errors
    ///
    /// Returns the first error the engine recovered from while running
    /// `source`. Definitions made before the error stay in place.
    pub fn eval(&mut self, source: &str) -> Result<String> {
        let out = CapturedOutput::new();
        self.machine.set_output(out.clone());
        self.machine.take_recovered_errors();
        let result = self.machine.run_source(source);
        self.machine.set_output(Console);
        result?;

        match self.machine.take_recovered_errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(out.take()),
        }
    }

    /// Runs a source file, writing its output to the console.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be read, or the first error
    /// the engine recovered from while running it.
    pub fn load_file(&mut self, path: &Path) -> Result<Shutdown> {
        let source = fs::read_to_string(path)
            .map_err(|e| Error::new(ErrorKind::Io(format!("{}: {e}", path.display()))))?;
        tracing::info!(path = %path.display(), "loading");

        self.machine.take_recovered_errors();
        let reason = self.machine.run_source(&source)?;
        match self.machine.take_recovered_errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(reason),
        }
    }

    /// Restores the image captured when the session was created and clears
    /// both stacks.
    ///
    /// # Errors
    ///
    /// Fails only if the machine lost its kernel, which cannot happen for a
    /// session built by [`Session::with_config`].
    pub fn reset(&mut self) -> Result<()> {
        self.machine.restore(&self.pristine)?;
        self.machine.take_recovered_errors();
        tracing::debug!("session reset");
        Ok(())
    }
}
