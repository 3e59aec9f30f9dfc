//! The interactive REPL.
//!
//! The REPL does not tokenize input itself. It installs an [`EditorInput`] as
//! the machine's input source and calls [`Machine::run`](threadcell_engine::Machine::run),
//! so the outer interpreter pulls lines from the editor on demand and a
//! definition may span several lines.

use std::cell::RefCell;
use std::rc::Rc;

use threadcell_engine::{Console, OutputSink, Shutdown};
use threadcell_foundation::Result;

use crate::editor::{EditorInput, LineEditor, RustylineEditor};
use crate::session::Session;

/// The interactive REPL.
pub struct Repl<E: LineEditor + 'static = RustylineEditor> {
    /// The line editor, shared with the input adapter while running.
    editor: Rc<RefCell<E>>,

    /// Session state (machine, pristine image, settings).
    session: Session,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL over `session` using rustyline.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new(session.config().history_size)?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor + 'static> Repl<E> {
    /// Creates a REPL with the given editor.
    pub fn with_editor(editor: E, session: Session) -> Self {
        Self {
            editor: Rc::new(RefCell::new(editor)),
            session,
        }
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Consumes the REPL, returning its session.
    #[must_use]
    pub fn into_session(self) -> Session {
        self.session
    }

    /// Runs the REPL against the console until `BYE` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if the machine was never bootstrapped.
    pub fn run(&mut self) -> Result<Shutdown> {
        self.run_with_output(Console)
    }

    /// Runs the REPL, sending all machine output and the banner to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the machine was never bootstrapped.
    pub fn run_with_output(&mut self, mut output: impl OutputSink + 'static) -> Result<Shutdown> {
        let config = self.session.config().clone();
        if config.banner {
            output.write_str(&banner())?;
        }

        let keywords = self
            .session
            .machine()
            .dictionary()
            .visible_names()
            .iter()
            .map(ToString::to_string)
            .collect();
        let input = EditorInput::new(Rc::clone(&self.editor), config.prompt).with_keywords(keywords);

        let machine = self.session.machine_mut();
        machine.set_output(output);
        machine.set_input(input);
        let reason = machine.run();
        machine.set_output(Console);

        let reason = reason?;
        tracing::info!(%reason, "repl finished");
        Ok(reason)
    }
}

fn banner() -> String {
    format!(
        "threadcell {}\nType BYE or press Ctrl+D to exit, WORDS to list the dictionary.\n",
        env!("CARGO_PKG_VERSION")
    )
}
