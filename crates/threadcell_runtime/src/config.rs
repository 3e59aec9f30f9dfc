//! Runtime configuration.

use threadcell_engine::EngineConfig;
use tracing::level_filters::LevelFilter;

/// Settings for a [`Session`](crate::Session) and its [`Repl`](crate::Repl).
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Print the welcome banner when the REPL starts.
    pub banner: bool,
    /// Prompt shown for each input line.
    pub prompt: String,
    /// Evaluate the control-flow prelude at startup.
    pub prelude: bool,
    /// Maximum number of history entries kept by the line editor.
    pub history_size: usize,
    /// Most verbose level written to stderr.
    pub log_level: LevelFilter,
    /// Engine settings.
    pub engine: EngineConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            banner: true,
            prompt: "tc> ".to_string(),
            prelude: true,
            history_size: 1000,
            log_level: LevelFilter::WARN,
            engine: EngineConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows or hides the banner.
    #[must_use]
    pub fn with_banner(mut self, banner: bool) -> Self {
        self.banner = banner;
        self
    }

    /// Sets the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Enables or disables the prelude.
    #[must_use]
    pub fn with_prelude(mut self, prelude: bool) -> Self {
        self.prelude = prelude;
        self
    }

    /// Sets the history size. Zero is treated as one.
    #[must_use]
    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size.max(1);
        self
    }

    /// Sets the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    /// Replaces the engine settings.
    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}
