//! Engine configuration.

/// Configuration for a [`Machine`](crate::Machine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Emit a `tracing` event for every step.
    pub trace_steps: bool,

    /// Write recovered errors and their backtraces to the output sink.
    pub report_errors: bool,

    /// Stop `run` after this many steps.
    pub step_limit: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trace_steps: false,
            report_errors: true,
            step_limit: None,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration that records errors without printing them.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            report_errors: false,
            ..Self::default()
        }
    }

    /// Builder method to set per-step tracing.
    #[must_use]
    pub fn with_trace_steps(mut self, trace_steps: bool) -> Self {
        self.trace_steps = trace_steps;
        self
    }

    /// Builder method to set error reporting.
    #[must_use]
    pub fn with_report_errors(mut self, report_errors: bool) -> Self {
        self.report_errors = report_errors;
        self
    }

    /// Builder method to set the step limit.
    #[must_use]
    pub fn with_step_limit(mut self, step_limit: Option<u64>) -> Self {
        self.step_limit = step_limit;
        self
    }
}
