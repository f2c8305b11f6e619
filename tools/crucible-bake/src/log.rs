//! Build logging channels.
//!
//! Conversion code reports progress through [`ContentLogger`] and never
//! decides verbosity policy itself. Plain messages are routine diagnostics
//! the logger may drop; important messages must reach the user; warnings
//! carry the identity of the source file they concern.

/// Logging channels available to conversion code.
pub trait ContentLogger {
    /// Routine diagnostic. May be dropped outside verbose builds.
    fn message(&self, text: &str);

    /// Diagnostic shown regardless of verbosity.
    fn important(&self, text: &str);

    /// Warning tied to a source file.
    fn warning(&self, source: &str, text: &str);
}

/// Forwards build messages to `tracing`.
pub struct TracingLogger {
    verbose: bool,
}

impl TracingLogger {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ContentLogger for TracingLogger {
    fn message(&self, text: &str) {
        if self.verbose {
            tracing::info!("{}", text);
        } else {
            tracing::debug!("{}", text);
        }
    }

    fn important(&self, text: &str) {
        tracing::info!("{}", text);
    }

    fn warning(&self, source: &str, text: &str) {
        tracing::warn!("{}: {}", source, text);
    }
}

/// Discards everything. For callers that have no use for build output.
pub struct NullLogger;

impl ContentLogger for NullLogger {
    fn message(&self, _text: &str) {}
    fn important(&self, _text: &str) {}
    fn warning(&self, _source: &str, _text: &str) {}
}
