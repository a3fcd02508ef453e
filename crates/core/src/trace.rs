//! Trace sink - optional human-readable event output
//!
//! The engine holds no global logger state. A game state is handed a sink and reports
//! noteworthy transitions to it; what happens to those lines is the host's business.

use std::fmt;
use std::sync::Arc;

/// Log target used by [`LogSink`]
pub const LOG_TARGET: &str = "tetromino_rules";

/// Receiver for engine trace lines
pub trait TraceSink: Send + Sync {
    fn trace(&self, args: fmt::Arguments<'_>);
}

/// Forwards to the `log` facade at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn trace(&self, args: fmt::Arguments<'_>) {
        log::debug!(target: LOG_TARGET, "{}", args);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn trace(&self, _args: fmt::Arguments<'_>) {}
}

/// Shared handle to a sink
#[derive(Clone)]
pub struct Tracer(Arc<dyn TraceSink>);

impl Tracer {
    pub fn new(sink: impl TraceSink + 'static) -> Self {
        Self(Arc::new(sink))
    }

    pub fn from_arc(sink: Arc<dyn TraceSink>) -> Self {
        Self(sink)
    }

    #[inline]
    pub fn emit(&self, args: fmt::Arguments<'_>) {
        self.0.trace(args);
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new(LogSink)
    }
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Tracer")
    }
}
