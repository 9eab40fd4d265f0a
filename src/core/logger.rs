//! Logger facade
//!
//! A [`Logger`] is a cheap handle pairing a category and a formatter with a
//! shared [`DispatchEngine`]. Loggers derived with [`Logger::get_logger`]
//! share the engine of their parent, so one queue, one dispatcher thread and
//! one set of targets serve the whole family.

use super::{
    engine::{DispatchEngine, EngineSettings},
    error::Result,
    formatter::{self, Formatter},
    log_level::{FatalAction, LogLevel},
    metrics::DispatchMetrics,
    target::{ErrorSink, Target},
    writer::LoggerWriter,
};
use crate::targets::ConsoleTarget;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// Category used by root loggers created without one
pub const DEFAULT_CATEGORY: &str = "app";

#[derive(Clone)]
pub struct Logger {
    core: Arc<DispatchEngine>,
    category: String,
    formatter: Formatter,
}

impl Logger {
    /// Create a root logger with a console target, opened immediately.
    ///
    /// Defaults: error sink stderr, buffer size 1024, maximum level Debug,
    /// normal formatter.
    #[must_use]
    pub fn new(category: impl Into<String>) -> Self {
        let core = DispatchEngine::new(
            EngineSettings::default(),
            vec![Box::new(ConsoleTarget::new())],
        );
        if let Err(e) = core.open() {
            eprintln!("[LOGGER ERROR] Failed to open logger: {}", e);
        }
        Self::from_engine(Arc::new(core), category, formatter::normal())
    }

    /// Wrap an existing engine
    pub fn from_engine(
        core: Arc<DispatchEngine>,
        category: impl Into<String>,
        formatter: Formatter,
    ) -> Self {
        Self {
            core,
            category: category.into(),
            formatter,
        }
    }

    /// Derive a logger with another category sharing this logger's engine
    /// and formatter.
    #[must_use]
    pub fn get_logger(&self, category: impl Into<String>) -> Logger {
        Self::from_engine(Arc::clone(&self.core), category, Arc::clone(&self.formatter))
    }

    /// Derive a logger with another category and formatter sharing this
    /// logger's engine.
    #[must_use]
    pub fn get_logger_with_formatter(
        &self,
        category: impl Into<String>,
        formatter: Formatter,
    ) -> Logger {
        Self::from_engine(Arc::clone(&self.core), category, formatter)
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn engine(&self) -> &Arc<DispatchEngine> {
        &self.core
    }

    pub fn open(&self) -> Result<()> {
        self.core.open()
    }

    /// Close the shared engine. Entries logged before this call are
    /// delivered before the targets are closed; later ones are discarded.
    pub fn close(&self) {
        self.core.close();
    }

    pub fn is_open(&self) -> bool {
        self.core.is_open()
    }

    /// Toggle synchronous delivery on the logging thread.
    ///
    /// Sync mode belongs to the shared engine: enabling it here enables it
    /// for every logger derived from the same root. Entries queued before
    /// the switch may still be in flight when later entries are delivered
    /// synchronously.
    pub fn sync(&self, enabled: bool) {
        self.core.set_sync(enabled);
    }

    /// Replace all targets of the shared engine; see [`DispatchEngine::set_targets`]
    pub fn set_targets(&self, targets: Vec<Box<dyn Target>>) -> Result<()> {
        self.core.set_targets(targets)
    }

    pub fn add_target<T: Target + 'static>(&self, target: T) -> Result<()> {
        self.core.add_targets(vec![Box::new(target)])
    }

    pub fn add_targets(&self, targets: Vec<Box<dyn Target>>) -> Result<()> {
        self.core.add_targets(targets)
    }

    pub fn set_fatal_action(&self, action: FatalAction) {
        self.core.set_fatal_action(action);
    }

    pub fn set_max_level(&self, level: LogLevel) {
        self.core.set_max_level(level);
    }

    /// Set the maximum level by name. Unknown names leave the level
    /// unchanged and return `false`.
    pub fn set_level(&self, name: &str) -> bool {
        match LogLevel::lookup(name) {
            Some(level) => {
                self.core.set_max_level(level);
                true
            }
            None => false,
        }
    }

    pub fn max_level(&self) -> LogLevel {
        self.core.max_level()
    }

    pub fn set_call_stack(&self, depth: usize, filter: impl Into<String>) {
        self.core.set_call_stack(depth, filter);
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        self.core.metrics()
    }

    /// Adapter turning each write into one log call at `level`
    pub fn writer(&self, level: LogLevel) -> LoggerWriter {
        LoggerWriter::new(self.clone(), level)
    }

    /// Log a message at `level`.
    ///
    /// Messages above the maximum level, or logged while the engine is
    /// closed, are discarded without formatting. A fatal message is
    /// delivered immediately, then the call waits until every earlier entry
    /// has been dispatched before carrying out the fatal action.
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        self.core.submit(self, level, format_args!("{}", message), 0);
    }

    /// Log a pre-built format, usually through [`format_args!`] or the
    /// crate's logging macros. Formatting happens only if the entry passes
    /// the level gate.
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.core.submit(self, level, args, 0);
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.core.submit(self, LogLevel::Debug, format_args!("{}", message), 0);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.core.submit(self, LogLevel::Info, format_args!("{}", message), 0);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.core.submit(self, LogLevel::Warn, format_args!("{}", message), 0);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.core.submit(self, LogLevel::Error, format_args!("{}", message), 0);
    }

    pub fn fatal(&self, message: impl fmt::Display) {
        self.core.submit(self, LogLevel::Fatal, format_args!("{}", message), 0);
    }

    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.core.submit(self, LogLevel::Debug, args, 0);
    }

    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.core.submit(self, LogLevel::Info, args, 0);
    }

    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.core.submit(self, LogLevel::Warn, args, 0);
    }

    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.core.submit(self, LogLevel::Error, args, 0);
    }

    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.core.submit(self, LogLevel::Fatal, args, 0);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("category", &self.category)
            .field("engine", &self.core)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a root Logger with a fluent API
///
/// # Example
/// ```
/// use rust_log_dispatch::prelude::*;
///
/// let logger = Logger::builder()
///     .category("worker")
///     .max_level(LogLevel::Info)
///     .buffer_size(256)
///     .target(ConsoleTarget::with_colors(false))
///     .build()
///     .unwrap();
///
/// logger.info("worker started");
/// logger.close();
/// ```
pub struct LoggerBuilder {
    settings: EngineSettings,
    targets: Vec<Box<dyn Target>>,
    default_target: bool,
    category: String,
    formatter: Formatter,
}

impl LoggerBuilder {
    /// Create a new builder with the root logger defaults
    pub fn new() -> Self {
        Self {
            settings: EngineSettings::default(),
            targets: Vec::new(),
            default_target: true,
            category: DEFAULT_CATEGORY.to_string(),
            formatter: formatter::normal(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Destination for errors about logging itself
    #[must_use = "builder methods return a new value"]
    pub fn error_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.settings.error_sink = Some(ErrorSink::new(writer));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn error_sink(mut self, sink: Option<ErrorSink>) -> Self {
        self.settings.error_sink = sink;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.settings.buffer_size = size;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn call_stack_depth(mut self, depth: usize) -> Self {
        self.settings.call_stack_depth = depth;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn call_stack_filter(mut self, filter: impl Into<String>) -> Self {
        self.settings.call_stack_filter = filter.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_level(mut self, level: LogLevel) -> Self {
        self.settings.max_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sync_mode(mut self, enabled: bool) -> Self {
        self.settings.sync_mode = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fatal_action(mut self, action: FatalAction) -> Self {
        self.settings.fatal_action = action;
        self
    }

    /// Add a target. Any explicit target replaces the default console target.
    #[must_use = "builder methods return a new value"]
    pub fn target<T: Target + 'static>(mut self, target: T) -> Self {
        self.targets.push(Box::new(target));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_target(mut self, target: Box<dyn Target>) -> Self {
        self.targets.push(target);
        self
    }

    /// Do not fall back to a console target when no target was added
    #[must_use = "builder methods return a new value"]
    pub fn no_default_target(mut self) -> Self {
        self.default_target = false;
        self
    }

    /// Apply already validated settings, keeping the error sink configured
    /// on this builder.
    #[must_use = "builder methods return a new value"]
    pub fn settings(mut self, settings: EngineSettings) -> Self {
        let error_sink = self.settings.error_sink.take();
        self.settings = EngineSettings {
            error_sink,
            ..settings
        };
        self
    }

    /// Build and open the root logger
    ///
    /// # Errors
    ///
    /// Fails if the engine cannot be opened, e.g. without an error sink.
    pub fn build(self) -> Result<Logger> {
        let mut targets = self.targets;
        if targets.is_empty() && self.default_target {
            targets.push(Box::new(ConsoleTarget::new()));
        }

        let core = DispatchEngine::new(self.settings, targets);
        core.open()?;
        Ok(Logger::from_engine(Arc::new(core), self.category, self.formatter))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for a root Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
