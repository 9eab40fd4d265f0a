//! Core logger types and traits

pub mod call_stack;
pub mod config;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
mod pending;
pub mod target;
pub mod writer;

pub use config::LoggerConfig;
pub use engine::{DispatchEngine, EngineSettings, DEFAULT_BUFFER_SIZE, FATAL_CALL_STACK_DEPTH};
pub use error::{LoggerError, Result};
pub use formatter::Formatter;
pub use log_entry::LogEntry;
pub use log_level::{FatalAction, LogLevel};
pub use logger::{Logger, LoggerBuilder, DEFAULT_CATEGORY};
pub use metrics::DispatchMetrics;
pub use target::{ErrorSink, Target};
pub use writer::LoggerWriter;
