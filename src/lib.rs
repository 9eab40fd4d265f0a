//! # Rust Log Dispatch
//!
//! Leveled, categorized logging with a bounded asynchronous dispatcher and
//! pluggable output targets.
//!
//! ## Features
//!
//! - **Asynchronous Dispatch**: One dispatcher thread per engine fans entries
//!   out to every target, with blocking backpressure on a bounded queue
//! - **Categories**: Cheap logger handles share one engine and differ only in
//!   category and formatter
//! - **Fatal Drain**: Fatal messages flush everything logged before them, then
//!   optionally panic or exit
//! - **Call Stacks**: Optional, filtered stack traces attached to entries

pub mod core;
pub mod macros;
pub mod targets;

pub mod prelude {
    pub use crate::core::{
        formatter, DispatchEngine, DispatchMetrics, EngineSettings, ErrorSink, FatalAction,
        Formatter, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerWriter, Result, Target,
    };
    pub use crate::targets::ConsoleTarget;
    #[cfg(feature = "file")]
    pub use crate::targets::FileTarget;
}

pub use crate::core::{
    formatter, DispatchEngine, DispatchMetrics, EngineSettings, ErrorSink, FatalAction, Formatter,
    LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerWriter, Result,
    Target, DEFAULT_BUFFER_SIZE, DEFAULT_CATEGORY,
};
pub use targets::ConsoleTarget;
#[cfg(feature = "file")]
pub use targets::FileTarget;
