//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log message.
///
/// Lower values are more severe. A logger configured with a maximum level
/// accepts every message whose level is less than or equal to it, so
/// `LogLevel::Debug` lets everything through and `LogLevel::Fatal` only
/// fatal messages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum LogLevel {
    Fatal = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    #[default]
    Debug = 4,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "Fatal",
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
        }
    }

    /// Resolve a level by name, ignoring case.
    ///
    /// Returns `None` for names that do not denote a level; there is no
    /// fallback level.
    ///
    /// ```
    /// use rust_log_dispatch::LogLevel;
    ///
    /// assert_eq!(LogLevel::lookup("debug"), Some(LogLevel::Debug));
    /// assert_eq!(LogLevel::lookup("Debug"), Some(LogLevel::Debug));
    /// assert_eq!(LogLevel::lookup("verbose"), None);
    /// ```
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.to_str().eq_ignore_ascii_case(name))
    }

    /// Whether a message at this level passes a logger whose maximum level is `max`
    #[inline]
    pub fn passes(self, max: LogLevel) -> bool {
        self <= max
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| format!("Invalid log level: '{}'", s))
    }
}

/// What a fatal log call does once every pending entry has been dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FatalAction {
    /// Return to the caller
    #[default]
    Nothing,
    /// Panic on the calling thread
    Panic,
    /// Emit a final warning and terminate the process
    Exit,
}

impl fmt::Display for FatalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatalAction::Nothing => write!(f, "Nothing"),
            FatalAction::Panic => write!(f, "Panic"),
            FatalAction::Exit => write!(f, "Exit"),
        }
    }
}
