//! Serializable logger settings
//!
//! [`LoggerConfig`] mirrors the engine settings in a form that can come
//! from a JSON document or any other serde source. Sizes are signed so that
//! out-of-range values surface as configuration errors instead of
//! deserialization failures.

use super::{
    engine::{EngineSettings, DEFAULT_BUFFER_SIZE},
    error::{LoggerError, Result},
    log_level::{FatalAction, LogLevel},
    logger::{LoggerBuilder, DEFAULT_CATEGORY},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub category: String,
    pub buffer_size: i64,
    pub call_stack_depth: i64,
    pub call_stack_filter: String,
    /// Level name, matched case-insensitively
    pub max_level: String,
    pub sync_mode: bool,
    pub fatal_action: FatalAction,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE as i64,
            call_stack_depth: 0,
            call_stack_filter: String::new(),
            max_level: LogLevel::Debug.to_str().to_string(),
            sync_mode: false,
            fatal_action: FatalAction::Nothing,
        }
    }
}

impl LoggerConfig {
    /// Parse settings from a JSON document; missing keys keep their defaults
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Check the values and convert them into engine settings.
    ///
    /// The returned settings carry the default error sink (stderr).
    pub fn validate(&self) -> Result<EngineSettings> {
        let buffer_size = usize::try_from(self.buffer_size)
            .map_err(|_| LoggerError::config("Logger", "buffer_size must be no less than 0"))?;
        let call_stack_depth = usize::try_from(self.call_stack_depth).map_err(|_| {
            LoggerError::config("Logger", "call_stack_depth must be no less than 0")
        })?;
        let max_level = LogLevel::lookup(&self.max_level).ok_or_else(|| {
            LoggerError::config("Logger", format!("unknown level '{}'", self.max_level))
        })?;

        Ok(EngineSettings {
            buffer_size,
            call_stack_depth,
            call_stack_filter: self.call_stack_filter.clone(),
            max_level,
            sync_mode: self.sync_mode,
            fatal_action: self.fatal_action,
            ..EngineSettings::default()
        })
    }
}

impl LoggerBuilder {
    /// Start a builder from validated settings
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let settings = config.validate()?;
        Ok(LoggerBuilder::new()
            .category(config.category.clone())
            .settings(settings))
    }
}
