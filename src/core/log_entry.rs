//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

fn current_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

fn current_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// One log occurrence.
///
/// Entries are built on the producer thread, rendered once by the logger's
/// formatter and then handed to the dispatch path, which only ever reads them.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub category: String,
    pub message: String,
    pub timestamp: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_stack: Option<String>,
    pub thread_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_name: Option<String>,
    #[serde(skip)]
    pub formatted_message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            category: category.into(),
            message: message.into(),
            timestamp: Local::now(),
            call_stack: None,
            thread_id: current_thread_id(),
            thread_name: current_thread_name(),
            formatted_message: String::new(),
        }
    }

    pub fn with_call_stack(mut self, call_stack: String) -> Self {
        self.call_stack = Some(call_stack);
        self
    }

    /// The captured call stack, or an empty string when none was captured
    pub fn call_stack_str(&self) -> &str {
        self.call_stack.as_deref().unwrap_or("")
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted_message)
    }
}
