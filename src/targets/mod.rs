//! Target implementations

pub mod console;
#[cfg(feature = "file")]
pub mod file;

pub use console::ConsoleTarget;
#[cfg(feature = "file")]
pub use file::FileTarget;

pub use crate::core::Target;
