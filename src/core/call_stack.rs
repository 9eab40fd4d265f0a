//! Call stack capture for log entries

use backtrace::{Backtrace, BacktraceSymbol};

/// Symbol path fragment identifying this module's `capture` function.
const CAPTURE_MARKER: &str = "call_stack::capture";

/// Render the calling thread's stack as `"\n<file>:<line>"` lines.
///
/// Frames are counted from the caller of this function, innermost first.
/// The first `skip` frames are passed over, then up to `max_frames` frames
/// whose source path contains `filter` are rendered. An empty filter accepts
/// every frame. Frames without source location information are ignored, and
/// capture stops early when the stack is exhausted.
///
/// # Example
///
/// ```
/// use rust_log_dispatch::core::call_stack;
///
/// let trace = call_stack::capture(0, 3, "");
/// assert!(trace.matches('\n').count() <= 3);
/// ```
pub fn capture(skip: usize, max_frames: usize, filter: &str) -> String {
    if max_frames == 0 {
        return String::new();
    }

    let backtrace = Backtrace::new();
    let symbols: Vec<&BacktraceSymbol> = backtrace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .collect();

    // Everything up to and including our own frame belongs to the unwinder
    let start = symbols
        .iter()
        .rposition(|symbol| {
            symbol
                .name()
                .map(|name| name.to_string().contains(CAPTURE_MARKER))
                .unwrap_or(false)
        })
        .map(|pos| pos + 1)
        .unwrap_or(0);

    let mut out = String::new();
    let mut count = 0;
    let located = symbols[start..]
        .iter()
        .filter_map(|symbol| Some((symbol.filename()?, symbol.lineno()?)))
        .skip(skip);

    for (file, line) in located {
        if count >= max_frames {
            break;
        }
        let file = file.display().to_string();
        if filter.is_empty() || file.contains(filter) {
            out.push('\n');
            out.push_str(&file);
            out.push(':');
            out.push_str(&line.to_string());
            count += 1;
        }
    }
    out
}
