//! Dispatch engine shared by every logger derived from the same root
//!
//! The engine owns the bounded entry queue, the dispatcher thread and the
//! target list. Producers format entries on their own thread and either hand
//! them to the queue or, in sync mode, deliver them in place. The dispatcher
//! thread fans queued entries out to every active target in registration
//! order.

use super::{
    call_stack,
    error::{LoggerError, Result},
    log_entry::LogEntry,
    log_level::{FatalAction, LogLevel},
    logger::Logger,
    metrics::DispatchMetrics,
    pending::PendingEntries,
    target::{ErrorSink, Target},
};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Default capacity of the entry queue
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Stack depth recorded for fatal entries when capture is otherwise disabled
pub const FATAL_CALL_STACK_DEPTH: usize = 20;

// Frames between the caller of a Logger method and `call_stack::capture`:
// build_entry <- submit <- Logger::{log, info, warnf, ...}
const SUBMIT_FRAMES: usize = 3;
// build_entry <- submit_fatal <- submit <- Logger::{log, fatal, fatalf, ...}
const FATAL_FRAMES: usize = 4;

const DISPATCHER_THREAD_NAME: &str = "log-dispatcher";

/// Item travelling through the entry queue
enum Message {
    Entry(LogEntry),
    Shutdown,
}

/// Engine configuration.
///
/// Changes made while the engine is open apply to the next log call, except
/// `buffer_size` and `error_sink`, which take effect at the next open.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Destination for errors about logging itself. Required to open.
    pub error_sink: Option<ErrorSink>,
    /// Queue capacity; 0 makes every async log call a rendezvous with the dispatcher
    pub buffer_size: usize,
    /// Frames recorded per entry; 0 disables capture
    pub call_stack_depth: usize,
    /// Substring a frame's source path must contain to be recorded
    pub call_stack_filter: String,
    pub max_level: LogLevel,
    /// Deliver on the logging thread instead of the dispatcher thread
    pub sync_mode: bool,
    pub fatal_action: FatalAction,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            error_sink: Some(ErrorSink::stderr()),
            buffer_size: DEFAULT_BUFFER_SIZE,
            call_stack_depth: 0,
            call_stack_filter: String::new(),
            max_level: LogLevel::Debug,
            sync_mode: false,
            fatal_action: FatalAction::Nothing,
        }
    }
}

impl EngineSettings {
    fn validate(&self) -> Result<ErrorSink> {
        self.error_sink
            .clone()
            .ok_or_else(|| LoggerError::config("Logger", "error sink must be set"))
    }
}

struct EngineState {
    open: bool,
    settings: EngineSettings,
    sender: Option<Sender<Message>>,
    dispatcher: Option<JoinHandle<()>>,
}

/// State shared with the dispatcher thread
struct Dispatch {
    targets: Mutex<Vec<Box<dyn Target>>>,
    pending: PendingEntries,
    metrics: DispatchMetrics,
}

impl Dispatch {
    /// Hand an entry to every active target, isolating target panics
    fn deliver(&self, entry: &LogEntry, errors: Option<&ErrorSink>) {
        let mut targets = self.targets.lock();
        for target in targets.iter_mut() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| target.process(entry)));
            if let Err(panic_info) = outcome {
                self.metrics.record_target_failure();
                if let Some(errors) = errors {
                    errors.report(format_args!(
                        "[LOGGER CRITICAL] Target {} panicked: {}. Other targets continue to function.",
                        target.name(),
                        panic_message(&*panic_info)
                    ));
                }
            }
        }
        self.metrics.record_dispatched();
    }

    fn run(&self, receiver: Receiver<Message>, errors: ErrorSink) {
        while let Ok(message) = receiver.recv() {
            match message {
                Message::Entry(entry) => {
                    self.deliver(&entry, Some(&errors));
                    self.pending.finish();
                }
                Message::Shutdown => break,
            }
        }
    }

    fn close_targets(&self, errors: Option<&ErrorSink>) {
        for target in self.targets.lock().iter_mut() {
            if let Err(panic_info) = panic::catch_unwind(AssertUnwindSafe(|| target.close())) {
                if let Some(errors) = errors {
                    errors.report(format_args!(
                        "[LOGGER CRITICAL] Target {} panicked while closing: {}",
                        target.name(),
                        panic_message(&*panic_info)
                    ));
                }
            }
        }
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// The queue, dispatcher thread and targets behind a family of loggers.
///
/// Every [`Logger`] derived from the same root shares one engine, so level,
/// sync mode, fatal action and target changes made through any of them are
/// seen by all of them.
pub struct DispatchEngine {
    state: RwLock<EngineState>,
    shared: Arc<Dispatch>,
}

impl DispatchEngine {
    /// Create a closed engine
    pub fn new(settings: EngineSettings, targets: Vec<Box<dyn Target>>) -> Self {
        Self {
            state: RwLock::new(EngineState {
                open: false,
                settings,
                sender: None,
                dispatcher: None,
            }),
            shared: Arc::new(Dispatch {
                targets: Mutex::new(targets),
                pending: PendingEntries::new(),
                metrics: DispatchMetrics::new(),
            }),
        }
    }

    /// Open the targets and start the dispatcher thread.
    ///
    /// Does nothing if already open. Targets whose `open` fails are removed
    /// and reported to the error sink; the engine opens with the rest.
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidConfiguration`] if no error sink is set, in
    /// which case nothing is changed.
    pub fn open(&self) -> Result<()> {
        let mut state = self.state.write();
        self.open_locked(&mut state)
    }

    fn open_locked(&self, state: &mut EngineState) -> Result<()> {
        if state.open {
            return Ok(());
        }
        let errors = state.settings.validate()?;

        let (sender, receiver) = bounded(state.settings.buffer_size);
        {
            let mut targets = self.shared.targets.lock();
            let configured = std::mem::take(&mut *targets);
            for mut target in configured {
                match target.open(errors.clone()) {
                    Ok(()) => targets.push(target),
                    Err(e) => errors.report(format_args!(
                        "[LOGGER ERROR] {}",
                        LoggerError::target_open(target.name(), e.to_string())
                    )),
                }
            }
        }

        let shared = Arc::clone(&self.shared);
        let worker_errors = errors.clone();
        let spawned = thread::Builder::new()
            .name(DISPATCHER_THREAD_NAME.to_string())
            .spawn(move || shared.run(receiver, worker_errors));
        let handle = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                self.shared.close_targets(Some(&errors));
                return Err(LoggerError::DispatcherSpawn(e.to_string()));
            }
        };

        state.sender = Some(sender);
        state.dispatcher = Some(handle);
        state.open = true;
        Ok(())
    }

    /// Stop accepting entries, deliver everything already queued, then close
    /// every target. Does nothing if already closed.
    pub fn close(&self) {
        let mut state = self.state.write();
        self.close_locked(&mut state);
    }

    fn close_locked(&self, state: &mut EngineState) {
        if !state.open {
            return;
        }
        state.open = false;

        // Producers hold the read lock across gate and push, so nothing can
        // be queued behind the shutdown message.
        if let Some(sender) = state.sender.take() {
            let _ = sender.send(Message::Shutdown);
        }
        let errors = state.settings.error_sink.as_ref();
        if let Some(handle) = state.dispatcher.take() {
            if handle.join().is_err() {
                if let Some(errors) = errors {
                    errors.report("[LOGGER ERROR] Dispatcher thread panicked during shutdown");
                }
            }
        }
        self.shared.close_targets(errors);
    }

    pub fn is_open(&self) -> bool {
        self.state.read().open
    }

    /// Replace the targets. The engine is closed first and reopened only if
    /// `targets` is non-empty.
    pub fn set_targets(&self, targets: Vec<Box<dyn Target>>) -> Result<()> {
        let mut state = self.state.write();
        self.close_locked(&mut state);
        let reopen = !targets.is_empty();
        *self.shared.targets.lock() = targets;
        if reopen {
            self.open_locked(&mut state)
        } else {
            Ok(())
        }
    }

    /// Append targets, closing and reopening the engine around the change
    pub fn add_targets(&self, targets: Vec<Box<dyn Target>>) -> Result<()> {
        let mut state = self.state.write();
        self.close_locked(&mut state);
        self.shared.targets.lock().extend(targets);
        self.open_locked(&mut state)
    }

    /// Names of the active targets, in dispatch order
    pub fn target_names(&self) -> Vec<String> {
        self.shared
            .targets
            .lock()
            .iter()
            .map(|target| target.name().to_string())
            .collect()
    }

    pub fn max_level(&self) -> LogLevel {
        self.state.read().settings.max_level
    }

    pub fn set_max_level(&self, level: LogLevel) {
        self.state.write().settings.max_level = level;
    }

    pub fn is_sync(&self) -> bool {
        self.state.read().settings.sync_mode
    }

    pub fn set_sync(&self, enabled: bool) {
        self.state.write().settings.sync_mode = enabled;
    }

    pub fn fatal_action(&self) -> FatalAction {
        self.state.read().settings.fatal_action
    }

    pub fn set_fatal_action(&self, action: FatalAction) {
        self.state.write().settings.fatal_action = action;
    }

    pub fn set_call_stack(&self, depth: usize, filter: impl Into<String>) {
        let mut state = self.state.write();
        state.settings.call_stack_depth = depth;
        state.settings.call_stack_filter = filter.into();
    }

    /// Takes effect at the next open
    pub fn set_error_sink(&self, errors: Option<ErrorSink>) {
        self.state.write().settings.error_sink = errors;
    }

    /// Takes effect at the next open
    pub fn set_buffer_size(&self, size: usize) {
        self.state.write().settings.buffer_size = size;
    }

    pub fn settings(&self) -> EngineSettings {
        self.state.read().settings.clone()
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.shared.metrics
    }

    /// Entries queued but not yet seen by every target
    pub fn pending(&self) -> usize {
        self.shared.pending.current()
    }

    /// Gate, build, format and dispatch one log call.
    ///
    /// `extra_frames` counts the frames a caller adds between the user's code
    /// and the `Logger` method position, so call stacks start at the user.
    pub(crate) fn submit(
        &self,
        logger: &Logger,
        level: LogLevel,
        message: fmt::Arguments<'_>,
        extra_frames: usize,
    ) {
        if level == LogLevel::Fatal {
            self.submit_fatal(logger, message, extra_frames);
            return;
        }

        let state = self.state.read();
        if !state.open || !level.passes(state.settings.max_level) {
            self.shared.metrics.record_filtered();
            return;
        }

        let depth = state.settings.call_stack_depth;
        let skip = SUBMIT_FRAMES + extra_frames;
        let entry = self.build_entry(logger, &state.settings, level, message, depth, skip);

        if state.settings.sync_mode {
            self.shared.deliver(&entry, state.settings.error_sink.as_ref());
        } else if let Some(sender) = state.sender.as_ref() {
            self.enqueue(sender, entry);
        }
    }

    fn build_entry(
        &self,
        logger: &Logger,
        settings: &EngineSettings,
        level: LogLevel,
        message: fmt::Arguments<'_>,
        depth: usize,
        skip: usize,
    ) -> LogEntry {
        let mut entry = LogEntry::new(level, logger.category(), message.to_string());
        if depth > 0 {
            entry = entry.with_call_stack(call_stack::capture(
                skip,
                depth,
                &settings.call_stack_filter,
            ));
        }
        entry.formatted_message = (logger.formatter())(logger, &entry);
        entry
    }

    /// Push onto the queue, blocking while it is full
    fn enqueue(&self, sender: &Sender<Message>, entry: LogEntry) {
        self.shared.pending.begin();
        let message = match sender.try_send(Message::Entry(entry)) {
            Ok(()) => return,
            Err(TrySendError::Full(message)) => message,
            Err(TrySendError::Disconnected(_)) => {
                self.shared.pending.finish();
                return;
            }
        };

        self.shared.metrics.record_backpressure();
        if sender.send(message).is_err() {
            self.shared.pending.finish();
        }
    }

    /// Deliver a fatal entry in place, wait for the queue to drain, then
    /// carry out the fatal action.
    fn submit_fatal(&self, logger: &Logger, message: fmt::Arguments<'_>, extra_frames: usize) {
        let (action, errors) = {
            let state = self.state.read();
            if !state.open {
                self.shared.metrics.record_filtered();
                return;
            }
            let depth = match state.settings.call_stack_depth {
                0 => FATAL_CALL_STACK_DEPTH,
                depth => depth,
            };
            let entry = self.build_entry(
                logger,
                &state.settings,
                LogLevel::Fatal,
                message,
                depth,
                FATAL_FRAMES + extra_frames,
            );

            self.shared.metrics.record_fatal();
            self.shared.deliver(&entry, state.settings.error_sink.as_ref());
            (state.settings.fatal_action, state.settings.error_sink.clone())
        };

        self.shared.pending.wait_drained();

        match action {
            FatalAction::Nothing => {}
            FatalAction::Panic => panic!("Fatal error: {}", message),
            FatalAction::Exit => {
                let mut entry = LogEntry::new(LogLevel::Warn, logger.category(), "Forced to exit.");
                entry.formatted_message = (logger.formatter())(logger, &entry);
                self.shared.deliver(&entry, errors.as_ref());
                self.close();
                std::process::exit(1);
            }
        }
    }
}

impl Drop for DispatchEngine {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for DispatchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("DispatchEngine")
            .field("open", &state.open)
            .field("settings", &state.settings)
            .field("pending", &self.shared.pending.current())
            .finish_non_exhaustive()
    }
}
