use crate::config::LogConfig;
use crate::error::LogError;
use crate::level::Level;
use crate::logger::{LogResult, Logger};
use std::fmt;
use std::sync::{Mutex, MutexGuard, Once, PoisonError};

enum Slot {
    Uninit,
    Live(Logger),
    Closed,
}

static LOGGER: Mutex<Slot> = Mutex::new(Slot::Uninit);
static EXIT_HOOK: Once = Once::new();

fn slot() -> MutexGuard<'static, Slot> {
    LOGGER.lock().unwrap_or_else(PoisonError::into_inner)
}

// Statics are never dropped, so the file is closed from an exit handler
// instead. This covers returning from `main` and `std::process::exit`.
fn live(config: LogConfig) -> Slot {
    EXIT_HOOK.call_once(register_exit_hook);
    Slot::Live(Logger::new(config))
}

#[cfg(unix)]
fn register_exit_hook() {
    // SAFETY: `close_at_exit` is a plain `extern "C"` function that never
    // unwinds.
    if unsafe { libc::atexit(close_at_exit) } != 0 {
        log::warn!("Cannot register exit handler, call shutdown() before exiting");
    }
}

#[cfg(not(unix))]
fn register_exit_hook() {
    log::debug!("No exit handler on this platform, call shutdown() before exiting");
}

#[cfg(unix)]
extern "C" fn close_at_exit() {
    use std::sync::TryLockError;

    // Exiting from inside a log call must not wait on our own lock.
    let mut slot = match LOGGER.try_lock() {
        Ok(slot) => slot,
        Err(TryLockError::Poisoned(err)) => err.into_inner(),
        Err(TryLockError::WouldBlock) => return,
    };
    let previous = std::mem::replace(&mut *slot, Slot::Closed);
    drop(slot);
    drop(previous);
}

/// Creates the process-wide logger. Fails if it was already created,
/// either explicitly or lazily by an earlier log call.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let mut slot = slot();
    match *slot {
        Slot::Uninit => {
            *slot = live(config);
            Ok(())
        }
        Slot::Live(_) => Err(LogError::AlreadyInitialized),
        Slot::Closed => Err(LogError::ShutDown),
    }
}

/// Flushes and closes the process-wide logger. Subsequent log calls
/// return `LogError::ShutDown`; calling this again is a no-op.
pub fn shutdown() {
    let previous = std::mem::replace(&mut *slot(), Slot::Closed);
    drop(previous);
}

/// Runs `f` against the process-wide logger, creating it with the default
/// configuration on first use. `f` must not log through this crate.
pub fn with_logger<R>(f: impl FnOnce(&mut Logger) -> R) -> Result<R, LogError> {
    let mut slot = slot();
    if let Slot::Uninit = *slot {
        log::debug!("Logger used before init, using default config");
        *slot = live(LogConfig::default());
    }
    match &mut *slot {
        Slot::Live(logger) => Ok(f(logger)),
        _ => Err(LogError::ShutDown),
    }
}

/// Like `with_logger`, but returns `None` instead of creating the logger.
pub(crate) fn with_existing<R>(f: impl FnOnce(&mut Logger) -> R) -> Option<R> {
    match &mut *slot() {
        Slot::Live(logger) => Some(f(logger)),
        _ => None,
    }
}

pub fn log(level: Level, args: fmt::Arguments) -> LogResult {
    // Formatting runs user code, which may log again, so it happens before
    // the lock is taken.
    let line = Logger::render(level, args);
    with_logger(|logger| logger.write_line(&line))?
}

pub fn critical(args: fmt::Arguments) -> LogResult {
    log(Level::Critical, args)
}

pub fn error(args: fmt::Arguments) -> LogResult {
    log(Level::Error, args)
}

pub fn warn(args: fmt::Arguments) -> LogResult {
    log(Level::Warn, args)
}

pub fn prompt(args: fmt::Arguments) -> LogResult {
    log(Level::Prompt, args)
}
