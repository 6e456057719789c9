use crate::config::LogConfig;
use crate::error::LogError;
use crate::level::{FlushPolicy, Level};
use crate::line::{Line, LINE_CAPACITY};
use crate::timestamp;
use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const MAX_BUFFER: usize = 4 << 20;

pub type LogResult = std::result::Result<usize, LogError>;

/// Anything a logger can write to.
pub type Sink = Box<dyn Write + Send>;

/// Leveled logger writing to one file and one console sink.
///
/// The file is recreated empty on construction and closed on drop. Warn
/// lines are buffered and only flushed every `flush_threshold` calls, so
/// the file buffer is sized to hold a full batch.
pub struct Logger {
    path: PathBuf,
    file: Option<BufWriter<Sink>>,
    open_error: Option<io::Error>,
    console: Sink,
    flush_threshold: u32,
    warn_count: u32,
    flush_count: u64,
}

impl Logger {
    pub fn new(config: LogConfig) -> Logger {
        Self::with_console(config, Box::new(io::stdout()))
    }

    /// Like `new`, but fails instead of degrading to console-only output
    /// when the file cannot be opened.
    pub fn try_new(config: LogConfig) -> Result<Logger, LogError> {
        let mut logger = Self::new(config);
        match logger.open_error.take() {
            Some(err) => Err(LogError::Open(err)),
            None => Ok(logger),
        }
    }

    pub fn with_console(config: LogConfig, console: Sink) -> Logger {
        match open_fresh(&config.path) {
            Ok(file) => Self::build(config, Some(Box::new(file)), None, console),
            Err(err) => {
                log::warn!("Cannot open log file {:?}: {err}", config.path);
                Self::build(config, None, Some(err), console)
            }
        }
    }

    /// Uses `file` in place of the file at `config.path`, which is left
    /// untouched.
    pub fn with_sinks(config: LogConfig, file: Sink, console: Sink) -> Logger {
        Self::build(config, Some(file), None, console)
    }

    fn build(
        config: LogConfig,
        file: Option<Sink>,
        open_error: Option<io::Error>,
        console: Sink,
    ) -> Logger {
        let flush_threshold = config.threshold();
        let capacity = LINE_CAPACITY
            .saturating_mul(flush_threshold as usize)
            .min(MAX_BUFFER);
        Logger {
            path: config.path,
            file: file.map(|file| BufWriter::with_capacity(capacity, file)),
            open_error,
            console,
            flush_threshold,
            warn_count: 0,
            flush_count: 0,
        }
    }

    /// Writes to file and console, flushing the file after every call.
    /// Skips the file silently when it could not be opened.
    pub fn critical(&mut self, args: fmt::Arguments) -> LogResult {
        self.log(Level::Critical, args)
    }

    /// Writes to file and console, flushing the file after every call.
    pub fn error(&mut self, args: fmt::Arguments) -> LogResult {
        self.log(Level::Error, args)
    }

    /// Writes to file and console, flushing the file every
    /// `flush_threshold` calls.
    pub fn warn(&mut self, args: fmt::Arguments) -> LogResult {
        self.log(Level::Warn, args)
    }

    /// Writes to the console only.
    pub fn prompt(&mut self, args: fmt::Arguments) -> LogResult {
        self.log(Level::Prompt, args)
    }

    /// Renders and writes one line at `level`. Returns the untruncated body
    /// length.
    pub fn log(&mut self, level: Level, args: fmt::Arguments) -> LogResult {
        let line = Self::render(level, args);
        self.write_line(&line)
    }

    /// Stamps and formats a line without touching any logger state, so
    /// callers can run user formatting code before taking a lock.
    pub fn render(level: Level, args: fmt::Arguments) -> Line {
        Line::render(&timestamp::now(), level, args)
    }

    /// Sends an already rendered line to the sinks its level calls for.
    pub fn write_line(&mut self, line: &Line) -> LogResult {
        let level = line.level();
        let file_result = if !level.writes_file() {
            Ok(())
        } else if self.file.is_none() {
            if level.requires_file() {
                Err(LogError::NoFile)
            } else {
                Ok(())
            }
        } else {
            self.write_file(level, line)
        };

        // The console sees every line, whatever happened to the file.
        let console_result = self
            .console
            .write_all(line.as_bytes())
            .and_then(|_| self.console.flush())
            .map_err(LogError::Write);

        file_result.and(console_result)?;
        if !line.is_complete() {
            return Err(LogError::Format);
        }
        Ok(line.body_len())
    }

    fn write_file(&mut self, level: Level, line: &Line) -> Result<(), LogError> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        file.write_all(line.as_bytes()).map_err(LogError::Write)?;
        let flush = match level.flush_policy() {
            FlushPolicy::Always => true,
            FlushPolicy::EveryNth => {
                self.warn_count += 1;
                if self.warn_count >= self.flush_threshold {
                    self.warn_count = 0;
                    true
                } else {
                    false
                }
            }
            FlushPolicy::Never => false,
        };
        if flush {
            self.flush_count += 1;
            file.flush().map_err(LogError::Write)?;
        }
        Ok(())
    }

    /// Pushes any buffered lines to the file without touching the Warn
    /// counter.
    pub fn flush(&mut self) -> Result<(), LogError> {
        match self.file.as_mut() {
            Some(file) => file.flush().map_err(LogError::Write),
            None => Ok(()),
        }
    }

    /// Flushes and closes the file. Later file writes behave as if the
    /// file had never opened.
    pub fn close(&mut self) -> Result<(), LogError> {
        match self.file.take() {
            Some(mut file) => {
                log::debug!("Closing log file {:?}", self.path);
                file.flush().map_err(LogError::Write)
            }
            None => Ok(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn open_error(&self) -> Option<&io::Error> {
        self.open_error.as_ref()
    }

    pub fn flush_threshold(&self) -> u32 {
        self.flush_threshold
    }

    /// Warn lines written since the last Warn-triggered flush.
    pub fn pending_warns(&self) -> u32 {
        self.warn_count
    }

    /// Number of flushes issued by the level policies.
    pub fn flush_count(&self) -> u64 {
        self.flush_count
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            log::warn!("Failed to flush log file {:?}: {err}", self.path);
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("path", &self.path)
            .field("has_file", &self.file.is_some())
            .field("flush_threshold", &self.flush_threshold)
            .field("warn_count", &self.warn_count)
            .field("flush_count", &self.flush_count)
            .finish()
    }
}

// Each run starts with an empty log. If the old file cannot be unlinked,
// creating it truncates it anyway.
fn open_fresh(path: &Path) -> io::Result<fs::File> {
    if path.is_file() {
        if let Err(err) = fs::remove_file(path) {
            log::debug!("Cannot remove old log {path:?}, truncating instead: {err}");
        }
    }
    fs::File::create(path)
}
