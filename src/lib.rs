//! Leveled logging to a file and the console.
//!
//! Four levels share one log file but flush it differently: `Critical` and
//! `Error` flush after every line, `Warn` flushes every `flush_threshold`
//! lines, and `Prompt` only goes to the console. Every line is also echoed
//! to the console, even when the file could not be opened.
//!
//! ```no_run
//! lvlog::init(lvlog::LogConfig::new("/tmp/app.log", 100)).unwrap();
//! lvlog::error!("failed: {}\n", 42).unwrap();
//! lvlog::shutdown();
//! ```

pub mod bridge;
pub mod config;
mod error;
mod global;
pub mod level;
pub mod line;
mod logger;
pub mod timestamp;

pub use config::LogConfig;
pub use error::LogError;
pub use global::{critical, error, init, log, prompt, shutdown, warn, with_logger};
pub use level::Level;
pub use logger::{LogResult, Logger, Sink};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        $crate::critical(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::error(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::warn(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! prompt {
    ($($arg:tt)+) => {
        $crate::prompt(::std::format_args!($($arg)+))
    };
}
