use std::io;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to open log file: {0}")]
    Open(#[source] io::Error),
    #[error("log file is not open")]
    NoFile,
    #[error("failed to write log line: {0}")]
    Write(#[source] io::Error),
    #[error("a formatting trait implementation returned an error")]
    Format,
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger has been shut down")]
    ShutDown,
}

impl LogError {
    /// Integer form of the error, for callers that follow the
    /// "negative length means failure" convention.
    pub fn code(&self) -> i32 {
        -1
    }
}
