use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Critical,
    Error,
    Warn,
    Prompt,
}

/// When a level forces the file to be flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    Always,
    EveryNth,
    Never,
}

impl Level {
    pub fn name(self) -> &'static str {
        match self {
            Level::Critical => "Critical",
            Level::Error => "Error",
            Level::Warn => "Warn",
            Level::Prompt => "Prompt",
        }
    }

    pub fn writes_file(self) -> bool {
        !matches!(self, Level::Prompt)
    }

    // Critical is the last-gasp level: it still reaches the console when
    // the file is gone instead of bailing out.
    pub fn requires_file(self) -> bool {
        matches!(self, Level::Error | Level::Warn)
    }

    pub fn flush_policy(self) -> FlushPolicy {
        match self {
            Level::Critical | Level::Error => FlushPolicy::Always,
            Level::Warn => FlushPolicy::EveryNth,
            Level::Prompt => FlushPolicy::Never,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info | log::Level::Debug | log::Level::Trace => Level::Prompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_padding() {
        assert_eq!(format!("[{:<8}]", Level::Warn), "[Warn    ]");
        assert_eq!(format!("[{:<8}]", Level::Critical), "[Critical]");
    }

    #[test]
    fn test_policies() {
        assert_eq!(Level::Critical.flush_policy(), FlushPolicy::Always);
        assert_eq!(Level::Warn.flush_policy(), FlushPolicy::EveryNth);
        assert!(!Level::Prompt.writes_file());
        assert!(!Level::Critical.requires_file());
        assert!(Level::Error.requires_file());
    }

    #[test]
    fn test_from_log() {
        assert_eq!(Level::from(log::Level::Error), Level::Error);
        assert_eq!(Level::from(log::Level::Warn), Level::Warn);
        assert_eq!(Level::from(log::Level::Debug), Level::Prompt);
    }
}
