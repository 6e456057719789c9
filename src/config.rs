use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PATH: &str = "./app.log";
pub const DEFAULT_FLUSH_THRESHOLD: u32 = 100;

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub path: PathBuf,
    /// Number of Warn lines written between forced flushes.
    pub flush_threshold: u32,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            path: PathBuf::from(DEFAULT_PATH),
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
        }
    }
}

impl LogConfig {
    pub fn new(path: impl Into<PathBuf>, flush_threshold: u32) -> LogConfig {
        LogConfig {
            path: path.into(),
            flush_threshold,
        }
    }

    pub fn from_toml(text: &str) -> crate::Result<LogConfig> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> crate::Result<LogConfig> {
        let path = path.as_ref();
        log::debug!("Reading config from {path:?}");
        Self::from_toml(fs::read_to_string(path)?.as_str())
    }

    pub(crate) fn threshold(&self) -> u32 {
        self.flush_threshold.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        assert_eq!(
            LogConfig::from_toml("").unwrap(),
            LogConfig::new("./app.log", 100)
        );
    }

    #[test]
    fn test_partial() {
        let conf = LogConfig::from_toml("flush_threshold = 7").unwrap();
        assert_eq!(conf.path, PathBuf::from(DEFAULT_PATH));
        assert_eq!(conf.flush_threshold, 7);
    }

    #[test]
    fn test_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".lvlog.toml");
        fs::write(&path, "path = \"/tmp/x.log\"\nflush_threshold = 3\n").unwrap();
        assert_eq!(
            LogConfig::load(&path).unwrap(),
            LogConfig::new("/tmp/x.log", 3)
        );
    }

    #[test]
    fn test_bad_toml() {
        assert!(LogConfig::from_toml("flush_threshold = \"lots\"").is_err());
        assert!(LogConfig::load("/nonexistent/.lvlog.toml").is_err());
    }

    #[test]
    fn test_zero_threshold() {
        assert_eq!(LogConfig::new("a.log", 0).threshold(), 1);
    }
}
