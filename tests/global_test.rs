use lvlog::{LogConfig, LogError};
use pretty_assertions::assert_eq;
use std::fmt;

// Logs from inside its own formatting.
struct Noisy;

impl fmt::Display for Noisy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        log::info!(target: "my_app::model", "formatting");
        lvlog::prompt!("nested\n").unwrap();
        f.write_str("noisy")
    }
}

// The process-wide logger can only be set up once per process, so the
// whole lifecycle is exercised in a single test.
#[test]
fn test_lifecycle() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("global.log");
    std::fs::write(&path, "stale").unwrap();

    lvlog::init(LogConfig::new(&path, 2)).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    assert!(matches!(
        lvlog::init(LogConfig::new(&path, 2)),
        Err(LogError::AlreadyInitialized)
    ));

    assert_eq!(lvlog::error!("failed: {}\n", 42).unwrap(), 11);
    assert!(std::fs::read_to_string(&path)
        .unwrap()
        .ends_with("[Error   ] failed: 42\n"));

    lvlog::warn!("one\n").unwrap();
    assert_eq!(lvlog::with_logger(|l| l.pending_warns()).unwrap(), 1);
    lvlog::warn!("two\n").unwrap();
    assert_eq!(lvlog::with_logger(|l| l.pending_warns()).unwrap(), 0);
    assert!(std::fs::read_to_string(&path)
        .unwrap()
        .ends_with("[Warn    ] two\n"));

    lvlog::prompt!("console only\n").unwrap();

    // Routed through the `log` facade.
    lvlog::bridge::init(log::Level::Info);
    log::error!(target: "my_app", "from the facade");
    assert!(std::fs::read_to_string(&path)
        .unwrap()
        .ends_with("[Error   ] from the facade\n"));

    assert_eq!(lvlog::error!("value {}\n", Noisy).unwrap(), 12);
    assert!(std::fs::read_to_string(&path)
        .unwrap()
        .ends_with("[Error   ] value noisy\n"));

    lvlog::warn!("pending\n").unwrap();
    lvlog::critical!("bye\n").unwrap();
    lvlog::shutdown();
    lvlog::shutdown();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[Warn    ] pending\n"));
    assert!(text.ends_with("[Critical] bye\n"));
    assert!(!text.contains("console only"));

    log::logger().flush();
    log::error!(target: "my_app", "after shutdown");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    assert!(matches!(lvlog::warn!("late\n"), Err(LogError::ShutDown)));
    assert!(matches!(
        lvlog::init(LogConfig::new(&path, 2)),
        Err(LogError::ShutDown)
    ));
}
