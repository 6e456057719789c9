use crate::global;
use crate::level::Level;
use std::sync::OnceLock;

static BRIDGE: OnceLock<Bridge> = OnceLock::new();

/// Routes `log` records into the process-wide leveled logger.
struct Bridge {
    level: log::Level,
}

/// Installs the bridge as the `log` backend. Does nothing if it is already
/// installed or another backend was set first.
pub fn init(level: log::Level) {
    if BRIDGE.set(Bridge { level }).is_ok() {
        if let Some(bridge) = BRIDGE.get() {
            if log::set_logger(bridge).is_ok() {
                log::set_max_level(level.to_level_filter());
            }
        }
    }
}

fn is_internal(target: &str) -> bool {
    target == env!("CARGO_CRATE_NAME")
        || target.starts_with(concat!(env!("CARGO_CRATE_NAME"), "::"))
}

impl log::Log for Bridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Our own diagnostics may be emitted while the global logger is
        // locked, so they bypass it.
        if is_internal(record.target()) {
            eprintln!("{}: {}", record.level(), record.args());
            return;
        }
        let _ = global::log(Level::from(record.level()), format_args!("{}\n", record.args()));
    }

    fn flush(&self) {
        let _ = global::with_existing(|logger| logger.flush());
    }
}
