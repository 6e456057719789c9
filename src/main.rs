use lvlog::LogConfig;
use std::io::BufRead;

fn main() -> lvlog::Result<()> {
    let path = std::path::Path::new(".lvlog.toml");
    let conf = if path.is_file() {
        LogConfig::load(path)?
    } else {
        LogConfig::default()
    };

    lvlog::init(conf.clone())?;
    lvlog::bridge::init(log::Level::Info);
    lvlog::prompt!(
        "Logging to {:?}, flushing warnings every {}\n",
        conf.path,
        conf.flush_threshold
    )?;

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let result = if let Some(msg) = line.strip_prefix("!!") {
            lvlog::critical!("{msg}\n")
        } else if let Some(msg) = line.strip_prefix('!') {
            lvlog::error!("{msg}\n")
        } else {
            lvlog::warn!("{line}\n")
        };
        if let Err(err) = result {
            eprintln!("{err}");
        }
    }

    lvlog::shutdown();
    Ok(())
}
