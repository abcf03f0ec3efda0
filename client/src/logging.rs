use fdfs_core::{FdfsError, Result};
use fern::colors::{Color, ColoredLevelConfig};
use log::{LevelFilter, info};

pub fn parse_level(level: &str) -> Result<LevelFilter> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::Off),
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        other => Err(FdfsError::Config(format!(
            "Unknown log level encountered: '{}'",
            other
        ))),
    }
}

/// Installs the global logger, writing to stderr so stdout stays free for
/// downloaded content.
pub fn setup_logging(level: &str) -> Result<()> {
    let level = parse_level(level)?;

    let colors = ColoredLevelConfig::new()
        .trace(Color::Cyan)
        .debug(Color::Magenta)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{:width$}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.9f"),
                colors.color(record.level()),
                record.target(),
                message,
                width = 5
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| FdfsError::Config(format!("Failed to initialize logging: {}", e)))?;
    info!("logging initialized.");
    Ok(())
}
