//! Log output setup.

/// Environment variable holding the log level (`error` to `trace`).
pub const LOG_ENV: &str = "MESHLIGHT_LOG";

/// Installs a stderr logger with local timestamps.
pub fn init() -> Result<(), String> {
    let level = parse_level(std::env::var(LOG_ENV).ok().as_deref());
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| e.to_string())
}

fn parse_level(value: Option<&str>) -> log::LevelFilter {
    value
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(log::LevelFilter::Info)
}
