use colored::*;
use log::LevelFilter;

/// Maps a configured level name to a filter, falling back to `Info`
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    level
        .map(|level| match level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        })
        .unwrap_or(LevelFilter::Info)
}

/// Initialize env_logger. `RUST_LOG` still wins over the configured level.
pub fn init_logging(configured: Option<&str>, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        parse_level(configured)
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.to_string()))
        .init();
}

/// Log an error and show it to the user
pub fn report_error(message: &str) {
    log::error!("{}", message);
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(parse_level(Some("warn")), LevelFilter::Warn);
        assert_eq!(parse_level(Some("loud")), LevelFilter::Info);
        assert_eq!(parse_level(None), LevelFilter::Info);
    }
}
