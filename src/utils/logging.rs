//! Diagnostic logging setup (env_logger behind the `log` facade)

use log::LevelFilter;

pub fn parse_level(level: &str) -> LevelFilter {
    match level {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}

/// Initialise the global logger once. `RUST_LOG`, when set, wins over `level`.
///
/// Logs go to stderr so they never interleave with conversion lines on stdout.
pub fn setup_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(parse_level(level))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr);

    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    // A second init (e.g. from tests) is harmless.
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("error"), LevelFilter::Error);
        assert_eq!(parse_level("bogus"), LevelFilter::Warn);
    }
}
