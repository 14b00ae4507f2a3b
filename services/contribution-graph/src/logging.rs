//! Tracing subscriber setup.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Map a `--log-level` value to a tracing level, defaulting to INFO.
pub fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global subscriber. Logs go to stderr so that rendering to
/// stdout stays clean.
pub fn init(log_level: &str, verbose: bool, json: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        parse_level(log_level)
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("bogus"), Level::INFO);
    }
}
