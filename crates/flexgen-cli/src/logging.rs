//! Subscriber setup for the library's `tracing` events

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Accepted values of `--log-level`
pub const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Filter directive in effect: `RUST_LOG` when set and non-empty, the
/// command line level otherwise
pub fn directive(level: &str, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(env) if !env.is_empty() => env.to_string(),
        _ => level.to_string(),
    }
}

/// Install a fmt subscriber on stderr so console output stays clean
pub fn init(level: &str) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = directive(level, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| anyhow!("Invalid log filter '{directive}': {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use test_case::test_case;

    #[test_case("info", None, "info" ; "no env")]
    #[test_case("info", Some(""), "info" ; "empty env")]
    #[test_case("info", Some("  "), "info" ; "blank env")]
    #[test_case("warn", Some("flexgen_core=debug"), "flexgen_core=debug" ; "env wins")]
    fn directive___picks_env_over_level(level: &str, env: Option<&str>, expected: &str) {
        assert_eq!(directive(level, env), expected);
    }

    #[test]
    fn LEVELS___all_parse_as_filters() {
        for level in LEVELS {
            assert!(EnvFilter::try_new(level).is_ok(), "{level}");
        }
    }
}
