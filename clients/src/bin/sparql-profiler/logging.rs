//! Log subscriber setup.

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber at `level`, unless `RUST_LOG` is set.
pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        directives(level).map(EnvFilter::new)
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Filter directives for a `--log` value. HTTP internals stay at `warn`.
fn directives(level: &str) -> Result<String> {
    let level: Level = level
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid log level '{}' (expected DEBUG, INFO, WARN or ERROR)", level))?;
    let level = level.as_str().to_ascii_lowercase();
    Ok(format!("{level},reqwest=warn,hyper=warn,hyper_util=warn,rustls=warn"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_case_insensitive() {
        assert!(directives("DEBUG").unwrap().starts_with("debug,"));
        assert!(directives("Info").unwrap().starts_with("info,"));
        assert!(directives("error").unwrap().starts_with("error,"));
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(directives("LOUD").is_err());
    }
}
