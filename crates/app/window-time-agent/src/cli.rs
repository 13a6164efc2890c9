use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use window_time::{ReceiverConfig, X11Config};

const CONFIG_DIR: &str = "window-time";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Parser)]
#[command(name = "window-time-agent", version, about)]
pub struct Cli {
    /// Configuration file. Defaults to `<config dir>/window-time/config.toml`.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Overrides the sampling interval, e.g. `500ms` or `2s`.
    #[arg(short, long, value_parser = humantime::parse_duration)]
    pub precision: Option<Duration>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Built-in configuration used when no file exists: the X11 provider with
/// default settings.
pub fn builtin_config() -> ReceiverConfig {
    let mut config = ReceiverConfig::default();
    config.providers.x11 = Some(X11Config::default());
    config
}

impl Cli {
    pub fn resolve_config(&self) -> Result<ReceiverConfig> {
        let mut config = match &self.config {
            Some(path) => ReceiverConfig::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => match default_config_path().filter(|path| path.exists()) {
                Some(path) => ReceiverConfig::load(&path)
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => {
                    tracing::info!("No configuration file found, using built-in defaults");
                    builtin_config()
                }
            },
        };

        if let Some(precision) = self.precision {
            config.precision = precision;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn builtin_config_is_valid() {
        let config = builtin_config();
        assert!(config.validate().is_ok());
        assert!(config.providers.x11.is_some());
    }

    #[test]
    fn explicit_file_with_precision_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "precision = \"5s\"\n[providers.x11]\n").unwrap();

        let cli = Cli::parse_from([
            "window-time-agent",
            "--config",
            path.to_str().unwrap(),
            "--precision",
            "250ms",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.precision, Duration::from_millis(250));
    }

    #[test]
    fn zero_precision_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[providers.x11]\n").unwrap();

        let cli = Cli::parse_from([
            "window-time-agent",
            "--config",
            path.to_str().unwrap(),
            "--precision",
            "0s",
        ]);
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let cli = Cli::parse_from(["window-time-agent", "--config", "/nonexistent/config.toml"]);
        assert!(cli.resolve_config().is_err());
    }
}
