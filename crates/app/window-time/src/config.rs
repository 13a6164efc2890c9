use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use window_provider::ProvidersConfig;

use crate::error::{ReceiverError, ReceiverResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricConfig {
    pub enabled: bool,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsConfig {
    pub system_gui_window_time: MetricConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReceiverConfig {
    /// How often accumulated durations are scraped into metrics.
    #[serde(with = "humantime_serde")]
    pub collection_interval: Duration,
    /// Delay before the first scrape.
    #[serde(with = "humantime_serde")]
    pub initial_delay: Duration,
    /// Time between two samples of the focused window.
    #[serde(with = "humantime_serde")]
    pub precision: Duration,
    pub providers: ProvidersConfig,
    pub metrics: MetricsConfig,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            collection_interval: Duration::from_secs(60),
            initial_delay: Duration::from_secs(1),
            precision: Duration::from_secs(1),
            providers: ProvidersConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl ReceiverConfig {
    pub fn from_toml_str(contents: &str) -> ReceiverResult<Self> {
        let config: ReceiverConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ReceiverResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| ReceiverError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> ReceiverResult<()> {
        if self.providers.is_empty() {
            return Err(ReceiverError::configuration(
                "must specify at least one active window provider",
            ));
        }

        self.validate_schedule()?;

        self.providers
            .validate()
            .map_err(|e| ReceiverError::configuration(e.to_string()))
    }

    /// Checks the sampling and scrape cadences only.
    pub(crate) fn validate_schedule(&self) -> ReceiverResult<()> {
        if self.precision.is_zero() {
            return Err(ReceiverError::configuration(
                "precision must be greater than 0",
            ));
        }

        if self.collection_interval.is_zero() {
            return Err(ReceiverError::configuration(
                "collection_interval must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use window_provider::{ProviderKind, X11Config};

    #[test]
    fn default_config() {
        let config = ReceiverConfig::default();
        assert_eq!(config.collection_interval, Duration::from_secs(60));
        assert_eq!(config.initial_delay, Duration::from_secs(1));
        assert_eq!(config.precision, Duration::from_secs(1));
        assert!(config.metrics.system_gui_window_time.enabled);
        assert!(config.providers.is_empty());
    }

    #[test]
    fn default_config_needs_a_provider() {
        let err = ReceiverConfig::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: must specify at least one active window provider"
        );
    }

    #[test]
    fn parses_full_config() {
        let config = ReceiverConfig::from_toml_str(
            r#"
collection_interval = "30s"
initial_delay = "0s"
precision = "500ms"

[providers.x11]
display = ":1"

[metrics.system_gui_window_time]
enabled = false
"#,
        )
        .unwrap();

        assert_eq!(config.collection_interval, Duration::from_secs(30));
        assert_eq!(config.initial_delay, Duration::ZERO);
        assert_eq!(config.precision, Duration::from_millis(500));
        assert_eq!(config.providers.kinds(), vec![ProviderKind::X11]);
        assert_eq!(
            config.providers.x11,
            Some(X11Config {
                display: Some(":1".into())
            })
        );
        assert!(!config.metrics.system_gui_window_time.enabled);
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = ReceiverConfig::from_toml_str("[providers.x11]\n").unwrap();
        assert_eq!(config.precision, Duration::from_secs(1));
        assert_eq!(config.collection_interval, Duration::from_secs(60));
        assert!(config.metrics.system_gui_window_time.enabled);
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = ReceiverConfig::from_toml_str("[providers.quartz]\n").unwrap_err();
        assert!(matches!(err, ReceiverError::ConfigParse(_)));
        assert!(err.to_string().contains("unknown field `quartz`"));
    }

    #[test]
    fn rejects_zero_precision() {
        let err =
            ReceiverConfig::from_toml_str("precision = \"0s\"\n[providers.x11]\n").unwrap_err();
        assert!(matches!(err, ReceiverError::Configuration(_)));
    }

    #[test]
    fn rejects_zero_collection_interval() {
        let err = ReceiverConfig::from_toml_str("collection_interval = \"0s\"\n[providers.x11]\n")
            .unwrap_err();
        assert!(matches!(err, ReceiverError::Configuration(_)));
    }

    #[test]
    fn rejects_blank_display() {
        let err =
            ReceiverConfig::from_toml_str("[providers.x11]\ndisplay = \"\"\n").unwrap_err();
        assert!(matches!(err, ReceiverError::Configuration(_)));
    }

    #[test]
    fn rejects_malformed_duration() {
        assert!(
            ReceiverConfig::from_toml_str("precision = \"soon\"\n[providers.x11]\n").is_err()
        );
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "precision = \"2s\"\n[providers.x11]\n").unwrap();

        let config = ReceiverConfig::load(&path).unwrap();
        assert_eq!(config.precision, Duration::from_secs(2));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReceiverConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ReceiverError::ConfigRead { .. }));
    }
}
