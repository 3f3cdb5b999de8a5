/// Boost configuration
use audioboost_core::{BoostError, Result};
use audioboost_loudness::{DEFAULT_SEGMENT_DURATION_MS, DEFAULT_TARGET_DBFS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "audioboost.toml";

/// Prefix for environment overrides (`AUDIOBOOST_TARGET_DBFS`, ...)
pub const ENV_PREFIX: &str = "AUDIOBOOST";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BoostConfig {
    /// Peak ceiling quiet segments are raised to, in dBFS
    #[serde(default = "default_target_dbfs")]
    pub target_dbfs: f64,

    /// Length of one measurement window in milliseconds
    #[serde(default = "default_segment_duration_ms")]
    pub segment_duration_ms: u64,

    /// Give up on an encoder that stays not ready for this long (never by default)
    #[serde(default)]
    pub encoder_timeout_ms: Option<u64>,
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub target_dbfs: Option<f64>,
    pub segment_duration_ms: Option<u64>,
}

impl BoostConfig {
    /// Load configuration from file and environment
    ///
    /// `config_path` must exist when given; otherwise `audioboost.toml` is
    /// read from the working directory if present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(config_path, ENV_PREFIX)
    }

    pub(crate) fn load_with_prefix(config_path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut settings = config::Config::builder();

        match config_path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                // Load from config file if it exists
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables
        settings = settings.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| BoostError::config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| BoostError::config(e.to_string()))
    }

    /// Apply command-line values on top of the loaded configuration
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(target_dbfs) = overrides.target_dbfs {
            self.target_dbfs = target_dbfs;
        }
        if let Some(segment_duration_ms) = overrides.segment_duration_ms {
            self.segment_duration_ms = segment_duration_ms;
        }
        self
    }

    /// Wedge guard for the encoder poll loop
    pub fn encoder_timeout(&self) -> Option<Duration> {
        self.encoder_timeout_ms.map(Duration::from_millis)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_dbfs.is_finite() {
            return Err(BoostError::config(format!(
                "target_dbfs must be finite, got {}",
                self.target_dbfs
            )));
        }

        if self.target_dbfs > 0.0 {
            warn!(
                target_dbfs = self.target_dbfs,
                "Target above full scale, boosted segments will clip"
            );
        }

        if self.segment_duration_ms == 0 {
            return Err(BoostError::config(
                "segment_duration_ms must be greater than zero",
            ));
        }

        if self.encoder_timeout_ms == Some(0) {
            return Err(BoostError::config(
                "encoder_timeout_ms must be greater than zero when set",
            ));
        }

        Ok(())
    }
}

// Default values
fn default_target_dbfs() -> f64 {
    DEFAULT_TARGET_DBFS
}

fn default_segment_duration_ms() -> u64 {
    DEFAULT_SEGMENT_DURATION_MS
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            target_dbfs: default_target_dbfs(),
            segment_duration_ms: default_segment_duration_ms(),
            encoder_timeout_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = BoostConfig::default();
        assert_eq!(config.target_dbfs, 0.0);
        assert_eq!(config.segment_duration_ms, 120_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_sources_give_defaults() {
        let config = BoostConfig::load_with_prefix(None, "AUDIOBOOST_TEST_EMPTY").unwrap();
        assert_eq!(config, BoostConfig::default());
    }

    #[test]
    fn file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boost.toml");
        std::fs::write(&path, "target_dbfs = -1.5\nsegment_duration_ms = 1200000\n").unwrap();

        let config = BoostConfig::load_with_prefix(Some(&path), "AUDIOBOOST_TEST_FILE").unwrap();
        assert_eq!(config.target_dbfs, -1.5);
        assert_eq!(config.segment_duration_ms, 1_200_000);
        assert_eq!(config.encoder_timeout_ms, None);
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boost.toml");
        std::fs::write(&path, "segment_duration_ms = 5000\n").unwrap();
        std::env::set_var("AUDIOBOOST_TEST_ENV_SEGMENT_DURATION_MS", "7000");

        let config = BoostConfig::load_with_prefix(Some(&path), "AUDIOBOOST_TEST_ENV").unwrap();
        assert_eq!(config.segment_duration_ms, 7_000);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = BoostConfig::load_with_prefix(
            Some(Path::new("/nonexistent/audioboost.toml")),
            "AUDIOBOOST_TEST_MISSING",
        );
        assert!(matches!(result, Err(BoostError::Config(_))));
    }

    #[test]
    fn cli_overrides_win() {
        let config = BoostConfig::default().with_overrides(&Overrides {
            target_dbfs: Some(-3.0),
            segment_duration_ms: None,
        });
        assert_eq!(config.target_dbfs, -3.0);
        assert_eq!(config.segment_duration_ms, 120_000);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let nan_target = BoostConfig {
            target_dbfs: f64::NAN,
            ..BoostConfig::default()
        };
        assert!(nan_target.validate().is_err());

        let zero_segment = BoostConfig {
            segment_duration_ms: 0,
            ..BoostConfig::default()
        };
        assert!(zero_segment.validate().is_err());

        let zero_timeout = BoostConfig {
            encoder_timeout_ms: Some(0),
            ..BoostConfig::default()
        };
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn target_above_full_scale_is_accepted() {
        let config = BoostConfig {
            target_dbfs: 3.0,
            ..BoostConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn encoder_timeout_is_off_by_default() {
        assert_eq!(BoostConfig::default().encoder_timeout(), None);

        let config = BoostConfig {
            encoder_timeout_ms: Some(250),
            ..BoostConfig::default()
        };
        assert_eq!(config.encoder_timeout(), Some(Duration::from_millis(250)));
    }
}
