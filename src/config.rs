//! Application configuration.
//!
//! Sources, lowest priority first: built-in defaults, an optional
//! `studymate.toml`, then `STUDYMATE__SECTION__KEY` environment variables
//! (a `.env` file is loaded into the environment first when present).

use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::calibration::CalibrationPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "studymate";
const ENV_PREFIX: &str = "STUDYMATE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Serialize, Deserialize, Validate, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    #[validate]
    pub calibration: CalibrationConfig,
    pub timing: TimingConfig,
    /// Seeds every feature RNG when set.
    pub rng_seed: Option<u64>,
}

#[derive(Serialize, Deserialize, Validate, Clone, Debug, PartialEq)]
#[serde(default)]
#[validate(schema(function = "validate_baseline_finite"))]
pub struct CalibrationConfig {
    #[validate(range(min = 1))]
    pub window_size: usize,
    #[validate(range(min = 0.0, max = 100.0))]
    pub baseline_score: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        let policy = CalibrationPolicy::default();
        Self {
            window_size: policy.window_size,
            baseline_score: policy.baseline_score,
        }
    }
}

// `range` lets NaN through, so finiteness is checked separately
fn validate_baseline_finite(
    config: &CalibrationConfig,
) -> std::result::Result<(), ValidationError> {
    if config.baseline_score.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("baseline_score_not_finite"))
    }
}

impl CalibrationConfig {
    pub fn policy(&self) -> CalibrationPolicy {
        CalibrationPolicy {
            window_size: self.window_size,
            baseline_score: self.baseline_score,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub analysis_delay_ms: u64,
    pub summary_delay_ms: u64,
    pub peer_connect_delay_ms: u64,
    pub peer_welcome_delay_ms: u64,
    pub assistant_reply_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: 1500,
            summary_delay_ms: 2000,
            peer_connect_delay_ms: 2000,
            peer_welcome_delay_ms: 1000,
            assistant_reply_delay_ms: 1000,
        }
    }
}

impl TimingConfig {
    /// All delays zero, for scripted runs.
    pub fn instant() -> Self {
        Self {
            analysis_delay_ms: 0,
            summary_delay_ms: 0,
            peer_connect_delay_ms: 0,
            peer_welcome_delay_ms: 0,
            assistant_reply_delay_ms: 0,
        }
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    pub fn summary_delay(&self) -> Duration {
        Duration::from_millis(self.summary_delay_ms)
    }

    pub fn peer_connect_delay(&self) -> Duration {
        Duration::from_millis(self.peer_connect_delay_ms)
    }

    pub fn peer_welcome_delay(&self) -> Duration {
        Duration::from_millis(self.peer_welcome_delay_ms)
    }

    pub fn assistant_reply_delay(&self) -> Duration {
        Duration::from_millis(self.assistant_reply_delay_ms)
    }
}

impl AppConfig {
    /// Loads `.env`, the default config file (if any) and the environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok(); // Don't fail if .env doesn't exist
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        info!(
            "🔧 Configuration loaded (window {}, baseline {}, seed {:?})",
            config.calibration.window_size, config.calibration.baseline_score, config.rng_seed
        );
        Ok(config)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        debug!("Parsed inline configuration: {:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.calibration.window_size, 5);
        assert_eq!(config.calibration.baseline_score, 72.0);
        assert_eq!(config.timing.analysis_delay(), Duration::from_millis(1500));
        assert_eq!(config.rng_seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            rng_seed = 42

            [calibration]
            window_size = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.calibration.window_size, 10);
        assert_eq!(config.calibration.baseline_score, 72.0);
        assert_eq!(config.timing, TimingConfig::default());
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = AppConfig::from_toml_str("[calibration]\nwindow_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_baseline_out_of_range_rejected() {
        let err = AppConfig::from_toml_str("[calibration]\nbaseline_score = 120.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_nan_baseline_rejected() {
        let err = AppConfig::from_toml_str("[calibration]\nbaseline_score = nan\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let config = AppConfig {
            calibration: CalibrationConfig {
                baseline_score: f64::INFINITY,
                ..CalibrationConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_fine() {
        let config = AppConfig::load_from("does-not-exist/studymate").unwrap();
        assert_eq!(config.calibration.window_size, 5);
    }
}
