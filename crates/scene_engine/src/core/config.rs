//! # Engine Configuration
//!
//! Runtime settings for the frame loop, the orbiting camera and logging. All
//! sections default sensibly, so a config file only needs the values it changes.

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::input::KeyCode;

/// # Frame Loop Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Longest delta time (seconds) handed to scenes; longer frames are clamped
    pub max_delta_time: f32,
    /// Key that ends the main loop when pressed, if any.
    ///
    /// TOML has no null, so a TOML file cannot clear this; use RON for that.
    pub exit_key: Option<KeyCode>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_delta_time: 0.25,
            exit_key: Some(KeyCode::Escape),
        }
    }
}

/// # Orbit Camera Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitCameraConfig {
    /// Radians of rotation per pixel of drag per second
    pub sensitivity: f32,
    /// Largest elevation above or below the target's horizontal plane, radians
    pub polar_limit: f32,
}

impl Default for OrbitCameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.5,
            polar_limit: 1.5,
        }
    }
}

/// # Logging Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// # Engine Configuration
///
/// Top-level configuration applications hand to [`crate::Engine::run`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frame loop settings
    pub frame: FrameConfig,
    /// Orbit camera settings
    pub orbit: OrbitCameraConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log filter
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.logging.filter = filter.into();
        self
    }

    /// Set or clear the exit key
    pub fn with_exit_key(mut self, key: Option<KeyCode>) -> Self {
        self.frame.exit_key = key;
        self
    }

    /// Set the orbit camera sensitivity
    pub fn with_orbit_sensitivity(mut self, sensitivity: f32) -> Self {
        self.orbit.sensitivity = sensitivity;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame.max_delta_time.is_nan() || self.frame.max_delta_time <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "frame.max_delta_time must be positive, got {}",
                self.frame.max_delta_time
            )));
        }
        if !self.orbit.sensitivity.is_finite() {
            return Err(ConfigError::Invalid("orbit.sensitivity must be finite".to_string()));
        }
        let polar_limit = self.orbit.polar_limit;
        if polar_limit.is_nan() || polar_limit <= 0.0 || polar_limit >= std::f32::consts::FRAC_PI_2 {
            return Err(ConfigError::Invalid(format!(
                "orbit.polar_limit must be within (0, pi/2), got {}",
                self.orbit.polar_limit
            )));
        }
        Ok(())
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.orbit.polar_limit, 1.5);
        assert_eq!(config.frame.exit_key, Some(KeyCode::Escape));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: EngineConfig = toml::from_str("[orbit]\nsensitivity = 0.25\n").unwrap();
        assert_eq!(config.orbit.sensitivity, 0.25);
        assert_eq!(config.orbit.polar_limit, 1.5);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_invalid_polar_limit_rejected() {
        let mut config = EngineConfig::default();
        config.orbit.polar_limit = 2.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_nan_settings_rejected() {
        let mut config = EngineConfig::default();
        config.frame.max_delta_time = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EngineConfig::default();
        config.orbit.polar_limit = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.orbit.polar_limit = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir();
        let config = EngineConfig::new()
            .with_log_filter("debug")
            .with_exit_key(Some(KeyCode::Q))
            .with_orbit_sensitivity(0.75);

        for name in ["scene_engine_config_test.toml", "scene_engine_config_test.ron"] {
            let path = dir.join(name);
            config.save_to_file(&path).unwrap();
            let loaded = EngineConfig::load_from_file(&path).unwrap();
            std::fs::remove_file(&path).ok();

            assert_eq!(loaded.logging.filter, "debug");
            assert_eq!(loaded.frame.exit_key, Some(KeyCode::Q));
            assert_eq!(loaded.orbit.sensitivity, 0.75);
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let err = EngineConfig::default().save_to_file("config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
