//! Controller configuration, loaded from TOML.

use std::fs;
use std::path::Path;
use std::time::Duration;

use cp_engine::control::TICK_INTERVAL_MS;
use cp_engine::{ClusterSettings, ControlGains};
use cp_ir::{Plane, ReferenceMode, MAX_INPUTS};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Reference mode as written in the config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeSetting {
    #[default]
    FirstInput,
    Barycenter,
}

impl From<ModeSetting> for ReferenceMode {
    fn from(mode: ModeSetting) -> Self {
        match mode {
            ModeSetting::FirstInput => ReferenceMode::FirstInput,
            ModeSetting::Barycenter => ReferenceMode::Barycenter,
        }
    }
}

/// Plane as written in the config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaneSetting {
    #[default]
    Xy,
    Xz,
    Yz,
}

impl From<PlaneSetting> for Plane {
    fn from(plane: PlaneSetting) -> Self {
        match plane {
            PlaneSetting::Xy => Plane::XY,
            PlaneSetting::Xz => Plane::XZ,
            PlaneSetting::Yz => Plane::YZ,
        }
    }
}

/// Controller settings. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of inputs in the channel configuration
    pub input_count: usize,
    /// Control loop period
    pub tick_interval_ms: u64,
    /// Meters per tick at full position-pad deflection
    pub position_gain: f32,
    /// Meters per tick at full elevation deflection
    pub elevation_gain: f32,
    /// dB per tick at full attenuation deflection
    pub attenuation_gain: f32,
    /// Scale change per tick at full scale-pad deflection
    pub scale_gain: f32,
    /// Reference mode given to a cluster when first selected
    pub default_mode: ModeSetting,
    /// Plane given to a cluster when first selected
    pub default_plane: PlaneSetting,
}

impl Default for Config {
    fn default() -> Self {
        let gains = ControlGains::default();
        Self {
            input_count: 32,
            tick_interval_ms: TICK_INTERVAL_MS,
            position_gain: gains.position,
            elevation_gain: gains.elevation,
            attenuation_gain: gains.attenuation,
            scale_gain: gains.scale,
            default_mode: ModeSetting::default(),
            default_plane: PlaneSetting::default(),
        }
    }
}

impl Config {
    /// Load and validate a TOML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        log::debug!("loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, Error> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()
    }

    pub fn to_toml_string(&self) -> Result<String, Error> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    fn validate(mut self) -> Result<Self, Error> {
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be at least 1".into()));
        }
        let gains = [
            ("position_gain", self.position_gain),
            ("elevation_gain", self.elevation_gain),
            ("attenuation_gain", self.attenuation_gain),
            ("scale_gain", self.scale_gain),
        ];
        for (name, value) in gains {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.input_count > MAX_INPUTS {
            log::warn!("input_count {} capped to {}", self.input_count, MAX_INPUTS);
            self.input_count = MAX_INPUTS;
        }
        Ok(self)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn gains(&self) -> ControlGains {
        ControlGains {
            position: self.position_gain,
            elevation: self.elevation_gain,
            attenuation: self.attenuation_gain,
            scale: self.scale_gain,
        }
    }

    pub fn cluster_defaults(&self) -> ClusterSettings {
        ClusterSettings {
            mode: self.default_mode.into(),
            plane: self.default_plane.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(20));
        assert_eq!(config.gains(), ControlGains::default());
    }

    #[test]
    fn partial_override() {
        let config = Config::from_toml_str(
            r#"
            input_count = 8
            scale_gain = 0.05
            default_mode = "barycenter"
            default_plane = "yz"
            "#,
        )
        .unwrap();
        assert_eq!(config.input_count, 8);
        assert_eq!(config.gains().scale, 0.05);
        assert_eq!(config.gains().position, 0.05);
        assert_eq!(
            config.cluster_defaults(),
            ClusterSettings { mode: ReferenceMode::Barycenter, plane: Plane::YZ }
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = Config::from_toml_str("tick_rate = 10").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Config::from_toml_str("tick_interval_ms = 0").is_err());
        assert!(Config::from_toml_str("attenuation_gain = -1.0").is_err());
    }

    #[test]
    fn input_count_is_capped() {
        let config = Config::from_toml_str("input_count = 4096").unwrap();
        assert_eq!(config.input_count, MAX_INPUTS);
    }

    #[test]
    fn load_from_file_and_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "position_gain = 0.1").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.position_gain, 0.1);

        let text = config.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load("/nonexistent/clusterpan.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
