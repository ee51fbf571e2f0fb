use sandbox_input::{ConfigError, InputConfig};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

/// Tuning for the free-cam rig. Speeds are per unit of delivered magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeCamConfig {
    pub enabled: bool,
    /// Radians per pointer pixel.
    pub rotation_speed: f32,
    /// World units per wheel notch.
    pub zoom_step: f32,
    /// World units per second at full key or stick input.
    pub move_speed: f32,
    /// Radians per second at full stick deflection.
    pub stick_look_speed: f32,
    /// Stick deflection below this is treated as centred.
    pub stick_deadzone: f32,
    pub pitch_limit: f32,
}

impl FreeCamConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.stick_deadzone) {
            return Err(ConfigError::Invalid(format!(
                "stick_deadzone must be in [0, 1), got {}",
                self.stick_deadzone
            )));
        }
        if !(self.pitch_limit > 0.0 && self.pitch_limit <= FRAC_PI_2) {
            return Err(ConfigError::Invalid(format!(
                "pitch_limit must be in (0, pi/2], got {}",
                self.pitch_limit
            )));
        }
        Ok(())
    }
}

impl Default for FreeCamConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rotation_speed: 0.001,
            zoom_step: 0.1,
            move_speed: 5.0,
            stick_look_speed: 2.0,
            stick_deadzone: 0.1,
            pitch_limit: FRAC_PI_2 - 0.01,
        }
    }
}

/// Top-level configuration shared by the sandbox binaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub input: InputConfig,
    pub free_cam: FreeCamConfig,
}

impl SandboxConfig {
    /// Load from a YAML or JSON file; `None` yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = match path {
            Some(path) => sandbox_input::config::load_file(path)?,
            None => Self::default(),
        };
        config.input.validate()?;
        config.free_cam.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}
