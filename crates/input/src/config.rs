//! Input-layer configuration and file loading.
//!
//! Configuration files are YAML (`.yaml`/`.yml`) or JSON (`.json`), selected
//! by extension. Every field has a default, so partial files are valid.

use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What the keyboard normalizer does with auto-repeat notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatPolicy {
    /// Every repeat is dispatched as another `1.0`.
    #[default]
    Forward,
    /// Repeats are dropped until the key is released.
    Suppress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub repeat_policy: RepeatPolicy,
    /// Analog gamepad buttons count as pressed at or above this value.
    pub button_threshold: f32,
    /// Request pointer capture when a pointer button is pressed.
    pub capture_on_press: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            repeat_policy: RepeatPolicy::Forward,
            button_threshold: 0.5,
            capture_on_press: true,
        }
    }
}

impl InputConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.button_threshold > 0.0 && self.button_threshold <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "button_threshold must be in (0, 1], got {}",
                self.button_threshold
            )));
        }
        Ok(())
    }
}

/// Deserialize a config file, picking the format from its extension.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let data = std::fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("yaml" | "yml") => Ok(serde_yaml::from_str(&data)?),
        Some("json") => Ok(serde_json::from_str(&data)?),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_forward_repeats() {
        let config = InputConfig::default();
        assert_eq!(config.repeat_policy, RepeatPolicy::Forward);
        assert!(config.capture_on_press);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: InputConfig = serde_yaml::from_str("repeat_policy: suppress\n").unwrap();
        assert_eq!(config.repeat_policy, RepeatPolicy::Suppress);
        assert_eq!(config.button_threshold, 0.5);
    }

    #[test]
    fn threshold_out_of_range_is_invalid() {
        let config = InputConfig {
            button_threshold: 0.0,
            ..InputConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_extension_rejected() {
        let tmp = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let result = load_file::<InputConfig>(tmp.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn json_file_loads() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("input.json");
        std::fs::write(&path, r#"{"button_threshold": 0.25}"#).unwrap();
        let config: InputConfig = load_file(&path).unwrap();
        assert_eq!(config.button_threshold, 0.25);
        assert_eq!(config.repeat_policy, RepeatPolicy::Forward);
    }
}
