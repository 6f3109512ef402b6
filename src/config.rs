//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! All sections and fields are optional; missing values fall back to
//! defaults that match a stock Xbox-style gamepad on the Linux `xpad`
//! driver. Validation runs at load time so a malformed configuration
//! never reaches the decode loop.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::engine::mapping::LogicalControl;
use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub axes: AxesConfig,

    #[serde(default)]
    pub mapping: MappingConfig,
}

/// Device discovery configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DeviceConfig {
    /// Explicit device path (e.g. `/dev/input/event5`).
    /// Empty means auto-detect.
    #[serde(default)]
    pub path: String,

    /// Case-insensitive substring matched against device names during
    /// auto-detection.
    #[serde(default = "default_name_match")]
    pub name_match: String,
}

/// Axis range and trigger activation configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AxesConfig {
    /// Maximum stick axis magnitude as reported by the device.
    #[serde(default = "default_stick_max")]
    pub stick_max: i32,

    /// Maximum trigger value as reported by the device.
    #[serde(default = "default_trigger_max")]
    pub trigger_max: i32,

    /// Fraction of `trigger_max` beyond which a trigger counts as pressed.
    #[serde(default = "default_trigger_threshold")]
    pub trigger_threshold: f32,
}

/// Control mapping overrides
#[derive(Debug, Deserialize, Clone, Default)]
pub struct MappingConfig {
    /// Raw (event kind, code) pairs remapped to a named logical control.
    #[serde(default)]
    pub overrides: Vec<MappingOverride>,
}

/// A single mapping override entry
#[derive(Debug, Deserialize, Clone)]
pub struct MappingOverride {
    /// Raw event kind: `"key"` or `"axis"`.
    pub event: String,

    /// Raw event code from the device.
    pub code: u16,

    /// Logical control name, e.g. `"button_a"` or `"left_stick_x"`.
    pub control: String,
}

// Default value functions
fn default_name_match() -> String { "pad".to_string() }

fn default_stick_max() -> i32 { 32767 }
fn default_trigger_max() -> i32 { 1023 }
fn default_trigger_threshold() -> f32 { 0.5 }

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            name_match: default_name_match(),
        }
    }
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            stick_max: default_stick_max(),
            trigger_max: default_trigger_max(),
            trigger_threshold: default_trigger_threshold(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: DeviceConfig::default(),
            axes: AxesConfig::default(),
            mapping: MappingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use joypad_events::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range or a
    /// mapping override names an unknown logical control.
    pub fn validate(&self) -> Result<()> {
        if self.device.path.is_empty() && self.device.name_match.is_empty() {
            return Err(crate::error::JoypadError::Config(
                toml::de::Error::custom("name_match cannot be empty when no device path is set")
            ));
        }

        if self.axes.stick_max <= 0 {
            return Err(crate::error::JoypadError::Config(
                toml::de::Error::custom("stick_max must be greater than 0")
            ));
        }

        if self.axes.trigger_max <= 0 {
            return Err(crate::error::JoypadError::Config(
                toml::de::Error::custom("trigger_max must be greater than 0")
            ));
        }

        if self.axes.trigger_threshold <= 0.0 || self.axes.trigger_threshold > 1.0 {
            return Err(crate::error::JoypadError::Config(
                toml::de::Error::custom("trigger_threshold must be within (0.0, 1.0]")
            ));
        }

        for entry in &self.mapping.overrides {
            if entry.event != "key" && entry.event != "axis" {
                return Err(crate::error::JoypadError::Config(
                    toml::de::Error::custom(format!(
                        "override event must be \"key\" or \"axis\", got {:?}", entry.event
                    ))
                ));
            }

            let control: LogicalControl = entry.control.parse().map_err(|_| {
                crate::error::JoypadError::Config(
                    toml::de::Error::custom(format!("unknown control name {:?}", entry.control))
                )
            })?;

            // A key code can only drive a button, an axis code only an axis.
            let kind_matches = match entry.event.as_str() {
                "key" => control.is_button(),
                _ => control.is_axis(),
            };
            if !kind_matches {
                return Err(crate::error::JoypadError::Config(
                    toml::de::Error::custom(format!(
                        "control {:?} cannot be driven by a {:?} event", entry.control, entry.event
                    ))
                ));
            }
        }

        Ok(())
    }

    /// Trigger activation threshold in raw device units.
    #[must_use]
    pub fn trigger_threshold_raw(&self) -> i32 {
        (self.axes.trigger_threshold * self.axes.trigger_max as f32) as i32
    }
}
