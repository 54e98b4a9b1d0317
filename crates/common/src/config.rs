//! Application configuration.
//!
//! Only static setup lives here (deadzones, device mapping, tick rate,
//! logging). Kernel and display tuning is runtime state and is never
//! written to disk.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{StickheatError, StickheatResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Idle windows for each stick axis.
    pub deadzones: DeadzoneConfig,

    /// Joystick device selection and axis mapping.
    pub device: DeviceConfig,

    /// Sampling loop timing.
    pub tick: TickConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// A `center ± radius` window on one axis, in sampled units `[0, 999]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisWindow {
    pub center: i32,
    pub radius: i32,
}

impl AxisWindow {
    pub const fn new(center: i32, radius: i32) -> Self {
        Self { center, radius }
    }
}

impl Default for AxisWindow {
    fn default() -> Self {
        Self::new(500, 8)
    }
}

/// Independent deadzone windows for the four stick axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadzoneConfig {
    pub left_x: AxisWindow,
    pub left_y: AxisWindow,
    pub right_x: AxisWindow,
    pub right_y: AxisWindow,
}

/// evdev absolute-axis codes for each logical control.
///
/// Defaults match a radio transmitter in joystick mode: right stick on
/// X/Y, left stick on RX/Z, the reset button on RY, the three-position
/// switch on RZ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisMap {
    pub left_x: u16,
    pub left_y: u16,
    pub right_x: u16,
    pub right_y: u16,
    pub trigger: u16,
    pub switch: u16,
}

impl Default for AxisMap {
    fn default() -> Self {
        Self {
            left_x: 0x03,  // ABS_RX
            left_y: 0x02,  // ABS_Z
            right_x: 0x00, // ABS_X
            right_y: 0x01, // ABS_Y
            trigger: 0x04, // ABS_RY
            switch: 0x05,  // ABS_RZ
        }
    }
}

/// Joystick device settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Explicit event device (e.g. `/dev/input/event7`). Auto-detected when unset.
    pub path: Option<PathBuf>,

    /// Axis assignment.
    pub axes: AxisMap,

    /// Invert both stick Y axes so "up" maps to low row indices.
    pub flip_y: bool,

    /// Normalized distance from center before the switch leaves Middle.
    pub switch_threshold: f32,

    /// Normalized level above which the reset trigger counts as pressed.
    pub trigger_threshold: f32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: None,
            axes: AxisMap::default(),
            flip_y: true,
            switch_threshold: 0.25,
            trigger_threshold: 0.9,
        }
    }
}

/// Sampling loop timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Target period between ticks in milliseconds.
    pub period_ms: u64,

    /// Emit tick timing statistics every N ticks (0 disables).
    pub stats_every_ticks: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            period_ms: 4,
            stats_every_ticks: 2500,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "stickheat_core=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &std::path::Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Reject values the tick loop cannot work with.
    pub fn validate(&self) -> StickheatResult<()> {
        let windows = [
            ("left_x", self.deadzones.left_x),
            ("left_y", self.deadzones.left_y),
            ("right_x", self.deadzones.right_x),
            ("right_y", self.deadzones.right_y),
        ];
        for (axis, window) in windows {
            if window.radius < 0 {
                return Err(StickheatError::config(format!(
                    "deadzones.{axis}.radius must not be negative (got {})",
                    window.radius
                )));
            }
        }

        for (name, value) in [
            ("device.switch_threshold", self.device.switch_threshold),
            ("device.trigger_threshold", self.device.trigger_threshold),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(StickheatError::config(format!(
                    "{name} must be in [0, 1) (got {value})"
                )));
            }
        }

        if self.tick.period_ms == 0 {
            return Err(StickheatError::config("tick.period_ms must be at least 1"));
        }
        Ok(())
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, config_path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("stickheat").join("config.json")
}
