//! Axis sampler backend implementations.

#[cfg(target_os = "linux")]
pub mod evdev_joystick;

use std::path::Path;

use stickheat_common::config::DeviceConfig;
use stickheat_common::error::{StickheatError, StickheatResult};
use stickheat_core::sample::StickSnapshot;

use crate::AxisSampler;

/// Stub backend used when no joystick is present.
///
/// Always reports the neutral snapshot, which the deadzone filter treats
/// as idle, so nothing is stamped.
#[derive(Debug, Default)]
pub struct StubSampler;

impl StubSampler {
    pub fn new() -> Self {
        Self
    }
}

impl AxisSampler for StubSampler {
    fn sample(&mut self) -> StickheatResult<StickSnapshot> {
        Ok(StickSnapshot::NEUTRAL)
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn is_connected(&self) -> bool {
        false
    }
}

/// Replays a fixed sequence of snapshots, holding the last one once
/// the script runs out.
#[derive(Debug, Clone)]
pub struct ScriptedSampler {
    snapshots: Vec<StickSnapshot>,
    index: usize,
}

impl ScriptedSampler {
    pub fn new(snapshots: Vec<StickSnapshot>) -> Self {
        Self {
            snapshots,
            index: 0,
        }
    }

    /// Parse a JSONL script: one snapshot object per line. Blank lines and
    /// lines starting with `#` are skipped.
    pub fn from_jsonl(content: &str) -> StickheatResult<Self> {
        let snapshots = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(serde_json::from_str::<StickSnapshot>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(snapshots))
    }

    pub fn from_path(path: &Path) -> StickheatResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StickheatError::device(format!("Failed to read script {}: {e}", path.display()))
        })?;
        Self::from_jsonl(&content)
    }

    /// Whether every scripted snapshot has been replayed.
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.snapshots.len()
    }
}

impl AxisSampler for ScriptedSampler {
    fn sample(&mut self) -> StickheatResult<StickSnapshot> {
        if self.snapshots.is_empty() {
            return Ok(StickSnapshot::NEUTRAL);
        }
        let idx = self.index.min(self.snapshots.len() - 1);
        self.index = self.index.saturating_add(1);
        Ok(self.snapshots[idx])
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn is_connected(&self) -> bool {
        true
    }
}

/// Detect the best available sampler for the current system.
#[cfg(target_os = "linux")]
pub fn detect_best_sampler(config: &DeviceConfig) -> Box<dyn AxisSampler> {
    match evdev_joystick::EvdevJoystick::open(config) {
        Ok(joystick) => {
            tracing::info!(
                device = %joystick.device_name(),
                path = %joystick.path().display(),
                "Using evdev joystick"
            );
            return Box::new(joystick);
        }
        Err(e) => {
            tracing::warn!(error = %e, "No usable joystick, using stub sampler");
        }
    }

    tracing::warn!(
        details = %evdev_joystick::input_access_diagnostic(),
        "Using stub sampler; heatmaps will not accumulate"
    );
    Box::new(StubSampler::new())
}

/// Detect the best available sampler for the current system.
#[cfg(not(target_os = "linux"))]
pub fn detect_best_sampler(_config: &DeviceConfig) -> Box<dyn AxisSampler> {
    tracing::warn!("Joystick backends for this platform are not implemented yet; using stub sampler");
    Box::new(StubSampler::new())
}
