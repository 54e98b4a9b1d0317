//! Linux joystick sampling through evdev absolute-axis state.

use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use evdev::{AbsoluteAxisType, Device};
use stickheat_common::config::{AxisMap, DeviceConfig};
use stickheat_common::error::{StickheatError, StickheatResult};
use stickheat_core::sample::{StickPosition, StickSnapshot};

use crate::calibration::{switch_from_normalized, trigger_from_normalized, AxisRange};
use crate::AxisSampler;

pub struct EvdevJoystick {
    device: Device,
    path: PathBuf,
    name: String,
    axes: AxisMap,
    flip_y: bool,
    switch_threshold: f32,
    trigger_threshold: f32,
}

impl EvdevJoystick {
    /// Open the configured device, or the first one exposing every mapped axis.
    pub fn open(config: &DeviceConfig) -> StickheatResult<Self> {
        let (path, device) = match &config.path {
            Some(path) => {
                let device = Device::open(path).map_err(|e| {
                    StickheatError::device(format!("Failed to open {}: {e}", path.display()))
                })?;
                (path.clone(), device)
            }
            None => evdev::enumerate()
                .find(|(_, device)| has_axes(device, &config.axes))
                .ok_or_else(|| {
                    StickheatError::device("No input device exposes the configured joystick axes")
                })?,
        };

        if !has_axes(&device, &config.axes) {
            return Err(StickheatError::device(format!(
                "{} is missing one of the configured axes",
                path.display()
            )));
        }

        let name = device.name().unwrap_or("unnamed joystick").to_string();
        Ok(Self {
            device,
            path,
            name,
            axes: config.axes,
            flip_y: config.flip_y,
            switch_threshold: config.switch_threshold,
            trigger_threshold: config.trigger_threshold,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AxisSampler for EvdevJoystick {
    fn sample(&mut self) -> StickheatResult<StickSnapshot> {
        let state = self.device.get_abs_state().map_err(|e| {
            StickheatError::device(format!("Failed reading {}: {e}", self.path.display()))
        })?;

        let read = |code: u16| -> StickheatResult<(i32, AxisRange)> {
            let info = state.get(code as usize).ok_or_else(|| {
                StickheatError::device(format!("Axis code {code:#x} out of range"))
            })?;
            Ok((info.value, AxisRange::new(info.minimum, info.maximum)))
        };

        let stick = |x_code: u16, y_code: u16| -> StickheatResult<StickPosition> {
            let (x, x_range) = read(x_code)?;
            let (y, y_range) = read(y_code)?;
            Ok(StickPosition::new(
                x_range.to_stick_units(x, false),
                y_range.to_stick_units(y, self.flip_y),
            ))
        };

        let left = stick(self.axes.left_x, self.axes.left_y)?;
        let right = stick(self.axes.right_x, self.axes.right_y)?;

        let (switch_raw, switch_range) = read(self.axes.switch)?;
        let (trigger_raw, trigger_range) = read(self.axes.trigger)?;

        Ok(StickSnapshot {
            left,
            right,
            switch: switch_from_normalized(
                switch_range.normalized(switch_raw),
                self.switch_threshold,
            ),
            trigger: trigger_from_normalized(
                trigger_range.normalized(trigger_raw),
                self.trigger_threshold,
            ),
        })
    }

    fn name(&self) -> &str {
        "evdev"
    }

    fn is_connected(&self) -> bool {
        true
    }
}

fn has_axes(device: &Device, axes: &AxisMap) -> bool {
    let Some(supported) = device.supported_absolute_axes() else {
        return false;
    };
    [
        axes.left_x,
        axes.left_y,
        axes.right_x,
        axes.right_y,
        axes.switch,
        axes.trigger,
    ]
    .into_iter()
    .all(|code| supported.contains(AbsoluteAxisType(code)))
}

/// Human-readable hint for why no joystick could be opened.
pub fn input_access_diagnostic() -> String {
    let path = "/dev/input";
    let uid = unsafe { libc::geteuid() };
    let gid = unsafe { libc::getegid() };

    match std::fs::metadata(path) {
        Ok(meta) => {
            let mode = meta.mode() & 0o777;
            format!(
                "dir={path} mode={mode:o} process_uid={uid} process_gid={gid}; event devices are usually readable by the 'input' group only. Fix: sudo usermod -aG input $USER && log out/in"
            )
        }
        Err(err) => format!(
            "dir={path} unavailable ({err}); ensure the joystick is connected and the evdev driver is loaded"
        ),
    }
}

/// Enumerate event devices that look like joysticks, for `stickheat check`.
pub fn list_joysticks(axes: &AxisMap) -> Vec<(PathBuf, String, bool)> {
    evdev::enumerate()
        .filter(|(_, device)| device.supported_absolute_axes().is_some())
        .map(|(path, device)| {
            let name = device.name().unwrap_or("unnamed").to_string();
            let compatible = has_axes(&device, axes);
            (path, name, compatible)
        })
        .collect()
}
