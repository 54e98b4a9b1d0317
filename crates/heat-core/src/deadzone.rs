//! Idle classification of stick samples.

use stickheat_common::config::{AxisWindow, DeadzoneConfig};

use crate::sample::{Stick, StickPosition, StickSnapshot};

/// `|value - center| <= radius`.
pub fn is_idle(value: i32, center: i32, radius: i32) -> bool {
    (value - center).abs() <= radius
}

/// Deadzone windows for both axes of one stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickDeadzone {
    pub x: AxisWindow,
    pub y: AxisWindow,
}

impl StickDeadzone {
    /// A stick is idle only when both of its axes are.
    pub fn is_idle(&self, position: StickPosition) -> bool {
        is_idle(position.x, self.x.center, self.x.radius)
            && is_idle(position.y, self.y.center, self.y.radius)
    }
}

/// Four independent axis windows, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadzoneFilter {
    left: StickDeadzone,
    right: StickDeadzone,
}

impl DeadzoneFilter {
    pub fn new(left: StickDeadzone, right: StickDeadzone) -> Self {
        Self { left, right }
    }

    pub fn from_config(config: &DeadzoneConfig) -> Self {
        Self {
            left: StickDeadzone {
                x: config.left_x,
                y: config.left_y,
            },
            right: StickDeadzone {
                x: config.right_x,
                y: config.right_y,
            },
        }
    }

    pub fn stick(&self, stick: Stick) -> &StickDeadzone {
        match stick {
            Stick::Left => &self.left,
            Stick::Right => &self.right,
        }
    }

    pub fn is_stick_idle(&self, stick: Stick, position: StickPosition) -> bool {
        self.stick(stick).is_idle(position)
    }

    /// True only when every axis of both sticks is inside its window.
    ///
    /// Gating is all-or-nothing: one active stick keeps both grids stamping.
    pub fn both_idle(&self, snapshot: &StickSnapshot) -> bool {
        Stick::ALL
            .iter()
            .all(|&stick| self.is_stick_idle(stick, snapshot.position(stick)))
    }
}

impl Default for DeadzoneFilter {
    fn default() -> Self {
        Self::from_config(&DeadzoneConfig::default())
    }
}
