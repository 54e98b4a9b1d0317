//! Per-tick input snapshot types.
//!
//! Stick axes are integer readings in `[0, 999]`, one grid cell per unit.

use serde::{Deserialize, Serialize};

/// Largest value an axis reading can take.
pub const AXIS_MAX: i32 = 999;

/// Reading reported by every axis when no device is connected.
pub const AXIS_NEUTRAL: i32 = 500;

/// Which physical stick a grid or sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stick {
    Left,
    Right,
}

impl Stick {
    pub const ALL: [Stick; 2] = [Stick::Left, Stick::Right];

    pub fn label(self) -> &'static str {
        match self {
            Stick::Left => "left",
            Stick::Right => "right",
        }
    }
}

/// One stick's position in sampled units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StickPosition {
    pub x: i32,
    pub y: i32,
}

impl StickPosition {
    pub const NEUTRAL: Self = Self::new(AXIS_NEUTRAL, AXIS_NEUTRAL);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamp both axes into `[0, AXIS_MAX]`.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0, AXIS_MAX),
            y: self.y.clamp(0, AXIS_MAX),
        }
    }
}

impl Default for StickPosition {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Three-position discrete switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchState {
    Low,
    #[default]
    Middle,
    High,
}

/// Everything the sampler reports for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StickSnapshot {
    pub left: StickPosition,
    pub right: StickPosition,
    pub switch: SwitchState,
    pub trigger: bool,
}

impl StickSnapshot {
    /// The snapshot reported when no device is connected.
    pub const NEUTRAL: Self = Self {
        left: StickPosition::NEUTRAL,
        right: StickPosition::NEUTRAL,
        switch: SwitchState::Middle,
        trigger: false,
    };

    pub fn position(&self, stick: Stick) -> StickPosition {
        match stick {
            Stick::Left => self.left,
            Stick::Right => self.right,
        }
    }

    /// Copy with the given stick moved.
    pub fn with_position(mut self, stick: Stick, position: StickPosition) -> Self {
        match stick {
            Stick::Left => self.left = position,
            Stick::Right => self.right = position,
        }
        self
    }

    /// Copy with both positions clamped onto the grid range.
    pub fn clamped(mut self) -> Self {
        self.left = self.left.clamped();
        self.right = self.right.clamped();
        self
    }

    pub fn with_switch(mut self, switch: SwitchState) -> Self {
        self.switch = switch;
        self
    }

    pub fn with_trigger(mut self, trigger: bool) -> Self {
        self.trigger = trigger;
        self
    }
}
