//! Runtime tuning of the stamping kernel and display.
//!
//! [`TuningParams`] is an immutable snapshot: actions produce a new
//! value that the tick loop swaps in between ticks, so a tick never
//! observes a half-applied change and accumulated density is never
//! rewritten.

use crate::tone::ToneMode;

pub const KERNEL_RADIUS_MIN: i32 = 1;
pub const KERNEL_RADIUS_MAX: i32 = 20;
pub const KERNEL_SCALE_MIN: f32 = 0.1;
pub const KERNEL_SCALE_STEP_UP: f32 = 0.1;
pub const KERNEL_SCALE_STEP_DOWN: f32 = 0.01;
pub const SATURATION_MIN: f32 = 0.05;
pub const SATURATION_MAX: f32 = 5.0;
pub const SATURATION_STEP: f32 = 0.05;

/// A discrete tuning input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TuningAction {
    ScaleUp,
    ScaleDown,
    RadiusUp,
    RadiusDown,
    SaturationUp,
    SaturationDown,
    CycleToneMode,
}

/// Kernel and display parameters in effect for a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TuningParams {
    kernel_scale: f32,
    kernel_radius: i32,
    saturation: f32,
    tone_mode: ToneMode,
}

impl Default for TuningParams {
    fn default() -> Self {
        Self {
            kernel_scale: 0.1,
            kernel_radius: 15,
            saturation: 1.0,
            tone_mode: ToneMode::Linear,
        }
    }
}

impl TuningParams {
    /// Build a snapshot, clamping every value into its legal range.
    pub fn new(kernel_scale: f32, kernel_radius: i32, saturation: f32, tone_mode: ToneMode) -> Self {
        Self {
            kernel_scale: clamp_scale(kernel_scale),
            kernel_radius: kernel_radius.clamp(KERNEL_RADIUS_MIN, KERNEL_RADIUS_MAX),
            saturation: clamp_saturation(saturation),
            tone_mode,
        }
    }

    pub fn kernel_scale(&self) -> f32 {
        self.kernel_scale
    }

    pub fn kernel_radius(&self) -> i32 {
        self.kernel_radius
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn tone_mode(&self) -> ToneMode {
        self.tone_mode
    }

    pub fn with_tone_mode(self, tone_mode: ToneMode) -> Self {
        Self { tone_mode, ..self }
    }

    /// Apply one action. Out-of-range requests saturate at the boundary.
    pub fn apply(self, action: TuningAction) -> Self {
        match action {
            TuningAction::ScaleUp => Self {
                kernel_scale: clamp_scale(self.kernel_scale + KERNEL_SCALE_STEP_UP),
                ..self
            },
            TuningAction::ScaleDown => Self {
                kernel_scale: clamp_scale(self.kernel_scale - KERNEL_SCALE_STEP_DOWN),
                ..self
            },
            TuningAction::RadiusUp => Self {
                kernel_radius: (self.kernel_radius + 1).min(KERNEL_RADIUS_MAX),
                ..self
            },
            TuningAction::RadiusDown => Self {
                kernel_radius: (self.kernel_radius - 1).max(KERNEL_RADIUS_MIN),
                ..self
            },
            TuningAction::SaturationUp => Self {
                saturation: clamp_saturation(self.saturation + SATURATION_STEP),
                ..self
            },
            TuningAction::SaturationDown => Self {
                saturation: clamp_saturation(self.saturation - SATURATION_STEP),
                ..self
            },
            TuningAction::CycleToneMode => Self {
                tone_mode: self.tone_mode.next(),
                ..self
            },
        }
    }

    /// One-line status text for operators.
    pub fn status_line(&self) -> String {
        format!(
            "Scale: {:.2} | Radius: {} | Saturation: {:.2} | Mode: {}",
            self.kernel_scale, self.kernel_radius, self.saturation, self.tone_mode
        )
    }
}

fn clamp_scale(value: f32) -> f32 {
    if value.is_nan() {
        return KERNEL_SCALE_MIN;
    }
    value.max(KERNEL_SCALE_MIN)
}

fn clamp_saturation(value: f32) -> f32 {
    if value.is_nan() {
        return SATURATION_MIN;
    }
    value.clamp(SATURATION_MIN, SATURATION_MAX)
}
