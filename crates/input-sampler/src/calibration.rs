//! Raw axis value conversion.
//!
//! Devices report each axis in their own `[min, max]` range. Sticks are
//! mapped onto `[0, 999]`; the switch and trigger are read from the
//! axis position normalized to `[-1, 1]`.

use stickheat_core::sample::{SwitchState, AXIS_MAX};

/// The raw range a device reports for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRange {
    pub min: i32,
    pub max: i32,
}

impl AxisRange {
    /// Full signed 16-bit range used by most gamepads.
    pub const I16: AxisRange = AxisRange {
        min: -32768,
        max: 32767,
    };

    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    fn span(&self) -> f64 {
        (self.max as f64 - self.min as f64).max(1.0)
    }

    /// Map a raw reading to stick units, truncating toward zero.
    pub fn to_stick_units(&self, raw: i32, flip: bool) -> i32 {
        let raw = if flip {
            // Mirror within the range
            self.max as i64 + self.min as i64 - raw as i64
        } else {
            raw as i64
        };
        let t = (raw as f64 - self.min as f64) / self.span();
        ((t * AXIS_MAX as f64) as i32).clamp(0, AXIS_MAX)
    }

    /// Map a raw reading to `[-1, 1]` around the range midpoint.
    pub fn normalized(&self, raw: i32) -> f32 {
        let t = (raw as f64 - self.min as f64) / self.span();
        ((t * 2.0 - 1.0) as f32).clamp(-1.0, 1.0)
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self::I16
    }
}

/// Three-position switch from a normalized axis.
pub fn switch_from_normalized(value: f32, threshold: f32) -> SwitchState {
    if value < -threshold {
        SwitchState::Low
    } else if value > threshold {
        SwitchState::High
    } else {
        SwitchState::Middle
    }
}

/// A button wired as an axis counts as pressed past the threshold.
pub fn trigger_from_normalized(value: f32, threshold: f32) -> bool {
    value > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i16_range_maps_to_stick_units() {
        let range = AxisRange::I16;
        assert_eq!(range.to_stick_units(-32768, false), 0);
        assert_eq!(range.to_stick_units(32767, false), 999);
        assert_eq!(range.to_stick_units(0, false), 499);
    }

    #[test]
    fn flip_mirrors_within_range() {
        let range = AxisRange::I16;
        assert_eq!(range.to_stick_units(-32768, true), 999);
        assert_eq!(range.to_stick_units(32767, true), 0);

        let range = AxisRange::new(0, 1000);
        assert_eq!(range.to_stick_units(250, true), 749);
    }

    #[test]
    fn out_of_range_readings_clamp() {
        let range = AxisRange::new(0, 255);
        assert_eq!(range.to_stick_units(-10, false), 0);
        assert_eq!(range.to_stick_units(400, false), 999);
    }

    #[test]
    fn degenerate_range_does_not_divide_by_zero() {
        let range = AxisRange::new(5, 5);
        assert_eq!(range.to_stick_units(5, false), 0);
        assert!(range.normalized(5).is_finite());
    }

    #[test]
    fn switch_positions() {
        let range = AxisRange::I16;
        let threshold = 0.25;
        assert_eq!(
            switch_from_normalized(range.normalized(-32768), threshold),
            SwitchState::Low
        );
        assert_eq!(
            switch_from_normalized(range.normalized(0), threshold),
            SwitchState::Middle
        );
        assert_eq!(
            switch_from_normalized(range.normalized(32767), threshold),
            SwitchState::High
        );
        assert_eq!(
            switch_from_normalized(range.normalized(8000), threshold),
            SwitchState::Middle
        );
    }

    #[test]
    fn trigger_requires_near_full_travel() {
        let range = AxisRange::I16;
        assert!(!trigger_from_normalized(range.normalized(0), 0.9));
        assert!(!trigger_from_normalized(range.normalized(29000), 0.9));
        assert!(trigger_from_normalized(range.normalized(32767), 0.9));
    }
}
