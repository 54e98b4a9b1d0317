//! StickHeat Input Sampler
//!
//! Produces one [`StickSnapshot`] per tick from a pluggable backend:
//!
//! - **Evdev:** Linux joystick event device, read as absolute-axis state
//! - **Scripted:** replays a fixed snapshot sequence (tests, demos)
//! - **Stub:** always reports the neutral snapshot (no device)
//!
//! Raw device ranges are converted to `[0, 999]` stick units by
//! [`calibration`].

pub mod backends;
pub mod calibration;

use stickheat_common::error::StickheatResult;
use stickheat_core::sample::StickSnapshot;

pub use backends::{detect_best_sampler, ScriptedSampler, StubSampler};

/// Trait for joystick sampling backends.
pub trait AxisSampler: Send {
    /// Read the current state of every control.
    fn sample(&mut self) -> StickheatResult<StickSnapshot>;

    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Whether a physical device backs this sampler.
    fn is_connected(&self) -> bool;
}

/// Sample with graceful degradation: errors yield the neutral snapshot.
///
/// Returns the snapshot and the error that was swallowed, if any, so the
/// caller can decide how loudly to report it.
pub fn sample_or_neutral(
    sampler: &mut dyn AxisSampler,
) -> (StickSnapshot, Option<stickheat_common::error::StickheatError>) {
    match sampler.sample() {
        Ok(snapshot) => (snapshot, None),
        Err(e) => (StickSnapshot::NEUTRAL, Some(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickheat_common::error::StickheatError;

    struct Unplugged;

    impl AxisSampler for Unplugged {
        fn sample(&mut self) -> StickheatResult<StickSnapshot> {
            Err(StickheatError::device("joystick unplugged"))
        }

        fn name(&self) -> &str {
            "unplugged"
        }

        fn is_connected(&self) -> bool {
            false
        }
    }

    #[test]
    fn failing_sampler_degrades_to_neutral() {
        let (snapshot, err) = sample_or_neutral(&mut Unplugged);
        assert_eq!(snapshot, StickSnapshot::NEUTRAL);
        assert!(matches!(err, Some(StickheatError::Device { .. })));
    }
}
