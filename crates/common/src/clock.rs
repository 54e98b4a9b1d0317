//! Clock and timing utilities for the sampling loop.
//!
//! The tick loop runs at a fixed target period. This module provides:
//! - A session clock anchored at startup (monotonic + wall time)
//! - Tick duration statistics for slow-tick diagnostics

use std::time::{Duration, Instant};

/// A session clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment sampling started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant sampling started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Get seconds elapsed since session start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Filesystem-safe wall-clock label, e.g. `20260101-120000`.
    pub fn file_stamp() -> String {
        chrono::Local::now().format("%Y%m%d-%H%M%S").to_string()
    }
}

/// Convert a tick rate in Hz to a period, never shorter than 1ms.
pub fn period_from_hz(hz: u32) -> Duration {
    Duration::from_micros((1_000_000 / hz.max(1) as u64).max(1_000))
}

/// Aggregated tick durations over a reporting window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStats {
    pub ticks: u64,
    pub mean: Duration,
    pub max: Duration,
    /// Ticks that took longer than the target period.
    pub overruns: u64,
}

/// Accumulates tick durations and emits a report every `window` ticks.
#[derive(Debug)]
pub struct TickMeter {
    target: Duration,
    window: u64,
    ticks: u64,
    total: Duration,
    max: Duration,
    overruns: u64,
}

impl TickMeter {
    /// `window == 0` disables reporting.
    pub fn new(target: Duration, window: u64) -> Self {
        Self {
            target,
            window,
            ticks: 0,
            total: Duration::ZERO,
            max: Duration::ZERO,
            overruns: 0,
        }
    }

    /// Record one tick. Returns the window statistics when a window completes.
    pub fn record(&mut self, elapsed: Duration) -> Option<TickStats> {
        if self.window == 0 {
            return None;
        }

        self.ticks += 1;
        self.total += elapsed;
        self.max = self.max.max(elapsed);
        if elapsed > self.target {
            self.overruns += 1;
        }

        if self.ticks < self.window {
            return None;
        }

        let stats = TickStats {
            ticks: self.ticks,
            mean: self.total / self.ticks as u32,
            max: self.max,
            overruns: self.overruns,
        };
        self.ticks = 0;
        self.total = Duration::ZERO;
        self.max = Duration::ZERO;
        self.overruns = 0;
        Some(stats)
    }

    /// Target tick period.
    pub fn target(&self) -> Duration {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = SessionClock::start();
        assert!(clock.elapsed_secs() < 1.0);
        assert!(!clock.epoch_wall().is_empty());
    }

    #[test]
    fn test_period_from_hz() {
        assert_eq!(period_from_hz(250), Duration::from_millis(4));
        assert_eq!(period_from_hz(0), Duration::from_secs(1));
        // Clamped to 1ms
        assert_eq!(period_from_hz(10_000), Duration::from_millis(1));
    }

    #[test]
    fn test_tick_meter_reports_per_window() {
        let mut meter = TickMeter::new(Duration::from_millis(4), 3);
        assert!(meter.record(Duration::from_millis(2)).is_none());
        assert!(meter.record(Duration::from_millis(6)).is_none());
        let stats = meter.record(Duration::from_millis(4)).unwrap();

        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.mean, Duration::from_millis(4));
        assert_eq!(stats.max, Duration::from_millis(6));
        assert_eq!(stats.overruns, 1);

        // Window resets
        assert!(meter.record(Duration::from_millis(1)).is_none());
    }

    #[test]
    fn test_tick_meter_disabled() {
        let mut meter = TickMeter::new(Duration::from_millis(4), 0);
        for _ in 0..10 {
            assert!(meter.record(Duration::from_millis(9)).is_none());
        }
    }
}
