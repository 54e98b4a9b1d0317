//! Per-tick accumulation pipeline.
//!
//! Each tick runs to completion before the next one starts:
//!
//! ```text
//! snapshot ──┬── positions ──────────────────────┐
//!            ├── switch edge ── recording state ─┤
//!            ├── deadzones ── both idle? ────────┼── stamp both channels
//!            └── trigger rising edge ──────────────── reset both grids
//! ```

use crate::channel::StickChannel;
use crate::deadzone::DeadzoneFilter;
use crate::grid::{DensityGrid, GRID_HEIGHT, GRID_WIDTH};
use crate::kernel::StampKernel;
use crate::recording::{RecordingMachine, RecordingState, RisingEdge};
use crate::sample::{Stick, StickSnapshot};
use crate::tuning::TuningParams;

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// New recording state if the switch changed it this tick.
    pub recording_changed: Option<RecordingState>,
    /// Whether the grids were stamped.
    pub stamped: bool,
    /// Whether the reset trigger cleared the grids.
    pub reset: bool,
}

/// Two stick channels plus the state that decides when to stamp them.
#[derive(Debug, Clone)]
pub struct HeatSession {
    channels: [StickChannel; 2],
    deadzones: DeadzoneFilter,
    recording: RecordingMachine,
    reset_trigger: RisingEdge,
    kernel: StampKernel,
    ticks: u64,
}

impl HeatSession {
    /// A session with standard 1000×1000 grids.
    pub fn new(deadzones: DeadzoneFilter) -> Self {
        Self::with_size(deadzones, GRID_WIDTH, GRID_HEIGHT)
    }

    pub fn with_size(deadzones: DeadzoneFilter, width: usize, height: usize) -> Self {
        let defaults = TuningParams::default();
        Self {
            channels: [
                StickChannel::new(Stick::Left, DensityGrid::new(width, height)),
                StickChannel::new(Stick::Right, DensityGrid::new(width, height)),
            ],
            deadzones,
            recording: RecordingMachine::new(),
            reset_trigger: RisingEdge::new(),
            kernel: StampKernel::new(defaults.kernel_radius(), defaults.kernel_scale()),
            ticks: 0,
        }
    }

    /// Run one tick against this snapshot and tuning.
    pub fn tick(&mut self, snapshot: &StickSnapshot, tuning: &TuningParams) -> TickOutcome {
        self.ticks += 1;
        let mut outcome = TickOutcome::default();
        // Deadzones and stamps both see the on-grid position
        let snapshot = snapshot.clamped();

        for channel in &mut self.channels {
            channel.set_position(snapshot.position(channel.stick()));
        }

        outcome.recording_changed = self.recording.observe_switch(snapshot.switch);

        if self.recording.is_recording() && !self.deadzones.both_idle(&snapshot) {
            if !self
                .kernel
                .matches(tuning.kernel_radius(), tuning.kernel_scale())
            {
                self.kernel = StampKernel::new(tuning.kernel_radius(), tuning.kernel_scale());
            }
            for channel in &mut self.channels {
                channel.stamp(&self.kernel);
            }
            outcome.stamped = true;
        }

        if self.reset_trigger.observe(snapshot.trigger) {
            self.reset();
            outcome.reset = true;
        }

        outcome
    }

    /// Zero both grids.
    pub fn reset(&mut self) {
        for channel in &mut self.channels {
            channel.reset();
        }
    }

    /// Replace both grids wholesale (after a successful load).
    pub fn replace_grids(&mut self, left: DensityGrid, right: DensityGrid) {
        self.channels[0].replace_grid(left);
        self.channels[1].replace_grid(right);
    }

    pub fn channel(&self, stick: Stick) -> &StickChannel {
        match stick {
            Stick::Left => &self.channels[0],
            Stick::Right => &self.channels[1],
        }
    }

    pub fn channels(&self) -> &[StickChannel; 2] {
        &self.channels
    }

    pub fn grid(&self, stick: Stick) -> &DensityGrid {
        self.channel(stick).grid()
    }

    pub fn recording_state(&self) -> RecordingState {
        self.recording.state()
    }

    pub fn deadzones(&self) -> &DeadzoneFilter {
        &self.deadzones
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for HeatSession {
    fn default() -> Self {
        Self::new(DeadzoneFilter::default())
    }
}
