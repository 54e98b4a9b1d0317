//! Edge detection and the recording state machine.
//!
//! Both the three-position switch and the reset trigger are level
//! signals sampled every tick. Actions fire on edges only, so holding
//! a control never repeats its effect.

use crate::sample::SwitchState;

/// Reports a value only when it differs from the previously observed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeDetector<T> {
    last: T,
}

impl<T: Copy + PartialEq> EdgeDetector<T> {
    pub fn new(initial: T) -> Self {
        Self { last: initial }
    }

    /// Feed the current reading. Returns `Some(value)` on a change.
    pub fn observe(&mut self, value: T) -> Option<T> {
        if value == self.last {
            return None;
        }
        self.last = value;
        Some(value)
    }

    pub fn last(&self) -> T {
        self.last
    }
}

/// Fires on a false → true transition of a boolean level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RisingEdge {
    inner: EdgeDetector<bool>,
}

impl RisingEdge {
    pub fn new() -> Self {
        Self {
            inner: EdgeDetector::new(false),
        }
    }

    pub fn observe(&mut self, level: bool) -> bool {
        self.inner.observe(level) == Some(true)
    }
}

impl<T: Default + Copy + PartialEq> Default for EdgeDetector<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Whether samples are being written into the grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordingState {
    #[default]
    Recording,
    Paused,
}

impl RecordingState {
    pub fn is_recording(self) -> bool {
        self == RecordingState::Recording
    }
}

/// Recording/Paused, driven by switch edges.
///
/// High starts recording, Low pauses, Middle is neutral. The machine
/// starts in Recording with the switch assumed at Middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordingMachine {
    state: RecordingState,
    switch: EdgeDetector<SwitchState>,
}

impl RecordingMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state.is_recording()
    }

    /// Feed this tick's switch reading. Returns the new state if the
    /// switch edge changed it.
    pub fn observe_switch(&mut self, switch: SwitchState) -> Option<RecordingState> {
        let next = match self.switch.observe(switch)? {
            SwitchState::High => RecordingState::Recording,
            SwitchState::Low => RecordingState::Paused,
            SwitchState::Middle => return None,
        };
        if next == self.state {
            return None;
        }
        self.state = next;
        Some(next)
    }
}
