//! StickHeat Core: heat accumulation and tone mapping
//!
//! Turns a stream of two-stick samples into persistent density grids:
//! - **Deadzone filtering:** per-axis idle windows gate stamping
//! - **Recording state:** edge-triggered switch drives Recording/Paused
//! - **Stamping:** a radial falloff kernel adds unbounded raw exposure
//! - **Tone mapping:** linear, logarithmic, or histogram-equalized views
//! - **Persistence:** flat little-endian `f32` dump of both grids
//!
//! This crate is pure computation apart from the persistence helpers
//! that read and write files.

pub mod channel;
pub mod deadzone;
pub mod grid;
pub mod kernel;
pub mod persist;
pub mod recording;
pub mod sample;
pub mod session;
pub mod tone;
pub mod tuning;

pub use channel::StickChannel;
pub use grid::{DensityGrid, GRID_HEIGHT, GRID_WIDTH};
pub use sample::{Stick, StickPosition, StickSnapshot, SwitchState};
pub use session::{HeatSession, TickOutcome};
pub use tone::{ToneCurve, ToneMode};
pub use tuning::{TuningAction, TuningParams};
