//! StickHeat Render Engine
//!
//! Turns density grids into packed BGRA frames for a display surface.
//!
//! # Pipeline Architecture
//!
//! ```text
//! DensityGrid ── ToneCurve (linear | log | histeq) ──┐
//!                                                    ├── color map ── FrameBuffer
//! live stick position ─────────────── marker (7×7) ──┘                    │
//!                                                                         ▼
//!                                                      FrameSink (display, PNG, null)
//! ```

pub mod color;
pub mod export;
pub mod frame;
pub mod sink;

pub use color::color_from_value;
pub use frame::{FrameBuffer, FrameRenderer};
pub use sink::{FrameSink, NullSink, PngSnapshotSink};
