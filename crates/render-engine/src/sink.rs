//! Presentation targets for rendered frames.
//!
//! The render loop hands each per-stick frame to a [`FrameSink`]. Windowed
//! display is outside this crate; the sinks here either discard frames or
//! periodically persist them as images.
//!
//! Frames carry packed `0xAARRGGBB` words, which sit in memory as BGRA on
//! little-endian targets. A display sink uploads
//! [`FrameBuffer::to_bgra_bytes`] as is; image encoders want
//! [`FrameBuffer::to_rgba_bytes`].

use std::path::{Path, PathBuf};

use stickheat_common::error::StickheatResult;
use stickheat_core::sample::Stick;

use crate::export::write_png;
use crate::frame::FrameBuffer;

/// Something that consumes rendered frames.
pub trait FrameSink: Send {
    /// Present one stick's frame for the current tick.
    ///
    /// The frame is borrowed and reused on the next tick; copy out whatever
    /// must outlive the call.
    fn present(&mut self, stick: Stick, frame: &FrameBuffer) -> StickheatResult<()>;

    fn name(&self) -> &str;
}

/// Drops every frame.
#[derive(Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _stick: Stick, _frame: &FrameBuffer) -> StickheatResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

/// Writes every Nth frame per stick to `<dir>/<stick>-<seq>.png`.
#[derive(Debug)]
pub struct PngSnapshotSink {
    dir: PathBuf,
    every_n_frames: u64,
    seen: [u64; 2],
    written: u64,
}

impl PngSnapshotSink {
    pub fn new(dir: impl Into<PathBuf>, every_n_frames: u64) -> Self {
        Self {
            dir: dir.into(),
            every_n_frames: every_n_frames.max(1),
            seen: [0; 2],
            written: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of images written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSnapshotSink {
    fn present(&mut self, stick: Stick, frame: &FrameBuffer) -> StickheatResult<()> {
        let slot = match stick {
            Stick::Left => 0,
            Stick::Right => 1,
        };
        let seq = self.seen[slot];
        self.seen[slot] += 1;

        if seq % self.every_n_frames != 0 {
            return Ok(());
        }

        let path = self
            .dir
            .join(format!("{}-{:06}.png", stick.label(), seq / self.every_n_frames));
        write_png(frame, &path)?;
        self.written += 1;
        tracing::debug!(path = %path.display(), "Wrote frame snapshot");
        Ok(())
    }

    fn name(&self) -> &str {
        "png"
    }
}
