//! Frame composition: tone-mapped heat plus the live position marker.

use stickheat_core::channel::StickChannel;
use stickheat_core::grid::DensityGrid;
use stickheat_core::sample::Stick;
use stickheat_core::session::HeatSession;
use stickheat_core::tone::ToneCurve;
use stickheat_core::tuning::TuningParams;

use crate::color::{color_from_value, to_rgba};

/// Marker half-size in pixels (7×7 square).
pub const MARKER_HALF_SIZE: i32 = 3;

/// A pre-sized packed-pixel buffer, row-major, `0xAARRGGBB` per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0xFF00_0000; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Fill a `(2·half+1)²` square centered at `(cx, cy)`, clipped to the frame.
    pub fn fill_square(&mut self, cx: i32, cy: i32, half: i32, color: u32) {
        for y in cy - half..=cy + half {
            for x in cx - half..=cx + half {
                if let Some(idx) = self.index(x, y) {
                    self.pixels[idx] = color;
                }
            }
        }
    }

    /// Pixels as BGRA bytes, the layout display surfaces consume.
    pub fn to_bgra_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_le_bytes()).collect()
    }

    /// Pixels as RGBA bytes, for image encoders.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&p| to_rgba(p)).collect()
    }

    fn ensure_size(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            *self = Self::new(width, height);
        }
    }
}

/// Tone-map and color a grid into `frame`, resizing it to match.
pub fn render_heat(frame: &mut FrameBuffer, grid: &DensityGrid, tuning: &TuningParams) {
    frame.ensure_size(grid.width(), grid.height());

    let curve = ToneCurve::prepare(tuning.tone_mode(), tuning.saturation(), grid);
    for (pixel, &raw) in frame.pixels.iter_mut().zip(grid.cells()) {
        *pixel = color_from_value(curve.apply(raw));
    }
}

/// Render a channel's heat, then draw its marker on top.
pub fn render_channel(frame: &mut FrameBuffer, channel: &StickChannel, tuning: &TuningParams) {
    render_heat(frame, channel.grid(), tuning);

    let position = channel.last_position();
    frame.fill_square(
        position.x,
        position.y,
        MARKER_HALF_SIZE,
        channel.marker_color(),
    );
}

/// Reusable per-stick frames for a session.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    frames: [FrameBuffer; 2],
    frames_rendered: u64,
}

impl FrameRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            frames: [
                FrameBuffer::new(width, height),
                FrameBuffer::new(width, height),
            ],
            frames_rendered: 0,
        }
    }

    /// Sized to match a session's grids.
    pub fn for_session(session: &HeatSession) -> Self {
        let grid = session.grid(Stick::Left);
        Self::new(grid.width(), grid.height())
    }

    /// Render both channels with this tick's tuning.
    pub fn render(&mut self, session: &HeatSession, tuning: &TuningParams) {
        for (frame, channel) in self.frames.iter_mut().zip(session.channels()) {
            render_channel(frame, channel, tuning);
        }
        self.frames_rendered += 1;
    }

    pub fn frame(&self, stick: Stick) -> &FrameBuffer {
        match stick {
            Stick::Left => &self.frames[0],
            Stick::Right => &self.frames[1],
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}
