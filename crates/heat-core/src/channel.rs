//! One stick's accumulation channel.

use crate::grid::DensityGrid;
use crate::kernel::StampKernel;
use crate::sample::{Stick, StickPosition};

/// Marker drawn over the left stick's heatmap (opaque white, BGRA-packed).
pub const LEFT_MARKER_COLOR: u32 = 0xFFFF_FFFF;

/// Marker drawn over the right stick's heatmap (opaque green, BGRA-packed).
pub const RIGHT_MARKER_COLOR: u32 = 0xFF00_FF00;

/// Grid, live position, and marker color for one stick.
#[derive(Debug, Clone, PartialEq)]
pub struct StickChannel {
    stick: Stick,
    grid: DensityGrid,
    last_position: StickPosition,
    marker_color: u32,
}

impl StickChannel {
    pub fn new(stick: Stick, grid: DensityGrid) -> Self {
        let marker_color = match stick {
            Stick::Left => LEFT_MARKER_COLOR,
            Stick::Right => RIGHT_MARKER_COLOR,
        };
        Self {
            stick,
            grid,
            last_position: StickPosition::NEUTRAL,
            marker_color,
        }
    }

    pub fn stick(&self) -> Stick {
        self.stick
    }

    pub fn grid(&self) -> &DensityGrid {
        &self.grid
    }

    pub fn last_position(&self) -> StickPosition {
        self.last_position
    }

    pub fn marker_color(&self) -> u32 {
        self.marker_color
    }

    pub fn set_position(&mut self, position: StickPosition) {
        self.last_position = position;
    }

    /// Stamp the kernel at the current position.
    pub fn stamp(&mut self, kernel: &StampKernel) {
        kernel.stamp(&mut self.grid, self.last_position.x, self.last_position.y);
    }

    pub fn reset(&mut self) {
        self.grid.reset();
    }

    /// Swap in a new grid, returning the old one.
    pub fn replace_grid(&mut self, grid: DensityGrid) -> DensityGrid {
        std::mem::replace(&mut self.grid, grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_stamps_at_last_position() {
        let mut channel = StickChannel::new(Stick::Right, DensityGrid::new(20, 20));
        channel.set_position(StickPosition::new(3, 4));
        channel.stamp(&StampKernel::new(1, 0.5));

        assert_eq!(channel.grid().cell(3, 4), Some(0.5));
        assert_eq!(channel.marker_color(), RIGHT_MARKER_COLOR);
    }

    #[test]
    fn replace_grid_returns_previous() {
        let mut channel = StickChannel::new(Stick::Left, DensityGrid::new(2, 2));
        let mut loaded = DensityGrid::new(2, 2);
        loaded.add(1, 1, 7.0);

        let old = channel.replace_grid(loaded);
        assert_eq!(old.stats().nonzero, 0);
        assert_eq!(channel.grid().cell(1, 1), Some(7.0));
        assert_eq!(channel.marker_color(), LEFT_MARKER_COLOR);
    }
}
