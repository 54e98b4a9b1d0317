//! Raw exposure accumulation grid.

/// Default grid width, one column per horizontal axis unit.
pub const GRID_WIDTH: usize = 1000;

/// Default grid height, one row per vertical axis unit.
pub const GRID_HEIGHT: usize = 1000;

/// A fixed-size, row-major field of non-negative density values.
///
/// Cells start at zero and only grow, through [`DensityGrid::add`]
/// (used by the stamping kernel), until a bulk [`DensityGrid::reset`].
/// There is no upper bound: tone mapping compresses the range at
/// display time.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    width: usize,
    height: usize,
    cells: Vec<f32>,
}

/// Summary statistics over a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStats {
    pub max: f32,
    pub total: f64,
    pub nonzero: usize,
}

impl DensityGrid {
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![0.0; width * height],
        }
    }

    /// Build a grid from row-major cells. Returns `None` on a size mismatch.
    pub fn from_cells(width: usize, height: usize, cells: Vec<f32>) -> Option<Self> {
        if width == 0 || height == 0 || cells.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major index for in-bounds signed coordinates.
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Add heat to one cell. Out-of-bounds coordinates and non-positive
    /// amounts are ignored.
    pub fn add(&mut self, x: i32, y: i32, amount: f32) {
        if amount.is_nan() || amount <= 0.0 {
            return;
        }
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] += amount;
        }
    }

    /// Zero every cell.
    pub fn reset(&mut self) {
        self.cells.fill(0.0);
    }

    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, f32> {
        self.cells.chunks(self.width)
    }

    pub fn stats(&self) -> GridStats {
        let mut stats = GridStats {
            max: 0.0,
            total: 0.0,
            nonzero: 0,
        };
        for &value in &self.cells {
            stats.max = stats.max.max(value);
            stats.total += value as f64;
            if value > 0.0 {
                stats.nonzero += 1;
            }
        }
        stats
    }
}

impl Default for DensityGrid {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}
