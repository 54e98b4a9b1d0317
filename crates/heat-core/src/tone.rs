//! Tone mapping of raw density into display intensity.
//!
//! Raw cells are unbounded exposure. Each mode reinterprets the same
//! data without touching it:
//!
//! - **Linear:** `raw × saturation`
//! - **Logarithmic:** `log10(1 + raw × saturation) / log10(1 + saturation)`
//! - **Histogram equalized:** per-frame CDF over 256 bins of `raw`, in `[0, 1]`
//!
//! Linear and logarithmic output is not clamped above 1; the color
//! mapper saturates it.

use serde::{Deserialize, Serialize};

use crate::grid::DensityGrid;

/// Number of histogram bins.
pub const HISTOGRAM_BINS: usize = 256;

/// Selectable tone-mapping strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneMode {
    #[default]
    Linear,
    Logarithmic,
    HistogramEqualized,
}

impl ToneMode {
    /// Next mode in the toggle cycle.
    pub fn next(self) -> Self {
        match self {
            ToneMode::Linear => ToneMode::Logarithmic,
            ToneMode::Logarithmic => ToneMode::HistogramEqualized,
            ToneMode::HistogramEqualized => ToneMode::Linear,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToneMode::Linear => "linear",
            ToneMode::Logarithmic => "log",
            ToneMode::HistogramEqualized => "histeq",
        }
    }
}

impl std::fmt::Display for ToneMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ToneMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(ToneMode::Linear),
            "log" | "logarithmic" => Ok(ToneMode::Logarithmic),
            "histeq" | "histogram" | "histogram_equalized" => Ok(ToneMode::HistogramEqualized),
            other => Err(format!(
                "unknown tone mode '{other}' (expected linear, log or histeq)"
            )),
        }
    }
}

/// Histogram bin for a raw value: `clamp(floor(raw × 255), 0, 255)`.
pub fn histogram_bin(raw: f32) -> usize {
    let scaled = (raw * 255.0).floor();
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else if scaled >= 255.0 {
        HISTOGRAM_BINS - 1
    } else {
        scaled as usize
    }
}

/// Equalization lookup table: normalized CDF per bin.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramLut {
    table: [f32; HISTOGRAM_BINS],
}

impl HistogramLut {
    /// Build the table from all cells of a grid.
    ///
    /// A grid with nothing above the lowest bin (in particular an
    /// all-zero grid) yields an all-zero table.
    pub fn from_grid(grid: &DensityGrid) -> Self {
        let mut counts = [0u64; HISTOGRAM_BINS];
        for &raw in grid.cells() {
            counts[histogram_bin(raw)] += 1;
        }
        Self::from_counts(&counts)
    }

    pub fn from_counts(counts: &[u64; HISTOGRAM_BINS]) -> Self {
        let total: u64 = counts.iter().sum();
        let mut table = [0.0f32; HISTOGRAM_BINS];
        if total == counts[0] {
            return Self { table };
        }

        let mut cumulative = 0u64;
        for (slot, &count) in table.iter_mut().zip(counts.iter()) {
            cumulative += count;
            *slot = (cumulative as f64 / total as f64) as f32;
        }
        Self { table }
    }

    pub fn lookup(&self, raw: f32) -> f32 {
        self.table[histogram_bin(raw)]
    }

    pub fn table(&self) -> &[f32; HISTOGRAM_BINS] {
        &self.table
    }
}

/// A tone curve prepared for one frame of one grid.
///
/// Per-frame constants (the log normalizer, the histogram table) are
/// computed once here rather than per cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ToneCurve {
    Linear { saturation: f32 },
    Logarithmic { saturation: f32, inv_norm: f32 },
    HistogramEqualized { lut: Box<HistogramLut> },
}

impl ToneCurve {
    pub fn prepare(mode: ToneMode, saturation: f32, grid: &DensityGrid) -> Self {
        match mode {
            ToneMode::Linear => ToneCurve::Linear { saturation },
            ToneMode::Logarithmic => {
                let norm = (1.0 + saturation).log10();
                let inv_norm = if norm > 0.0 { 1.0 / norm } else { 0.0 };
                ToneCurve::Logarithmic {
                    saturation,
                    inv_norm,
                }
            }
            ToneMode::HistogramEqualized => ToneCurve::HistogramEqualized {
                lut: Box::new(HistogramLut::from_grid(grid)),
            },
        }
    }

    pub fn mode(&self) -> ToneMode {
        match self {
            ToneCurve::Linear { .. } => ToneMode::Linear,
            ToneCurve::Logarithmic { .. } => ToneMode::Logarithmic,
            ToneCurve::HistogramEqualized { .. } => ToneMode::HistogramEqualized,
        }
    }

    /// Intensity for one raw cell value.
    #[inline]
    pub fn apply(&self, raw: f32) -> f32 {
        match self {
            ToneCurve::Linear { saturation } => raw * saturation,
            ToneCurve::Logarithmic {
                saturation,
                inv_norm,
            } => (1.0 + raw * saturation).log10() * inv_norm,
            ToneCurve::HistogramEqualized { lut } => lut.lookup(raw),
        }
    }
}

/// Tone-map a whole grid into row-major intensities.
pub fn tone_map(grid: &DensityGrid, mode: ToneMode, saturation: f32) -> Vec<f32> {
    let curve = ToneCurve::prepare(mode, saturation, grid);
    grid.cells().iter().map(|&raw| curve.apply(raw)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(values: &[(i32, i32, f32)]) -> DensityGrid {
        let mut grid = DensityGrid::new(4, 4);
        for &(x, y, v) in values {
            grid.add(x, y, v);
        }
        grid
    }

    #[test]
    fn mode_cycles_through_all_three() {
        let mut mode = ToneMode::default();
        assert_eq!(mode, ToneMode::Linear);
        mode = mode.next();
        assert_eq!(mode, ToneMode::Logarithmic);
        mode = mode.next();
        assert_eq!(mode, ToneMode::HistogramEqualized);
        assert_eq!(mode.next(), ToneMode::Linear);
    }

    #[test]
    fn mode_parses_from_labels() {
        for mode in [
            ToneMode::Linear,
            ToneMode::Logarithmic,
            ToneMode::HistogramEqualized,
        ] {
            assert_eq!(mode.label().parse::<ToneMode>(), Ok(mode));
        }
        assert_eq!("HistEq".parse::<ToneMode>(), Ok(ToneMode::HistogramEqualized));
        assert!("gamma".parse::<ToneMode>().is_err());
    }

    #[test]
    fn linear_is_absolute_scale() {
        let grid = grid_with(&[(0, 0, 0.4), (1, 0, 3.0)]);
        let out = tone_map(&grid, ToneMode::Linear, 2.0);
        assert_eq!(out[0], 0.8);
        // No clamp above one
        assert_eq!(out[1], 6.0);
        assert_eq!(out[2], 0.0);
    }

    #[test]
    fn log_reaches_one_at_unit_raw() {
        let grid = grid_with(&[(0, 0, 1.0), (1, 0, 0.1), (2, 0, 50.0)]);
        for saturation in [0.05f32, 1.0, 5.0] {
            let out = tone_map(&grid, ToneMode::Logarithmic, saturation);
            assert!((out[0] - 1.0).abs() < 1e-5, "saturation {saturation}");
            assert!(out[1] > 0.0 && out[1] < 1.0);
            assert!(out[2] > 1.0);
            assert_eq!(out[3], 0.0);
        }
    }

    #[test]
    fn log_keeps_low_densities_brighter_than_linear() {
        let grid = grid_with(&[(0, 0, 0.05)]);
        let log = tone_map(&grid, ToneMode::Logarithmic, 1.0)[0];
        let linear = tone_map(&grid, ToneMode::Linear, 1.0)[0];
        assert!(log > linear);
    }

    #[test]
    fn histogram_bins_clamp() {
        assert_eq!(histogram_bin(0.0), 0);
        assert_eq!(histogram_bin(-1.0), 0);
        assert_eq!(histogram_bin(f32::NAN), 0);
        assert_eq!(histogram_bin(0.5), 127);
        assert_eq!(histogram_bin(1.0), 255);
        assert_eq!(histogram_bin(40.0), 255);
    }

    #[test]
    fn histogram_maps_to_cdf() {
        // 14 zeros, one cell in bin 127, one in bin 255
        let grid = grid_with(&[(0, 0, 0.5), (1, 1, 9.0)]);
        let out = tone_map(&grid, ToneMode::HistogramEqualized, 3.0);
        let zero = 14.0 / 16.0;
        assert!((out[2] - zero).abs() < 1e-6);
        assert!((out[0] - 15.0 / 16.0).abs() < 1e-6);
        assert_eq!(out[5], 1.0);
        assert!(out.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn histogram_ignores_saturation() {
        let grid = grid_with(&[(0, 0, 0.3), (3, 3, 0.7)]);
        assert_eq!(
            tone_map(&grid, ToneMode::HistogramEqualized, 0.05),
            tone_map(&grid, ToneMode::HistogramEqualized, 5.0)
        );
    }

    #[test]
    fn all_zero_grid_gives_zero_lut() {
        let grid = DensityGrid::new(16, 16);
        let lut = HistogramLut::from_grid(&grid);
        assert!(lut.table().iter().all(|&v| v == 0.0));

        let out = tone_map(&grid, ToneMode::HistogramEqualized, 1.0);
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn values_inside_lowest_bin_give_zero_lut() {
        let grid = grid_with(&[(0, 0, 0.001), (2, 1, 0.003)]);
        let lut = HistogramLut::from_grid(&grid);
        assert!(lut.table().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn empty_counts_give_zero_lut() {
        let lut = HistogramLut::from_counts(&[0; HISTOGRAM_BINS]);
        assert!(lut.table().iter().all(|&v| v == 0.0));
        assert_eq!(lut.lookup(0.7), 0.0);
    }

    #[test]
    fn curve_reports_its_mode() {
        let grid = DensityGrid::new(2, 2);
        for mode in [
            ToneMode::Linear,
            ToneMode::Logarithmic,
            ToneMode::HistogramEqualized,
        ] {
            assert_eq!(ToneCurve::prepare(mode, 1.0, &grid).mode(), mode);
        }
    }
}
