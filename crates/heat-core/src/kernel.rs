//! Radial falloff stamping kernel.

use crate::grid::DensityGrid;

/// Linear radial falloff: `max(0, 1 - d / radius)`.
///
/// A zero radius degenerates to a single full-strength center cell.
pub fn falloff(kx: i32, ky: i32, radius: i32) -> f32 {
    if radius <= 0 {
        return if kx == 0 && ky == 0 { 1.0 } else { 0.0 };
    }
    let distance = ((kx * kx + ky * ky) as f32).sqrt();
    (1.0 - distance / radius as f32).max(0.0)
}

/// Precomputed `(2r+1)²` contribution table for one radius and scale.
#[derive(Debug, Clone, PartialEq)]
pub struct StampKernel {
    radius: i32,
    scale: f32,
    weights: Vec<f32>,
}

impl StampKernel {
    pub fn new(radius: i32, scale: f32) -> Self {
        let radius = radius.max(0);
        let side = (2 * radius + 1) as usize;
        let mut weights = Vec::with_capacity(side * side);
        for ky in -radius..=radius {
            for kx in -radius..=radius {
                weights.push(falloff(kx, ky, radius) * scale);
            }
        }
        Self {
            radius,
            scale,
            weights,
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Contribution at offset `(kx, ky)` from the stamp center.
    pub fn contribution(&self, kx: i32, ky: i32) -> f32 {
        if kx.abs() > self.radius || ky.abs() > self.radius {
            return 0.0;
        }
        let side = 2 * self.radius + 1;
        let idx = (ky + self.radius) * side + (kx + self.radius);
        self.weights[idx as usize]
    }

    /// Whether this kernel was built for the given parameters.
    pub fn matches(&self, radius: i32, scale: f32) -> bool {
        self.radius == radius.max(0) && self.scale.to_bits() == scale.to_bits()
    }

    /// Add the kernel centered at `(cx, cy)`. Cells falling outside the
    /// grid are dropped, not clamped or wrapped.
    pub fn stamp(&self, grid: &mut DensityGrid, cx: i32, cy: i32) {
        let r = self.radius;
        let mut weights = self.weights.iter();
        for ky in -r..=r {
            for kx in -r..=r {
                let Some(&heat) = weights.next() else {
                    return;
                };
                grid.add(cx + kx, cy + ky, heat);
            }
        }
    }
}
