//! Render a saved heatmap file to PNG images.

use std::path::PathBuf;

use stickheat_core::grid::{GRID_HEIGHT, GRID_WIDTH};
use stickheat_core::persist::load_grids;
use stickheat_core::tone::ToneMode;
use stickheat_core::tuning::TuningParams;
use stickheat_render::export::export_grid_pair;

pub fn run(
    path: PathBuf,
    out_dir: PathBuf,
    mode: ToneMode,
    saturation: f32,
    prefix: String,
) -> anyhow::Result<()> {
    let (left, right) = load_grids(&path, GRID_WIDTH, GRID_HEIGHT)
        .map_err(|e| anyhow::anyhow!("Failed to load heatmaps: {e}"))?;

    let defaults = TuningParams::default();
    let tuning = TuningParams::new(
        defaults.kernel_scale(),
        defaults.kernel_radius(),
        saturation,
        mode,
    );

    println!("Rendering {}", path.display());
    println!("  Mode: {}", tuning.tone_mode());
    println!("  Saturation: {:.2}", tuning.saturation());

    let written = export_grid_pair(&left, &right, &tuning, &out_dir, &prefix)?;
    for image in &written {
        println!("  Wrote: {}", image.display());
    }

    Ok(())
}
