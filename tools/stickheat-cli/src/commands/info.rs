//! Show statistics for a saved heatmap file.

use std::path::PathBuf;

use stickheat_core::grid::{GRID_HEIGHT, GRID_WIDTH};
use stickheat_core::persist::{expected_len, load_grids};
use stickheat_core::sample::Stick;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let (left, right) = load_grids(&path, GRID_WIDTH, GRID_HEIGHT)
        .map_err(|e| anyhow::anyhow!("Failed to load heatmaps: {e}"))?;

    println!("Heatmaps: {}", path.display());
    println!("  Grid: {GRID_WIDTH}x{GRID_HEIGHT}");
    println!("  Bytes: {}", expected_len(GRID_WIDTH, GRID_HEIGHT));
    println!();

    for (stick, grid) in [(Stick::Left, &left), (Stick::Right, &right)] {
        let stats = grid.stats();
        let coverage = stats.nonzero as f64 / grid.len() as f64 * 100.0;
        println!("{}:", stick.label());
        println!("  Max density: {:.4}", stats.max);
        println!("  Total exposure: {:.2}", stats.total);
        println!("  Non-zero cells: {} ({coverage:.2}%)", stats.nonzero);
    }

    Ok(())
}
