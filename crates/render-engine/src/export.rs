//! Still-image export of rendered frames and saved heatmaps.

use std::path::{Path, PathBuf};

use stickheat_common::error::{StickheatError, StickheatResult};
use stickheat_core::grid::DensityGrid;
use stickheat_core::sample::Stick;
use stickheat_core::tuning::TuningParams;

use crate::frame::{render_heat, FrameBuffer};

/// Encode a frame as PNG at `path`, creating parent directories.
pub fn write_png(frame: &FrameBuffer, path: &Path) -> StickheatResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let image = image::RgbaImage::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        frame.to_rgba_bytes(),
    )
    .ok_or_else(|| StickheatError::render("Frame buffer size does not match its dimensions"))?;

    image.save(path).map_err(|e| {
        StickheatError::render(format!("Failed to write {}: {e}", path.display()))
    })?;
    Ok(())
}

/// Render a saved grid pair (no live markers) to `<dir>/<prefix>left.png`
/// and `<dir>/<prefix>right.png`.
pub fn export_grid_pair(
    left: &DensityGrid,
    right: &DensityGrid,
    tuning: &TuningParams,
    out_dir: &Path,
    prefix: &str,
) -> StickheatResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(2);
    for (stick, grid) in [(Stick::Left, left), (Stick::Right, right)] {
        let mut frame = FrameBuffer::new(grid.width(), grid.height());
        render_heat(&mut frame, grid, tuning);

        let path = out_dir.join(format!("{prefix}{}.png", stick.label()));
        write_png(&frame, &path)?;
        tracing::debug!(stick = stick.label(), path = %path.display(), "Exported heatmap image");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickheat_core::tone::ToneMode;

    #[test]
    fn exported_pngs_decode_to_the_rendered_colors() {
        let dir = std::env::temp_dir().join("stickheat_test_export");
        let _ = std::fs::remove_dir_all(&dir);

        let mut left = DensityGrid::new(8, 6);
        left.add(2, 3, 1.0);
        let right = DensityGrid::new(8, 6);
        let tuning = TuningParams::default().with_tone_mode(ToneMode::Linear);

        let paths = export_grid_pair(&left, &right, &tuning, &dir, "snap-").unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("snap-left.png"));

        let decoded = image::open(&paths[0]).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (8, 6));
        assert_eq!(decoded.get_pixel(2, 3).0, [255, 255, 0, 255]);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 255, 255]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
