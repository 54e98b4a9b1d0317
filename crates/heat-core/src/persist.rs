//! Flat binary heatmap dump.
//!
//! Layout (no header, no version):
//!   [0 .. W*H*4)        Left grid, row-major, `f32` little-endian
//!   [W*H*4 .. 2*W*H*4)  Right grid, same order
//!
//! Loads read the whole payload into a staging buffer and validate it
//! before any grid is replaced.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use stickheat_common::error::{StickheatError, StickheatResult};

use crate::grid::DensityGrid;
use crate::sample::Stick;
use crate::session::HeatSession;

pub const BYTES_PER_CELL: usize = 4;

/// Exact payload size for two grids of the given dimensions.
pub fn expected_len(width: usize, height: usize) -> usize {
    2 * width * height * BYTES_PER_CELL
}

/// Write both grids in the flat layout.
pub fn write_grids<W: Write>(
    writer: &mut W,
    left: &DensityGrid,
    right: &DensityGrid,
) -> std::io::Result<()> {
    for grid in [left, right] {
        for row in grid.rows() {
            let mut bytes = Vec::with_capacity(row.len() * BYTES_PER_CELL);
            for value in row {
                bytes.extend_from_slice(&value.to_le_bytes());
            }
            writer.write_all(&bytes)?;
        }
    }
    Ok(())
}

/// Decode a complete payload into `(left, right)`.
pub fn decode_grids(
    bytes: &[u8],
    width: usize,
    height: usize,
) -> StickheatResult<(DensityGrid, DensityGrid)> {
    let expected = expected_len(width, height);
    if bytes.len() != expected {
        return Err(StickheatError::PersistenceFormat {
            expected,
            actual: bytes.len(),
        });
    }

    let mut cells = Vec::with_capacity(width * height * 2);
    for (index, chunk) in bytes.chunks_exact(BYTES_PER_CELL).enumerate() {
        let value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        if value.is_nan() || value < 0.0 {
            return Err(StickheatError::PersistenceValue { index, value });
        }
        cells.push(value);
    }

    let right_cells = cells.split_off(width * height);
    let left = DensityGrid::from_cells(width, height, cells);
    let right = DensityGrid::from_cells(width, height, right_cells);
    match (left, right) {
        (Some(left), Some(right)) => Ok((left, right)),
        _ => Err(StickheatError::PersistenceFormat {
            expected,
            actual: bytes.len(),
        }),
    }
}

/// Read a payload from a stream and decode it.
///
/// Reads at most one byte past the expected length so oversized input
/// is detected without buffering it whole.
pub fn read_grids<R: Read>(
    reader: &mut R,
    width: usize,
    height: usize,
) -> StickheatResult<(DensityGrid, DensityGrid)> {
    let staging = read_staging(reader, expected_len(width, height))?;
    decode_grids(&staging, width, height)
}

fn read_staging<R: Read>(reader: &mut R, expected: usize) -> std::io::Result<Vec<u8>> {
    let mut staging = Vec::with_capacity(expected);
    reader.take(expected as u64 + 1).read_to_end(&mut staging)?;
    Ok(staging)
}

/// Save a session's grids to `path`.
pub fn save_session(session: &HeatSession, path: &Path) -> StickheatResult<()> {
    save_grids(path, session.grid(Stick::Left), session.grid(Stick::Right))
}

/// Save two grids to `path`, creating parent directories.
pub fn save_grids(path: &Path, left: &DensityGrid, right: &DensityGrid) -> StickheatResult<()> {
    let io_err = |e| StickheatError::persistence_io(path, e);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_grids(&mut writer, left, right).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), bytes = expected_len(left.width(), left.height()), "Heatmaps saved");
    Ok(())
}

/// Load grids of the given size from `path`.
pub fn load_grids(
    path: &Path,
    width: usize,
    height: usize,
) -> StickheatResult<(DensityGrid, DensityGrid)> {
    let io_err = |e| StickheatError::persistence_io(path, e);
    let mut file = File::open(path).map_err(io_err)?;
    let staging = read_staging(&mut file, expected_len(width, height)).map_err(io_err)?;
    decode_grids(&staging, width, height)
}

/// Load `path` into a session, replacing both grids only on success.
pub fn load_into_session(session: &mut HeatSession, path: &Path) -> StickheatResult<()> {
    let template = session.grid(Stick::Left);
    let (left, right) = load_grids(path, template.width(), template.height())?;
    session.replace_grids(left, right);
    tracing::info!(path = %path.display(), "Heatmaps loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn layout_is_left_then_right_row_major() {
        let mut left = DensityGrid::new(2, 2);
        let mut right = DensityGrid::new(2, 2);
        left.add(1, 0, 1.0);
        right.add(0, 1, 2.0);

        let mut bytes = Vec::new();
        write_grids(&mut bytes, &left, &right).unwrap();

        assert_eq!(bytes.len(), expected_len(2, 2));
        let floats: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(floats, vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn truncated_payload_is_format_error() {
        let bytes = vec![0u8; expected_len(2, 2) - 1];
        let err = decode_grids(&bytes, 2, 2).unwrap_err();
        assert!(matches!(
            err,
            StickheatError::PersistenceFormat {
                expected: 32,
                actual: 31
            }
        ));
    }

    #[test]
    fn oversized_stream_is_format_error() {
        let bytes = vec![0u8; 100];
        let result = read_grids(&mut bytes.as_slice(), 2, 2);
        assert!(matches!(
            result,
            Err(StickheatError::PersistenceFormat {
                expected: 32,
                actual: 33
            })
        ));
    }

    #[test]
    fn negative_cell_is_rejected() {
        let mut bytes = vec![0u8; expected_len(1, 1)];
        bytes[4..8].copy_from_slice(&(-1.0f32).to_le_bytes());
        let err = decode_grids(&bytes, 1, 1).unwrap_err();
        assert!(matches!(err, StickheatError::PersistenceValue { index: 1, .. }));
    }

    #[test]
    fn failed_load_leaves_session_untouched() {
        let dir = temp_dir("stickheat_test_failed_load");
        let path = dir.join("short.bin");
        std::fs::write(&path, [0u8; 10]).unwrap();

        let mut session = HeatSession::with_size(Default::default(), 4, 4);
        let mut left = DensityGrid::new(4, 4);
        left.add(2, 2, 3.0);
        session.replace_grids(left.clone(), DensityGrid::new(4, 4));

        let err = load_into_session(&mut session, &path).unwrap_err();
        assert!(matches!(err, StickheatError::PersistenceFormat { .. }));
        assert_eq!(session.grid(Stick::Left), &left);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = temp_dir("stickheat_test_missing");
        let err = load_grids(&dir.join("absent.bin"), 2, 2).unwrap_err();
        assert!(matches!(err, StickheatError::PersistenceIo { .. }));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn write_into_directory_path_is_io_error() {
        let dir = temp_dir("stickheat_test_write_dir");
        let grid = DensityGrid::new(2, 2);
        let err = save_grids(&dir, &grid, &grid).unwrap_err();
        assert!(matches!(err, StickheatError::PersistenceIo { .. }));
        std::fs::remove_dir_all(&dir).ok();
    }
}
