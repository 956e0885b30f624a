//! Raster snapshots: one `cell_size` square pixel block per cell.
//!
//! Live cells are painted [`ALIVE_COLOR`], dead cells [`DEAD_COLOR`]. Decoding
//! samples the top-left pixel of each block and treats only an exact match
//! with [`ALIVE_COLOR`] as alive.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use crate::error::PersistError;
use crate::sim::GridState;

/// Pixel color of a live cell.
pub const ALIVE_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Pixel color of a dead cell.
pub const DEAD_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Largest RGB buffer, in bytes, an encoded image may occupy.
pub const MAX_IMAGE_BYTES: u64 = 1 << 30;

/// Render the grid as an RGB image `width * cell_size` by `height * cell_size`.
///
/// # Errors
///
/// Returns [`PersistError::ZeroCellSize`] for a zero cell size and
/// [`PersistError::ImageTooLarge`] if the pixel dimensions overflow `u32` or
/// the pixel buffer would exceed [`MAX_IMAGE_BYTES`].
pub fn encode_image(grid: &GridState, cell_size: u32) -> Result<RgbImage, PersistError> {
    if cell_size == 0 {
        return Err(PersistError::ZeroCellSize);
    }
    let too_large = || PersistError::ImageTooLarge {
        width: grid.width(),
        height: grid.height(),
        cell_size,
    };
    let px_width = u32::try_from(grid.width())
        .ok()
        .and_then(|w| w.checked_mul(cell_size))
        .ok_or_else(too_large)?;
    let px_height = u32::try_from(grid.height())
        .ok()
        .and_then(|h| h.checked_mul(cell_size))
        .ok_or_else(too_large)?;
    let bytes = u64::from(px_width)
        .checked_mul(u64::from(px_height))
        .and_then(|n| n.checked_mul(3))
        .filter(|&n| n <= MAX_IMAGE_BYTES && usize::try_from(n).is_ok());
    if bytes.is_none() {
        return Err(too_large());
    }

    let cells = grid.cells();
    let height = grid.height();
    Ok(RgbImage::from_fn(px_width, px_height, |px, py| {
        let x = (px / cell_size) as usize;
        let y = (py / cell_size) as usize;
        if cells[x * height + y] {
            ALIVE_COLOR
        } else {
            DEAD_COLOR
        }
    }))
}

/// Rebuild a grid from an image by sampling each block's top-left pixel.
///
/// Grid dimensions are the image dimensions divided by `cell_size`; a partial
/// block at the right or bottom edge is ignored. Ages start at 0.
///
/// # Errors
///
/// Returns [`PersistError::ZeroCellSize`] for a zero cell size and
/// [`PersistError::ImageTooSmall`] if the image holds no complete block.
pub fn decode_image(image: &RgbImage, cell_size: u32) -> Result<GridState, PersistError> {
    if cell_size == 0 {
        return Err(PersistError::ZeroCellSize);
    }
    let grid_width = image.width() / cell_size;
    let grid_height = image.height() / cell_size;
    if grid_width == 0 || grid_height == 0 {
        return Err(PersistError::ImageTooSmall {
            width: image.width(),
            height: image.height(),
            cell_size,
        });
    }

    let cells = (0..grid_width)
        .flat_map(|x| (0..grid_height).map(move |y| (x, y)))
        .map(|(x, y)| *image.get_pixel(x * cell_size, y * cell_size) == ALIVE_COLOR)
        .collect();

    GridState::from_cells(grid_width as usize, grid_height as usize, cells)
        .map_err(|e| PersistError::Malformed(e.to_string()))
}

/// Encode the grid as PNG bytes.
///
/// # Errors
///
/// Returns an error if the image cannot be built or encoded.
pub fn encode_png(grid: &GridState, cell_size: u32) -> Result<Vec<u8>, PersistError> {
    let image = encode_image(grid, cell_size)?;
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Decode a grid from encoded image bytes (format detected from content).
///
/// # Errors
///
/// Returns an error if the bytes are not a decodable image or too small.
pub fn decode_png(bytes: &[u8], cell_size: u32) -> Result<GridState, PersistError> {
    let image = image::load_from_memory(bytes)?.to_rgb8();
    decode_image(&image, cell_size)
}

/// Write a raster snapshot to `path` as PNG.
///
/// # Errors
///
/// Returns an error if encoding or file I/O fails.
pub fn save_image(grid: &GridState, path: &Path, cell_size: u32) -> Result<(), PersistError> {
    let bytes = encode_png(grid, cell_size)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Read a raster snapshot from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn load_image(path: &Path, cell_size: u32) -> Result<GridState, PersistError> {
    let bytes = fs::read(path)?;
    decode_png(&bytes, cell_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Coord;
    use tempfile::tempdir;

    fn sample_grid() -> GridState {
        let mut grid = GridState::new(4, 3).unwrap();
        grid.set(Coord::new(0, 0), true);
        grid.set(Coord::new(3, 2), true);
        grid.set(Coord::new(1, 1), true);
        grid
    }

    #[test]
    fn test_encode_dimensions_and_colors() {
        let image = encode_image(&sample_grid(), 5).unwrap();
        assert_eq!(image.dimensions(), (20, 15));
        assert_eq!(*image.get_pixel(0, 0), ALIVE_COLOR);
        assert_eq!(*image.get_pixel(4, 4), ALIVE_COLOR);
        assert_eq!(*image.get_pixel(5, 0), DEAD_COLOR);
        assert_eq!(*image.get_pixel(19, 14), ALIVE_COLOR);
    }

    #[test]
    fn test_image_roundtrip() {
        let grid = sample_grid();
        for cell_size in [1, 3, 10] {
            let image = encode_image(&grid, cell_size).unwrap();
            let decoded = decode_image(&image, cell_size).unwrap();
            assert!(decoded.same_cells(&grid), "cell_size {cell_size}");
        }
    }

    #[test]
    fn test_decode_samples_top_left_only() {
        let mut image = encode_image(&GridState::new(2, 2).unwrap(), 4).unwrap();
        // Alive pixel off the sampling point: still dead.
        image.put_pixel(5, 1, ALIVE_COLOR);
        // Near-white at the sampling point: exact match required.
        image.put_pixel(0, 4, Rgb([254, 255, 255]));
        image.put_pixel(4, 4, ALIVE_COLOR);

        let grid = decode_image(&image, 4).unwrap();
        assert!(!grid.is_alive(Coord::new(1, 0)));
        assert!(!grid.is_alive(Coord::new(0, 1)));
        assert!(grid.is_alive(Coord::new(1, 1)));
    }

    #[test]
    fn test_decode_ignores_partial_blocks() {
        let image = RgbImage::from_pixel(25, 12, ALIVE_COLOR);
        let grid = decode_image(&image, 10).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 1));
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn test_decode_too_small() {
        let image = RgbImage::from_pixel(9, 30, DEAD_COLOR);
        assert!(matches!(
            decode_image(&image, 10),
            Err(PersistError::ImageTooSmall { .. })
        ));
    }

    #[test]
    fn test_zero_cell_size() {
        assert!(matches!(
            encode_image(&sample_grid(), 0),
            Err(PersistError::ZeroCellSize)
        ));
    }

    #[test]
    fn test_oversized_image_rejected() {
        let grid = GridState::new(1, 1).unwrap();
        for cell_size in [u32::MAX, 100_000] {
            assert!(matches!(
                encode_image(&grid, cell_size),
                Err(PersistError::ImageTooLarge { .. })
            ));
        }
        assert!(matches!(
            encode_png(&GridState::new(70_000, 1).unwrap(), 70_000),
            Err(PersistError::ImageTooLarge { .. })
        ));
    }

    #[test]
    fn test_png_file_roundtrip() {
        let grid = sample_grid();
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.png");
        save_image(&grid, &path, 10).unwrap();
        let loaded = load_image(&path, 10).unwrap();
        assert!(loaded.same_cells(&grid));
    }

    #[test]
    fn test_garbage_bytes() {
        assert!(matches!(
            decode_png(b"not an image", 1),
            Err(PersistError::Image { .. })
        ));
    }
}
