//! Snapshot persistence.
//!
//! Two independent codecs, both exact round-trips of the cell states:
//! - **Structured**: JSON array of columns of 0/1 (see [`encode_json`]).
//! - **Raster**: PNG with one `cell_size` block per cell (see [`encode_image`]).
//!
//! Neither codec stores ages. A missing file is not an error for
//! [`load_or_seed`], which falls back to a freshly seeded random grid.

mod raster;
mod snapshot;

pub use raster::{
    decode_image, decode_png, encode_image, encode_png, load_image, save_image, ALIVE_COLOR,
    DEAD_COLOR, MAX_IMAGE_BYTES,
};
pub use snapshot::{decode_json, encode_json, load_json, save_json};

use std::io;
use std::path::Path;

use rand::Rng;

use crate::error::{Error, PersistError};
use crate::sim::GridState;

/// On-disk snapshot format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// JSON array of arrays of 0/1.
    Json,
    /// PNG image.
    Image,
}

impl SnapshotFormat {
    /// Pick a format from the file extension: `.png` is an image, anything
    /// else is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => Self::Image,
            _ => Self::Json,
        }
    }
}

/// Save `grid` to `path` in the format implied by its extension.
///
/// # Errors
///
/// Returns an error if encoding or file I/O fails.
pub fn save_snapshot(grid: &GridState, path: &Path, cell_size: u32) -> Result<(), PersistError> {
    let format = SnapshotFormat::from_path(path);
    match format {
        SnapshotFormat::Json => save_json(grid, path)?,
        SnapshotFormat::Image => save_image(grid, path, cell_size)?,
    }
    tracing::debug!(
        path = %path.display(),
        ?format,
        width = grid.width(),
        height = grid.height(),
        "snapshot saved"
    );
    Ok(())
}

/// Load a grid from `path` in the format implied by its extension.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or malformed.
pub fn load_snapshot(path: &Path, cell_size: u32) -> Result<GridState, PersistError> {
    let format = SnapshotFormat::from_path(path);
    let grid = match format {
        SnapshotFormat::Json => load_json(path)?,
        SnapshotFormat::Image => load_image(path, cell_size)?,
    };
    tracing::debug!(
        path = %path.display(),
        ?format,
        width = grid.width(),
        height = grid.height(),
        "snapshot loaded"
    );
    Ok(grid)
}

/// How [`load_or_seed`] produced its grid.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The snapshot file was read.
    Loaded(GridState),
    /// The snapshot file did not exist; a random grid was seeded instead.
    Seeded(GridState),
}

impl LoadOutcome {
    /// Whether the fallback seeding path was taken.
    #[must_use]
    pub const fn was_seeded(&self) -> bool {
        matches!(self, Self::Seeded(_))
    }

    /// The resulting grid.
    #[must_use]
    pub fn into_grid(self) -> GridState {
        match self {
            Self::Loaded(grid) | Self::Seeded(grid) => grid,
        }
    }
}

/// Load a snapshot, or seed a random `width x height` grid if the file does
/// not exist.
///
/// Only a missing file triggers the fallback. Unreadable or malformed
/// snapshots are returned as errors.
///
/// # Errors
///
/// Returns an error if the snapshot exists but cannot be loaded, or if the
/// fallback dimensions are zero.
pub fn load_or_seed<R: Rng>(
    path: &Path,
    cell_size: u32,
    width: usize,
    height: usize,
    rng: &mut R,
) -> Result<LoadOutcome, Error> {
    match load_snapshot(path, cell_size) {
        Ok(grid) => Ok(LoadOutcome::Loaded(grid)),
        Err(PersistError::Io { source }) if source.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(
                path = %path.display(),
                width,
                height,
                "snapshot not found, seeding a random grid"
            );
            Ok(LoadOutcome::Seeded(GridState::random(width, height, rng)?))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Coord;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SnapshotFormat::from_path(Path::new("a.png")), SnapshotFormat::Image);
        assert_eq!(SnapshotFormat::from_path(Path::new("a.PNG")), SnapshotFormat::Image);
        assert_eq!(SnapshotFormat::from_path(Path::new("a.json")), SnapshotFormat::Json);
        assert_eq!(SnapshotFormat::from_path(Path::new("grid")), SnapshotFormat::Json);
    }

    #[test]
    fn test_dispatch_roundtrip() {
        let mut grid = GridState::new(6, 5).unwrap();
        grid.set(Coord::new(2, 3), true);
        let dir = tempdir().unwrap();
        for name in ["grid.json", "grid.png"] {
            let path = dir.path().join(name);
            save_snapshot(&grid, &path, 4).unwrap();
            let loaded = load_snapshot(&path, 4).unwrap();
            assert!(loaded.same_cells(&grid), "{name}");
        }
    }

    #[test]
    fn test_missing_file_seeds() {
        let dir = tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for name in ["absent.json", "absent.png"] {
            let outcome =
                load_or_seed(&dir.path().join(name), 10, 12, 9, &mut rng).unwrap();
            assert!(outcome.was_seeded());
            let grid = outcome.into_grid();
            assert_eq!((grid.width(), grid.height()), (12, 9));
        }
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "[[0,1],[1]]").unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let err = load_or_seed(&path, 10, 4, 4, &mut rng).unwrap_err();
        assert!(matches!(err, Error::Persist(PersistError::Malformed(_))));
    }

    #[test]
    fn test_existing_file_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.json");
        fs::write(&path, "[[1,0],[0,1],[1,1]]").unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let outcome = load_or_seed(&path, 10, 40, 40, &mut rng).unwrap();
        assert!(!outcome.was_seeded());
        let grid = outcome.into_grid();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.population(), 4);
    }
}
