//! Convert command implementation.

use super::CliError;
use lifegrid::{load_snapshot, save_snapshot, SnapshotFormat};
use std::path::Path;

/// Execute the convert command.
///
/// Reads `input` and writes the same cells to `output`, each in the format
/// its extension selects.
///
/// # Errors
///
/// Returns an error if the input cannot be decoded or the output cannot be
/// written.
pub(crate) fn execute(input: &Path, output: &Path, cell_size: u32) -> Result<(), CliError> {
    let grid = load_snapshot(input, cell_size)
        .map_err(|e| CliError::new(format!("Failed to load {}: {e}", input.display())))?;
    save_snapshot(&grid, output, cell_size)
        .map_err(|e| CliError::new(format!("Failed to save {}: {e}", output.display())))?;

    println!(
        "Converted {} ({:?}) -> {} ({:?}): {}x{} cells, {} alive",
        input.display(),
        SnapshotFormat::from_path(input),
        output.display(),
        SnapshotFormat::from_path(output),
        grid.width(),
        grid.height(),
        grid.population()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifegrid::{Coord, GridState};
    use tempfile::tempdir;

    #[test]
    fn test_convert_json_to_png_and_back() {
        let dir = tempdir().unwrap();
        let json = dir.path().join("in.json");
        let png = dir.path().join("mid.png");
        let back = dir.path().join("out.json");

        let mut grid = GridState::new(4, 3).unwrap();
        grid.set(Coord::new(1, 2), true);
        grid.set(Coord::new(3, 0), true);
        save_snapshot(&grid, &json, 2).unwrap();

        execute(&json, &png, 2).unwrap();
        execute(&png, &back, 2).unwrap();

        let restored = load_snapshot(&back, 2).unwrap();
        assert!(restored.same_cells(&grid));
    }

    #[test]
    fn test_convert_missing_input() {
        let dir = tempdir().unwrap();
        let result = execute(&dir.path().join("nope.json"), &dir.path().join("x.png"), 10);
        assert!(result.is_err());
    }
}
