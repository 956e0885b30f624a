//! Inspect command implementation.

use super::output::render_ascii;
use super::CliError;
use lifegrid::{load_snapshot, GridState, SnapshotFormat};
use std::fmt::Write;
use std::path::Path;

/// Execute the inspect command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded.
pub(crate) fn execute(file: &Path, cell_size: u32, show: bool) -> Result<(), CliError> {
    let grid = load_snapshot(file, cell_size)?;

    print!("{}", summarize(file, &grid));

    if show {
        println!();
        print!("{}", render_ascii(&grid));
    }

    Ok(())
}

/// Dimensions and population of a loaded snapshot.
fn summarize(file: &Path, grid: &GridState) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Snapshot: {}", file.display());
    let _ = writeln!(output, "  Format: {:?}", SnapshotFormat::from_path(file));
    let _ = writeln!(output, "  Size: {}x{} cells", grid.width(), grid.height());
    let _ = writeln!(
        output,
        "  Population: {} of {} ({:.1}%)",
        grid.population(),
        grid.area(),
        density(grid.population(), grid.area())
    );
    output
}

#[allow(clippy::cast_precision_loss)]
fn density(population: usize, area: usize) -> f64 {
    if area == 0 {
        0.0
    } else {
        population as f64 * 100.0 / area as f64
    }
}
