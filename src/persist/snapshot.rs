//! Structured snapshots: a JSON array of columns of 0/1 integers.
//!
//! The outer array has one entry per `x`, each inner array one entry per `y`,
//! so the shape is `[width][height]`. Dimensions are implied by the array
//! lengths. Ages are not stored; a decoded grid starts with every age at 0.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::PersistError;
use crate::sim::GridState;

/// Encode the grid's cell states as a JSON array of arrays.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn encode_json(grid: &GridState) -> Result<String, PersistError> {
    Ok(serde_json::to_string(&to_matrix(grid))?)
}

/// Decode a JSON array of arrays of 0/1 into a grid.
///
/// # Errors
///
/// Returns [`PersistError::Json`] if the text is not an array of arrays of
/// small non-negative integers, and [`PersistError::Malformed`] if the matrix
/// is empty, ragged, or holds a value other than 0 or 1.
pub fn decode_json(text: &str) -> Result<GridState, PersistError> {
    let matrix: Vec<Vec<u8>> = serde_json::from_str(text)?;
    from_matrix(&matrix)
}

/// Write a structured snapshot to `path`.
///
/// # Errors
///
/// Returns an error if serialization or file I/O fails.
pub fn save_json(grid: &GridState, path: &Path) -> Result<(), PersistError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &to_matrix(grid))?;
    writer.flush()?;
    Ok(())
}

/// Read a structured snapshot from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid snapshot.
pub fn load_json(path: &Path) -> Result<GridState, PersistError> {
    let text = fs::read_to_string(path)?;
    decode_json(&text)
}

fn to_matrix(grid: &GridState) -> Vec<Vec<u8>> {
    grid.cells()
        .chunks(grid.height())
        .map(|column| column.iter().map(|&alive| u8::from(alive)).collect())
        .collect()
}

fn from_matrix(matrix: &[Vec<u8>]) -> Result<GridState, PersistError> {
    let width = matrix.len();
    let height = matrix.first().map_or(0, Vec::len);
    if width == 0 || height == 0 {
        return Err(PersistError::Malformed(format!(
            "snapshot must be non-empty, got {width}x{height}"
        )));
    }

    let mut cells = Vec::with_capacity(width * height);
    for (x, column) in matrix.iter().enumerate() {
        if column.len() != height {
            return Err(PersistError::Malformed(format!(
                "column {x} has {} cells, expected {height}",
                column.len()
            )));
        }
        for (y, &value) in column.iter().enumerate() {
            match value {
                0 => cells.push(false),
                1 => cells.push(true),
                other => {
                    return Err(PersistError::Malformed(format!(
                        "cell ({x}, {y}) has value {other}, expected 0 or 1"
                    )));
                }
            }
        }
    }

    GridState::from_cells(width, height, cells)
        .map_err(|e| PersistError::Malformed(e.to_string()))
}
