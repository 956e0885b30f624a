//! Square brush stamps for painting and erasing cells.
//!
//! Brush edits are clipped to the grid. They never wrap around the torus.

use crate::sim::{Coord, GridState};

/// Smallest effective brush size.
pub const MIN_BRUSH_SIZE: usize = 1;

/// Set every cell in a `size x size` square centered on `(center_x, center_y)`
/// to `alive`.
///
/// The square spans `center - size / 2 .. center - size / 2 + size` on each
/// axis. Cells outside the grid are skipped. Erased cells get age 0. Painted
/// cells that were dead start at age 0 like freshly loaded cells; cells that
/// were already alive keep their age.
///
/// Returns the number of cells whose state changed.
#[allow(clippy::cast_sign_loss)]
pub fn apply_brush(
    grid: &mut GridState,
    center_x: i64,
    center_y: i64,
    size: usize,
    alive: bool,
) -> usize {
    let size = i64::try_from(size.max(MIN_BRUSH_SIZE)).unwrap_or(i64::MAX);
    let half = size / 2;

    let width = i64::try_from(grid.width()).unwrap_or(i64::MAX);
    let height = i64::try_from(grid.height()).unwrap_or(i64::MAX);

    let x0 = (center_x.saturating_sub(half)).max(0);
    let y0 = (center_y.saturating_sub(half)).max(0);
    let x1 = (center_x.saturating_sub(half).saturating_add(size)).min(width);
    let y1 = (center_y.saturating_sub(half).saturating_add(size)).min(height);

    let mut changed = 0;
    for x in x0..x1 {
        for y in y0..y1 {
            let coord = Coord::new(x as usize, y as usize);
            if grid.is_alive(coord) != alive {
                changed += 1;
                grid.set(coord, alive);
                grid.set_age(coord, 0);
            }
        }
    }
    changed
}
