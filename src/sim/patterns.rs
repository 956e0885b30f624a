//! Well-known seed patterns.

use crate::error::PatternError;
use crate::sim::{Coord, GridState};

/// A named pattern as live-cell offsets `(dx, dy)` from its top-left corner.
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    /// Canonical lowercase name.
    pub name: &'static str,
    /// Live cells relative to the pattern origin.
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// Bounding box `(width, height)` of the pattern.
    #[must_use]
    pub fn extent(&self) -> (usize, usize) {
        let w = self.cells.iter().map(|&(dx, _)| dx + 1).max().unwrap_or(0);
        let h = self.cells.iter().map(|&(_, dy)| dy + 1).max().unwrap_or(0);
        (w, h)
    }

    /// Bring the pattern's cells to life with its origin at `(x, y)`,
    /// wrapping around the torus. Existing live cells are left alone and new
    /// cells start at age 0.
    pub fn stamp(&self, grid: &mut GridState, x: usize, y: usize) {
        let (w, h) = (grid.width(), grid.height());
        for &(dx, dy) in self.cells {
            let coord = Coord::new((x % w + dx) % w, (y % h + dy) % h);
            if !grid.is_alive(coord) {
                grid.set(coord, true);
                grid.set_age(coord, 0);
            }
        }
    }
}

/// Built-in patterns.
pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "lwss",
        cells: &[
            (1, 0), (4, 0),
            (0, 1),
            (0, 2), (4, 2),
            (0, 3), (1, 3), (2, 3), (3, 3),
        ],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "pulsar",
        cells: &[
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
];

/// Look up a built-in pattern by name (case-insensitive).
///
/// # Errors
///
/// Returns [`PatternError::Unknown`] if no pattern has this name.
pub fn find_pattern(name: &str) -> Result<&'static Pattern, PatternError> {
    let wanted = name.trim().to_ascii_lowercase();
    PATTERNS
        .iter()
        .find(|p| p.name == wanted)
        .ok_or_else(|| PatternError::Unknown(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{RuleSet, UpdateEngine};

    #[test]
    fn test_find_pattern() {
        assert_eq!(find_pattern("Glider").unwrap().cells.len(), 5);
        assert!(matches!(find_pattern("spaceship"), Err(PatternError::Unknown(_))));
    }

    #[test]
    fn test_extent() {
        assert_eq!(find_pattern("blinker").unwrap().extent(), (3, 1));
        assert_eq!(find_pattern("pulsar").unwrap().extent(), (13, 13));
    }

    #[test]
    fn test_stamp_wraps() {
        let mut grid = GridState::new(5, 5).unwrap();
        find_pattern("blinker").unwrap().stamp(&mut grid, 4, 4);
        assert!(grid.is_alive(Coord::new(4, 4)));
        assert!(grid.is_alive(Coord::new(0, 4)));
        assert!(grid.is_alive(Coord::new(1, 4)));
    }

    #[test]
    fn test_stamp_far_origin_reduces_first() {
        let mut grid = GridState::new(5, 5).unwrap();
        find_pattern("blinker").unwrap().stamp(&mut grid, usize::MAX, usize::MAX);
        assert_eq!(grid.population(), 3);
        for x in 0..3 {
            assert!(grid.is_alive(Coord::new(x, 0)));
        }
    }

    #[test]
    fn test_glider_translates() {
        let mut grid = GridState::new(12, 12).unwrap();
        let glider = find_pattern("glider").unwrap();
        glider.stamp(&mut grid, 2, 2);
        let mut engine = UpdateEngine::new(RuleSet::Conway);
        for _ in 0..4 {
            engine.step(&mut grid);
        }
        let mut expected = GridState::new(12, 12).unwrap();
        glider.stamp(&mut expected, 3, 3);
        assert!(grid.same_cells(&expected));
    }

    #[test]
    fn test_pulsar_period_three() {
        let mut grid = GridState::new(20, 20).unwrap();
        find_pattern("pulsar").unwrap().stamp(&mut grid, 3, 3);
        let start = grid.clone();
        let mut engine = UpdateEngine::new(RuleSet::Conway);
        engine.step(&mut grid);
        assert!(!grid.same_cells(&start));
        engine.step(&mut grid);
        engine.step(&mut grid);
        assert!(grid.same_cells(&start));
    }
}
