//! Grid invariants - sanity checks that detect bugs.
//!
//! These should never trigger on grids produced by this crate. If they do,
//! stepping, loading or brushing has corrupted the age bookkeeping.

use crate::sim::{Coord, GridState};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Cell where the invariant failed.
    pub coord: Coord,
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invariant violation at ({}, {}): {}",
            self.coord.x, self.coord.y, self.message
        )
    }
}

impl std::error::Error for InvariantViolation {}

/// Check invariants that hold for every grid.
///
/// A dead cell must have age 0.
#[must_use]
pub fn check_invariants(grid: &GridState) -> Vec<InvariantViolation> {
    grid.iter()
        .filter(|&(_, alive, age)| !alive && age != 0)
        .map(|(coord, _, age)| InvariantViolation {
            coord,
            message: format!("dead cell has age {age}"),
        })
        .collect()
}

/// Check invariants that hold for every grid produced by a step.
///
/// In addition to [`check_invariants`], a live cell must have age at least 1.
/// Seeded, loaded, and brush-painted cells start at age 0 and only satisfy
/// this after their first step.
#[must_use]
pub fn check_aged_invariants(grid: &GridState) -> Vec<InvariantViolation> {
    let mut violations = check_invariants(grid);
    violations.extend(
        grid.iter()
            .filter(|&(_, alive, age)| alive && age == 0)
            .map(|(coord, _, _)| InvariantViolation {
                coord,
                message: "live cell has age 0 after a step".to_string(),
            }),
    );
    violations
}

/// Assert grid invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(grid: &GridState) {
    let violations = check_invariants(grid);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
        panic!("Grid invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_grid: &GridState) {}
