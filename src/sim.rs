//! Simulation core.
//!
//! Implements the cellular automaton on a toroidal grid:
//! - Grid state with per-cell ages
//! - Rule sets (Conway, `HighLife`, Day & Night)
//! - Double-buffered generation stepping
//! - Clipped brush edits
//! - Run statistics
//! - Seed patterns and invariant checks

mod brush;
mod engine;
mod grid;
mod invariants;
mod patterns;
mod rules;
mod stats;

pub use brush::{apply_brush, MIN_BRUSH_SIZE};
pub use engine::{Parallelism, StepResult, UpdateEngine, PARALLEL_THRESHOLD};
pub use grid::{Coord, GridState};
pub use invariants::{assert_invariants, check_aged_invariants, check_invariants, InvariantViolation};
pub use patterns::{find_pattern, Pattern, PATTERNS};
pub use rules::RuleSet;
pub use stats::RunStatistics;
