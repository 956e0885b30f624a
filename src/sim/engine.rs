//! Generation stepping.
//!
//! A step is a synchronous whole-grid transition: every neighbor sum is read
//! from the current grid and every result is written to a separate scratch
//! buffer, which is then swapped in. Columns are independent, so they can be
//! evaluated in parallel with rayon without changing the result.

use rayon::prelude::*;
use serde::Serialize;

use crate::sim::{GridState, RuleSet};

/// Grids with at least this many cells are stepped in parallel by default.
pub const PARALLEL_THRESHOLD: usize = 64 * 64;

/// Births and deaths produced by a single step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepResult {
    /// Dead cells that became alive.
    pub births: usize,
    /// Live cells that died.
    pub deaths: usize,
}

impl StepResult {
    fn merge(self, other: Self) -> Self {
        Self {
            births: self.births + other.births,
            deaths: self.deaths + other.deaths,
        }
    }
}

/// How the engine distributes per-cell evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    /// Parallel for grids of at least [`PARALLEL_THRESHOLD`] cells.
    #[default]
    Auto,
    /// Always evaluate on the calling thread.
    Sequential,
    /// Always evaluate columns on the rayon pool.
    Parallel,
}

/// Advances a [`GridState`] one generation at a time under a fixed rule set.
///
/// The engine owns the scratch buffer used for double-buffering, so repeated
/// steps on same-sized grids do not allocate.
#[derive(Debug, Clone)]
pub struct UpdateEngine {
    rule: RuleSet,
    parallelism: Parallelism,
    scratch: Option<GridState>,
}

impl UpdateEngine {
    /// Create an engine for the given rule set.
    #[must_use]
    pub const fn new(rule: RuleSet) -> Self {
        Self {
            rule,
            parallelism: Parallelism::Auto,
            scratch: None,
        }
    }

    /// Override how cells are distributed across threads.
    #[must_use]
    pub const fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// The rule set this engine applies.
    #[must_use]
    pub const fn rule(&self) -> RuleSet {
        self.rule
    }

    /// Advance `state` by exactly one generation.
    ///
    /// Returns exact birth and death counts. Ages are incremented for
    /// survivors, set to 1 on birth and reset to 0 on death.
    pub fn step(&mut self, state: &mut GridState) -> StepResult {
        let mut next = match self.scratch.take() {
            Some(buf) if buf.width() == state.width() && buf.height() == state.height() => buf,
            _ => state.clone(),
        };

        let parallel = match self.parallelism {
            Parallelism::Auto => state.area() >= PARALLEL_THRESHOLD,
            Parallelism::Sequential => false,
            Parallelism::Parallel => true,
        };

        let result = evolve_into(state, &mut next, self.rule, parallel);

        std::mem::swap(state, &mut next);
        self.scratch = Some(next);
        result
    }
}

/// Write the successor of `current` into `next`.
fn evolve_into(
    current: &GridState,
    next: &mut GridState,
    rule: RuleSet,
    parallel: bool,
) -> StepResult {
    let height = current.height();
    let (cells, ages) = next.buffers_mut();

    if parallel {
        cells
            .par_chunks_mut(height)
            .zip(ages.par_chunks_mut(height))
            .enumerate()
            .map(|(x, (col_cells, col_ages))| evolve_column(current, x, col_cells, col_ages, rule))
            .reduce(StepResult::default, StepResult::merge)
    } else {
        cells
            .chunks_mut(height)
            .zip(ages.chunks_mut(height))
            .enumerate()
            .map(|(x, (col_cells, col_ages))| evolve_column(current, x, col_cells, col_ages, rule))
            .fold(StepResult::default(), StepResult::merge)
    }
}

/// Evolve column `x`, reading only from `current`.
fn evolve_column(
    current: &GridState,
    x: usize,
    col_cells: &mut [bool],
    col_ages: &mut [u32],
    rule: RuleSet,
) -> StepResult {
    let height = current.height();
    let src_cells = &current.cells()[x * height..(x + 1) * height];
    let src_ages = &current.ages()[x * height..(x + 1) * height];
    let mut result = StepResult::default();

    for y in 0..height {
        let alive = src_cells[y];
        let next_alive = rule.next_state(alive, current.neighbor_sum(x, y));

        col_cells[y] = next_alive;
        col_ages[y] = match (alive, next_alive) {
            (false, true) => {
                result.births += 1;
                1
            }
            (true, false) => {
                result.deaths += 1;
                0
            }
            (true, true) => src_ages[y].saturating_add(1),
            (false, false) => 0,
        };
    }

    result
}
