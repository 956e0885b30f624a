//! Output formatting utilities for CLI.

use lifegrid::{Coord, GridState, RuleSet, RunStatistics};
use serde::Serialize;
use std::fmt::Write;

/// JSON-serializable run result.
#[derive(Debug, Serialize)]
pub(super) struct JsonRunResult {
    /// Rule set name.
    pub(super) rule: RuleSet,
    /// Grid width in cells.
    pub(super) width: usize,
    /// Grid height in cells.
    pub(super) height: usize,
    /// Accumulated statistics.
    pub(super) stats: RunStatistics,
    /// Mean population per generation.
    pub(super) average_population: f64,
    /// Oldest live cell.
    pub(super) max_age: u32,
    /// Mean age of live cells.
    pub(super) mean_age: f64,
}

impl JsonRunResult {
    /// Create from the final grid and statistics.
    pub(super) fn new(rule: RuleSet, grid: &GridState, stats: &RunStatistics) -> Self {
        Self {
            rule,
            width: grid.width(),
            height: grid.height(),
            stats: *stats,
            average_population: stats.average_population(),
            max_age: grid.max_age(),
            mean_age: grid.mean_age(),
        }
    }
}

/// Format run statistics as human-readable text.
pub(super) fn format_text(rule: RuleSet, grid: &GridState, stats: &RunStatistics) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Run Result ({} {}, {}x{})",
        rule,
        rule.notation(),
        grid.width(),
        grid.height()
    );
    let _ = writeln!(output, "  Generations: {}", stats.generation);
    let _ = writeln!(
        output,
        "  Population: {} (peak {}, average {:.2})",
        grid.population(),
        stats.peak_population,
        stats.average_population()
    );
    let _ = writeln!(
        output,
        "  Last step: +{} births, -{} deaths",
        stats.births, stats.deaths
    );
    let _ = writeln!(
        output,
        "  Totals: {} births, {} deaths",
        stats.total_births, stats.total_deaths
    );
    let _ = writeln!(
        output,
        "  Age: max {}, mean {:.2}",
        grid.max_age(),
        grid.mean_age()
    );

    output
}

/// Render the grid as rows of `#` (alive) and `.` (dead), top row first.
pub(super) fn render_ascii(grid: &GridState) -> String {
    let mut output = String::with_capacity((grid.width() + 1) * grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            output.push(if grid.is_alive(Coord::new(x, y)) {
                '#'
            } else {
                '.'
            });
        }
        output.push('\n');
    }
    output
}
