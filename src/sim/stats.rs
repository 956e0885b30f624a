//! Run statistics accumulated from completed steps.

use serde::Serialize;

use crate::sim::StepResult;

/// Counters for a simulation run.
///
/// Only completed steps are recorded, so `generation == 0` means no births,
/// deaths or average have been observed yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RunStatistics {
    /// Number of completed generations.
    pub generation: u64,
    /// Sum of populations observed after each completed generation.
    pub cumulative_population: u64,
    /// Population after the most recent generation.
    pub population: u64,
    /// Births in the most recent generation.
    pub births: u64,
    /// Deaths in the most recent generation.
    pub deaths: u64,
    /// Births across all generations.
    pub total_births: u64,
    /// Deaths across all generations.
    pub total_deaths: u64,
    /// Largest population observed after any generation.
    pub peak_population: u64,
}

impl RunStatistics {
    /// Create empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed step and the population of the resulting grid.
    pub fn record(&mut self, result: StepResult, population: usize) {
        let population = population as u64;
        let births = result.births as u64;
        let deaths = result.deaths as u64;

        self.generation += 1;
        self.cumulative_population += population;
        self.population = population;
        self.births = births;
        self.deaths = deaths;
        self.total_births += births;
        self.total_deaths += deaths;
        self.peak_population = self.peak_population.max(population);
    }

    /// Mean population per completed generation, 0.0 before the first step.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_population(&self) -> f64 {
        if self.generation == 0 {
            return 0.0;
        }
        self.cumulative_population as f64 / self.generation as f64
    }

    /// Discard everything recorded so far.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
