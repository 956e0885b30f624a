//! A running simulation: grid, engine, statistics and driver controls.
//!
//! `Simulation` is the single state object an external driver (render loop,
//! CLI, test) holds. It never performs rendering or timing itself; it only
//! reports the interval the driver should wait between ticks.

use std::path::Path;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{MAX_TICK_RATE, MIN_TICK_RATE, SimConfig};
use crate::error::{Error, PatternError, PersistError};
use crate::persist::{load_or_seed, save_snapshot};
use crate::sim::{
    apply_brush, find_pattern, GridState, RuleSet, RunStatistics, StepResult, UpdateEngine,
    MIN_BRUSH_SIZE,
};

/// Brush size a new session starts with.
pub const DEFAULT_BRUSH_SIZE: usize = 1;

/// Simulation session.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    grid: GridState,
    engine: UpdateEngine,
    stats: RunStatistics,
    rng: StdRng,
    paused: bool,
    tick_rate: u32,
    brush_size: usize,
}

impl Simulation {
    /// Start a session on a randomly seeded grid sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: SimConfig) -> Result<Self, Error> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let grid = GridState::random(config.grid_width(), config.grid_height(), &mut rng)?;
        Ok(Self::assemble(config, grid, rng))
    }

    /// Start a session on an existing grid. The grid keeps its own
    /// dimensions even if they differ from the configured ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_grid(config: SimConfig, grid: GridState) -> Result<Self, Error> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self::assemble(config, grid, rng))
    }

    fn assemble(config: SimConfig, grid: GridState, rng: StdRng) -> Self {
        tracing::info!(
            rule = %config.rule,
            width = grid.width(),
            height = grid.height(),
            tick_rate = config.tick_rate,
            "simulation started"
        );
        Self {
            engine: UpdateEngine::new(config.rule),
            tick_rate: config.tick_rate,
            config,
            grid,
            stats: RunStatistics::new(),
            rng,
            paused: false,
            brush_size: DEFAULT_BRUSH_SIZE,
        }
    }

    /// The configuration this session was started with.
    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Current grid.
    #[must_use]
    pub const fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Statistics since the last reset or load.
    #[must_use]
    pub const fn stats(&self) -> &RunStatistics {
        &self.stats
    }

    /// Active rule set.
    #[must_use]
    pub const fn rule(&self) -> RuleSet {
        self.engine.rule()
    }

    /// Advance one generation unless paused.
    pub fn tick(&mut self) -> Option<StepResult> {
        if self.paused {
            return None;
        }
        Some(self.step())
    }

    /// Advance one generation regardless of the pause state.
    pub fn step(&mut self) -> StepResult {
        let result = self.engine.step(&mut self.grid);
        self.stats.record(result, self.grid.population());
        result
    }

    /// Advance `generations` steps, returning the result of the last one.
    pub fn run(&mut self, generations: u64) -> StepResult {
        let mut last = StepResult::default();
        for _ in 0..generations {
            last = self.step();
        }
        last
    }

    /// Replace the grid with a fresh random one of the configured size and
    /// clear the statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured grid is empty.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.grid = GridState::random(
            self.config.grid_width(),
            self.config.grid_height(),
            &mut self.rng,
        )?;
        self.stats.reset();
        tracing::info!(population = self.grid.population(), "grid reset");
        Ok(())
    }

    /// Kill every cell and clear the statistics.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.stats.reset();
        tracing::debug!("grid cleared");
    }

    /// Whether [`tick`](Self::tick) is currently a no-op.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flip the pause state and return the new one.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        tracing::debug!(paused = self.paused, "pause toggled");
        self.paused
    }

    /// Current tick rate in generations per second.
    #[must_use]
    pub const fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// Time the driver should wait between ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate
    }

    /// Raise the tick rate by one, up to [`MAX_TICK_RATE`].
    pub fn faster(&mut self) -> u32 {
        self.tick_rate = (self.tick_rate + 1).min(MAX_TICK_RATE);
        self.tick_rate
    }

    /// Lower the tick rate by one, down to [`MIN_TICK_RATE`].
    pub fn slower(&mut self) -> u32 {
        self.tick_rate = self.tick_rate.saturating_sub(1).max(MIN_TICK_RATE);
        self.tick_rate
    }

    /// Current brush size in cells.
    #[must_use]
    pub const fn brush_size(&self) -> usize {
        self.brush_size
    }

    /// Grow the brush by one cell.
    pub fn grow_brush(&mut self) -> usize {
        self.brush_size = self.brush_size.saturating_add(1);
        self.brush_size
    }

    /// Shrink the brush by one cell, down to [`MIN_BRUSH_SIZE`].
    pub fn shrink_brush(&mut self) -> usize {
        self.brush_size = self.brush_size.saturating_sub(1).max(MIN_BRUSH_SIZE);
        self.brush_size
    }

    /// Apply the brush centered on grid cell `(x, y)`. Returns the number of
    /// cells changed.
    pub fn brush_cell(&mut self, x: i64, y: i64, alive: bool) -> usize {
        apply_brush(&mut self.grid, x, y, self.brush_size, alive)
    }

    /// Paint live cells under a pointer at pixel `(px, py)`.
    pub fn paint_at_pixel(&mut self, px: i64, py: i64) -> usize {
        let (x, y) = self.pixel_to_cell(px, py);
        self.brush_cell(x, y, true)
    }

    /// Erase cells under a pointer at pixel `(px, py)`.
    pub fn erase_at_pixel(&mut self, px: i64, py: i64) -> usize {
        let (x, y) = self.pixel_to_cell(px, py);
        self.brush_cell(x, y, false)
    }

    fn pixel_to_cell(&self, px: i64, py: i64) -> (i64, i64) {
        let size = i64::from(self.config.cell_size);
        (px.div_euclid(size), py.div_euclid(size))
    }

    /// Stamp a named pattern with its origin at cell `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Unknown`] if no pattern has this name.
    pub fn apply_pattern(&mut self, name: &str, x: usize, y: usize) -> Result<(), PatternError> {
        let pattern = find_pattern(name)?;
        pattern.stamp(&mut self.grid, x, y);
        tracing::debug!(pattern = pattern.name, x, y, "pattern applied");
        Ok(())
    }

    /// Save the current grid. The format follows the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or file I/O fails.
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        save_snapshot(&self.grid, path, self.config.cell_size)
    }

    /// Replace the grid with a snapshot and clear the statistics.
    ///
    /// A missing file seeds a random grid of the configured size instead.
    /// Returns `true` if the snapshot was read and `false` if it was seeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be loaded.
    pub fn load(&mut self, path: &Path) -> Result<bool, Error> {
        let outcome = load_or_seed(
            path,
            self.config.cell_size,
            self.config.grid_width(),
            self.config.grid_height(),
            &mut self.rng,
        )?;
        let loaded = !outcome.was_seeded();
        self.grid = outcome.into_grid();
        self.stats.reset();
        tracing::info!(
            path = %path.display(),
            loaded,
            width = self.grid.width(),
            height = self.grid.height(),
            "grid replaced from snapshot"
        );
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Coord;
    use tempfile::tempdir;

    fn config() -> SimConfig {
        SimConfig {
            width: 200,
            height: 100,
            cell_size: 10,
            seed: Some(42),
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_new_uses_config_dimensions() {
        let sim = Simulation::new(config()).unwrap();
        assert_eq!(sim.grid().width(), 20);
        assert_eq!(sim.grid().height(), 10);
        assert_eq!(sim.stats().generation, 0);
        assert_eq!(sim.rule(), RuleSet::Conway);
    }

    #[test]
    fn test_seed_reproducible() {
        let a = Simulation::new(config()).unwrap();
        let b = Simulation::new(config()).unwrap();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bad = SimConfig {
            cell_size: 0,
            ..config()
        };
        assert!(matches!(Simulation::new(bad), Err(Error::Config(_))));
    }

    #[test]
    fn test_tick_respects_pause() {
        let mut sim = Simulation::new(config()).unwrap();
        assert!(sim.tick().is_some());
        assert!(sim.toggle_pause());
        assert!(sim.tick().is_none());
        assert_eq!(sim.stats().generation, 1);
        sim.step();
        assert_eq!(sim.stats().generation, 2);
        assert!(!sim.toggle_pause());
    }

    #[test]
    fn test_stats_track_population() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.run(5);
        assert_eq!(sim.stats().generation, 5);
        assert_eq!(sim.stats().population, sim.grid().population() as u64);
    }

    #[test]
    fn test_reset_clears_stats() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.run(3);
        sim.reset().unwrap();
        assert_eq!(sim.stats().generation, 0);
        assert_eq!(sim.grid().width(), 20);
    }

    #[test]
    fn test_speed_bounds() {
        let mut sim = Simulation::new(SimConfig {
            tick_rate: MIN_TICK_RATE,
            ..config()
        })
        .unwrap();
        assert_eq!(sim.slower(), MIN_TICK_RATE);
        assert_eq!(sim.faster(), MIN_TICK_RATE + 1);
        for _ in 0..500 {
            sim.faster();
        }
        assert_eq!(sim.tick_rate(), MAX_TICK_RATE);
        assert_eq!(sim.tick_interval(), Duration::from_secs(1) / MAX_TICK_RATE);
    }

    #[test]
    fn test_brush_size_bounds() {
        let mut sim = Simulation::new(config()).unwrap();
        assert_eq!(sim.shrink_brush(), MIN_BRUSH_SIZE);
        assert_eq!(sim.grow_brush(), 2);
        assert_eq!(sim.grow_brush(), 3);
    }

    #[test]
    fn test_paint_and_erase_at_pixel() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.clear();
        sim.grow_brush();
        sim.grow_brush();
        assert_eq!(sim.paint_at_pixel(55, 55), 9);
        assert!(sim.grid().is_alive(Coord::new(4, 4)));
        assert!(sim.grid().is_alive(Coord::new(6, 6)));
        assert_eq!(sim.erase_at_pixel(50, 50), 9);
        assert_eq!(sim.grid().population(), 0);
        // Negative pointer coordinates clip instead of wrapping.
        assert_eq!(sim.paint_at_pixel(-5, -5), 1);
        assert!(sim.grid().is_alive(Coord::new(0, 0)));
        assert!(!sim.grid().is_alive(Coord::new(19, 9)));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let mut sim = Simulation::new(config()).unwrap();
        sim.run(2);
        for name in ["state.json", "state.png"] {
            let path = dir.path().join(name);
            sim.save(&path).unwrap();
            let before = sim.grid().clone();
            sim.run(3);
            assert!(sim.load(&path).unwrap());
            assert!(sim.grid().same_cells(&before));
            assert!(sim.grid().ages().iter().all(|&age| age == 0));
            assert_eq!(sim.stats().generation, 0);
        }
    }

    #[test]
    fn test_load_missing_reseeds() {
        let dir = tempdir().unwrap();
        let mut sim = Simulation::new(config()).unwrap();
        assert!(!sim.load(&dir.path().join("missing.json")).unwrap());
        assert_eq!(sim.grid().width(), 20);
    }

    #[test]
    fn test_apply_pattern() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.clear();
        sim.apply_pattern("blinker", 5, 5).unwrap();
        assert_eq!(sim.grid().population(), 3);
        assert!(sim.apply_pattern("unicorn", 0, 0).is_err());
    }
}
