// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Lifegrid: a deterministic cellular automaton engine on a toroidal grid.
//!
//! This crate provides:
//! - Conway's Game of Life and the `HighLife` and Day & Night variants
//! - Synchronous, double-buffered generation steps with per-cell ages
//! - Edge-clipped brush edits and named seed patterns
//! - Run statistics (generations, births, deaths, average population)
//! - JSON and PNG snapshots that round-trip the cell states exactly
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Driver (CLI / render loop)        │
//! ├─────────────────────────────────────┤
//! │   Simulation session                │
//! ├──────────────────┬──────────────────┤
//! │   Sim core       │   Persistence    │
//! └──────────────────┴──────────────────┘
//! ```
//!
//! The core never performs I/O or rendering. Everything runs on integers, so
//! identical inputs always produce identical grids.

pub mod config;
pub mod error;
pub mod persist;
pub mod session;
pub mod sim;

pub use config::SimConfig;
pub use error::{ConfigError, Error, GridError, PatternError, PersistError, Result, RuleError};
pub use persist::{load_or_seed, load_snapshot, save_snapshot, LoadOutcome, SnapshotFormat};
pub use session::Simulation;

// Re-export key simulation types at crate root for convenience
pub use sim::{
    apply_brush, Coord, GridState, RuleSet, RunStatistics, StepResult, UpdateEngine,
};
