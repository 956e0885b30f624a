//! Error types for the simulation core and its persistence boundary.
//!
//! Stepping, rule evaluation and brush edits cannot fail. Only construction
//! (bad dimensions, unknown rule names, invalid configuration) and I/O-adjacent
//! operations have error paths.

use std::io;

/// Rule-set selection errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The name does not match any supported rule set.
    #[error("unknown rule set: {0:?} (expected conway, highlife or daynight)")]
    Unknown(String),
}

/// Grid construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Width or height was zero.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// The cell buffer length does not match the dimensions.
    #[error("expected {expected} cells, got {actual}")]
    CellCount {
        /// `width * height`.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },
}

/// Named pattern lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// No pattern with this name exists.
    #[error("unknown pattern: {0:?}")]
    Unknown(String),
}

/// Snapshot load/save errors.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Reading or writing the snapshot file failed.
    #[error("snapshot I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// The structured snapshot is not valid JSON of the expected shape.
    #[error("snapshot JSON is invalid: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The raster snapshot could not be encoded or decoded.
    #[error("snapshot image is invalid: {source}")]
    Image {
        /// The underlying image error.
        #[from]
        source: image::ImageError,
    },

    /// The snapshot decoded but is not a rectangular 0/1 matrix.
    #[error("malformed snapshot: {0}")]
    Malformed(String),

    /// The image is smaller than one cell block in some direction.
    #[error("image {width}x{height} is smaller than one {cell_size}px cell")]
    ImageTooSmall {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Requested cell size in pixels.
        cell_size: u32,
    },

    /// The encoded image would not fit in `u32` pixel dimensions or in the
    /// pixel buffer cap.
    #[error("grid {width}x{height} at {cell_size}px per cell is too large for an image")]
    ImageTooLarge {
        /// Grid width in cells.
        width: usize,
        /// Grid height in cells.
        height: usize,
        /// Requested cell size in pixels.
        cell_size: u32,
    },

    /// A cell size of zero was requested.
    #[error("cell size must be positive")]
    ZeroCellSize,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Failed to parse the configuration file.
    #[error("failed to parse config JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// A field holds a value the simulation cannot run with.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Crate-level error covering every fallible operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// See [`RuleError`].
    #[error(transparent)]
    Rule(#[from] RuleError),
    /// See [`GridError`].
    #[error(transparent)]
    Grid(#[from] GridError),
    /// See [`PatternError`].
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// See [`PersistError`].
    #[error(transparent)]
    Persist(#[from] PersistError),
    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias for crate operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
