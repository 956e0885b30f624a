//! CLI command implementations for Lifegrid.

pub(crate) mod convert;
pub(crate) mod inspect;
pub(crate) mod run;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<lifegrid::Error> for CliError {
    fn from(e: lifegrid::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<lifegrid::PersistError> for CliError {
    fn from(e: lifegrid::PersistError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<lifegrid::ConfigError> for CliError {
    fn from(e: lifegrid::ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<lifegrid::PatternError> for CliError {
    fn from(e: lifegrid::PatternError) -> Self {
        Self::new(e.to_string())
    }
}
