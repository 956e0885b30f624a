//! Run command implementation.

use super::output::{format_text, render_ascii, JsonRunResult};
use super::{CliError, OutputFormat};
use indicatif::{ProgressBar, ProgressStyle};
use lifegrid::sim::find_pattern;
use lifegrid::{RuleSet, SimConfig, Simulation};
use std::path::PathBuf;

/// Config fields that can be overridden from the command line.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
    pub(crate) cell_size: Option<u32>,
    pub(crate) rule: Option<RuleSet>,
    pub(crate) seed: Option<u64>,
}

impl Overrides {
    fn apply(self, mut config: SimConfig) -> SimConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(rule) = self.rule {
            config.rule = rule;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

/// What to do once the session is built.
#[derive(Debug)]
pub(crate) struct RunOptions {
    pub(crate) generations: u64,
    pub(crate) format: OutputFormat,
    pub(crate) load: Option<PathBuf>,
    pub(crate) pattern: Option<String>,
    pub(crate) save: Option<PathBuf>,
    pub(crate) show: bool,
    pub(crate) progress: bool,
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the configuration, snapshot or pattern is invalid, or
/// if saving fails.
pub(crate) fn execute(
    config_path: Option<PathBuf>,
    overrides: Overrides,
    options: RunOptions,
) -> Result<(), CliError> {
    let base = match &config_path {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };
    let config = overrides.apply(base);

    let mut sim = Simulation::new(config)?;

    if let Some(path) = &options.load {
        let loaded = sim.load(path)?;
        if !loaded && options.format == OutputFormat::Text {
            println!(
                "Snapshot {} not found, started from a random grid",
                path.display()
            );
        }
    } else if let Some(name) = &options.pattern {
        let (pw, ph) = find_pattern(name)?.extent();
        let x = sim.grid().width().saturating_sub(pw) / 2;
        let y = sim.grid().height().saturating_sub(ph) / 2;
        sim.clear();
        sim.apply_pattern(name, x, y)?;
    }

    let pb = if options.progress {
        let pb = ProgressBar::new(options.generations);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} generations ({per_sec})")
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    for _ in 0..options.generations {
        sim.step();
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    if let Some(save_path) = &options.save {
        sim.save(save_path)
            .map_err(|e| CliError::new(format!("Failed to save snapshot: {e}")))?;
        if options.format == OutputFormat::Text {
            println!("Snapshot saved to: {}", save_path.display());
            println!();
        }
    }

    match options.format {
        OutputFormat::Text => {
            print!("{}", format_text(sim.rule(), sim.grid(), sim.stats()));
            if options.show {
                println!();
                print!("{}", render_ascii(sim.grid()));
            }
        }
        OutputFormat::Json => {
            let json_result = JsonRunResult::new(sim.rule(), sim.grid(), sim.stats());
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let overrides = Overrides {
            cell_size: Some(5),
            rule: Some(RuleSet::DayAndNight),
            seed: Some(9),
            ..Overrides::default()
        };
        let config = overrides.apply(SimConfig::default());
        assert_eq!(config.cell_size, 5);
        assert_eq!(config.width, 800);
        assert_eq!(config.rule, RuleSet::DayAndNight);
        assert_eq!(config.seed, Some(9));
    }
}
