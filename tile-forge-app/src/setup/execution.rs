//! Handles the core execution logic: load rules, generate, save.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::output;
use crate::progress::{into_callback, ThrottledLogReporter};
use anyhow::Context;
use log::{error, info, warn};
use wfc_core::{generate, Generation, WfcConfig, WfcError};
use wfc_rules::loader::load_from_file;
use wfc_rules::{EdgeCompatibilityTable, TileCatalog};

/// Seed for attempt `attempt` (0-based), counting up from `base`.
pub const fn attempt_seed(base: u64, attempt: u32) -> u64 {
    base.wrapping_add(attempt as u64)
}

fn wfc_config(config: &AppConfig, seed: u64) -> WfcConfig {
    let mut builder = WfcConfig::builder().seed(seed);
    if let Some(max) = config.max_iterations {
        builder = builder.max_iterations(max);
    }
    if let Some(interval) = config.report_progress_interval {
        builder = builder.progress_callback(into_callback(ThrottledLogReporter::new(interval)));
    }
    builder.build()
}

/// Runs up to `config.attempts` generations, each with the next seed, and
/// returns the first successful one or the last incomplete one.
///
/// Rule-validation failures abort immediately; a new seed cannot fix them.
pub fn generate_with_retries(
    catalog: &TileCatalog,
    table: &EdgeCompatibilityTable,
    config: &AppConfig,
) -> Result<Generation, AppError> {
    let base_seed = config.seed.unwrap_or_else(rand::random);
    let mut attempt = 0;
    loop {
        let seed = attempt_seed(base_seed, attempt);
        info!(
            "Attempt {}/{} with seed {seed}",
            attempt + 1,
            config.attempts
        );
        let generation = generate(
            catalog,
            table,
            config.width,
            config.height,
            wfc_config(config, seed),
        )
        .map_err(|e| {
            if let WfcError::InvalidRules(report) = &e {
                for violation in report.violations() {
                    error!("Rule violation: {violation}");
                }
            }
            AppError::from(e)
        })?;

        attempt += 1;
        if generation.is_success() || attempt >= config.attempts {
            return Ok(generation);
        }
        warn!(
            "Attempt {attempt} ended {} with {} contradicted cells; retrying",
            generation.status,
            generation.contradictions().len()
        );
    }
}

/// Loads the rule file, generates and writes the output.
///
/// An incomplete generation is still written; the caller decides the exit
/// status from [`Generation::status`].
pub fn run_standard_mode(config: &AppConfig) -> Result<Generation, AppError> {
    info!("Loading rules from {:?}", config.rule_file);
    let (catalog, table) = load_from_file(&config.rule_file)?;

    info!(
        "Generating {}x{} grid from {} tiles",
        config.width,
        config.height,
        catalog.len()
    );
    let generation = generate_with_retries(&catalog, &table, config)?;

    if generation.is_success() {
        info!(
            "Generation completed successfully in {:?} ({} iterations)",
            generation.elapsed, generation.iterations
        );
    } else {
        warn!(
            "Generation {}: {} contradicted cells; writing partial grid",
            generation.status,
            generation.contradictions().len()
        );
    }

    output::save_generation(&generation, &config.output_path, config.output_format)
        .with_context(|| format!("Failed to save output to {:?}", config.output_path))?;
    Ok(generation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GlobalLogLevel, OutputFormat};
    use std::path::PathBuf;
    use wfc_core::{GenerationStatus, IncompleteReason};
    use wfc_rules::{TileDefinition, TileEdges};

    fn config(seed: u64, attempts: u32) -> AppConfig {
        AppConfig {
            rule_file: PathBuf::from("unused.ron"),
            width: 3,
            height: 1,
            seed: Some(seed),
            max_iterations: None,
            attempts,
            output_path: PathBuf::from("unused.txt"),
            output_format: OutputFormat::Text,
            report_progress_interval: None,
            log_level: GlobalLogLevel::Info,
        }
    }

    #[test]
    fn test_attempt_seeds_count_up() {
        assert_eq!(attempt_seed(10, 0), 10);
        assert_eq!(attempt_seed(10, 2), 12);
        assert_eq!(attempt_seed(u64::MAX, 1), 0);
    }

    #[test]
    fn test_success_stops_after_first_attempt() {
        let catalog: TileCatalog =
            std::iter::once(TileDefinition::new("plain", TileEdges::uniform("A"))).collect();
        let table = EdgeCompatibilityTable::self_matching(["A"]);
        let generation = generate_with_retries(&catalog, &table, &config(5, 4)).unwrap();
        assert!(generation.is_success());
        assert_eq!(generation.seed, Some(5));
    }

    #[test]
    fn test_unsolvable_rules_use_every_attempt() {
        let catalog: TileCatalog =
            std::iter::once(TileDefinition::new("lonely", TileEdges::uniform("A"))).collect();
        let mut table = EdgeCompatibilityTable::new();
        table.insert_symmetric("A", "B");
        let generation = generate_with_retries(&catalog, &table, &config(5, 3)).unwrap();
        assert_eq!(
            generation.status,
            GenerationStatus::Incomplete(IncompleteReason::Stalled)
        );
        assert_eq!(generation.seed, Some(7));
    }

    #[test]
    fn test_invalid_rules_are_not_retried() {
        let catalog: TileCatalog =
            std::iter::once(TileDefinition::new("plain", TileEdges::uniform("A"))).collect();
        let result = generate_with_retries(&catalog, &EdgeCompatibilityTable::new(), &config(1, 3));
        assert!(matches!(
            result,
            Err(AppError::WfcCore(WfcError::InvalidRules(_)))
        ));
    }
}
