//! `courtsync run` / `validate` / `resolve` — config-driven reconciliation.

use std::path::Path;

use courtsync_recon::config::SourceConfig;
use courtsync_recon::model::{ReconInput, ReconResult};
use courtsync_recon::{load_csv_records, run, ReconConfig, ReconError};
use courtsync_roster::{NameResolver, RosterTables};

use crate::exit_codes::{EXIT_INVALID_CONFIG, EXIT_MISMATCH, EXIT_RUNTIME};
use crate::CliError;

fn cli_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn config_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::Io(_) => EXIT_RUNTIME,
        _ => EXIT_INVALID_CONFIG,
    }
}

fn load_config(config_path: &Path) -> Result<ReconConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot read config: {e}")))?;
    ReconConfig::from_toml(&config_str).map_err(|e| cli_err(config_exit_code(&e), e.to_string()))
}

fn load_source(base_dir: &Path, source: &SourceConfig) -> Result<courtsync_recon::LoadedRecords, CliError> {
    let csv_path = base_dir.join(&source.file);
    let csv_data = std::fs::read_to_string(&csv_path)
        .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot read {}: {e}", csv_path.display())))?;
    load_csv_records(&source.file, &csv_data, source)
        .map_err(|e| cli_err(EXIT_RUNTIME, e.to_string()))
}

pub fn cmd_run(config_path: &Path, json_output: bool, output_file: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config_path)?;

    // Source file paths are relative to the config file's directory.
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let input = ReconInput {
        left: load_source(base_dir, &config.sources.left)?,
        right: load_source(base_dir, &config.sources.right)?,
    };

    let result = run(&config, &input).map_err(|e| cli_err(EXIT_RUNTIME, e.to_string()))?;

    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| cli_err(EXIT_RUNTIME, format!("JSON serialization error: {e}")))?;

    if let Some(path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    eprintln!("{}", human_summary(&result));
    for diagnostic in &result.diagnostics {
        eprintln!("  note: {diagnostic}");
    }

    if result.is_reconciled() {
        Ok(())
    } else {
        let s = &result.summary;
        Err(cli_err(
            EXIT_MISMATCH,
            format!(
                "not reconciled: {} attribute mismatches, {} unmatched",
                s.attribute_mismatches,
                s.unmatched_left + s.unmatched_right
            ),
        ))
    }
}

pub fn cmd_validate(config_path: &Path) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    eprintln!("ok: '{}' is valid", config.name);
    Ok(())
}

pub fn cmd_resolve(name: &str, tables_path: Option<&Path>) -> Result<(), CliError> {
    let tables = match tables_path {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot read {}: {e}", path.display())))?;
            RosterTables::from_toml(&data)
                .map_err(|e| cli_err(EXIT_INVALID_CONFIG, e.to_string()))?
        }
        None => RosterTables::nba(),
    };

    let resolver =
        NameResolver::new(tables).map_err(|e| cli_err(EXIT_INVALID_CONFIG, e.to_string()))?;
    let resolution = resolver.resolve(name);

    println!(
        "{} ({}) via {}",
        resolution.entity.canonical_name, resolution.entity.category, resolution.method
    );
    if resolution.is_ambiguous() {
        eprintln!("note: also matched {}", resolution.ambiguous_with.join(", "));
    }
    Ok(())
}

fn human_summary(result: &ReconResult) -> String {
    let s = &result.summary;
    format!(
        "recon '{}': {} vs {} records — {} matched ({} within tolerance), {} attribute mismatches, {} unmatched left, {} unmatched right",
        result.meta.config_name,
        s.left_records,
        s.right_records,
        s.matched,
        s.pairs_within_tolerance,
        s.attribute_mismatches,
        s.unmatched_left,
        s.unmatched_right,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
