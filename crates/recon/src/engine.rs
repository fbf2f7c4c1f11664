use courtsync_roster::NameResolver;

use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::matcher::reconcile;
use crate::model::{ReconInput, ReconMeta, ReconResult, Residue, ResidueReason, StatRecord};
use crate::summary::compute_summary;

/// Run one reconciliation pass per config. Returns the full report.
///
/// Rows the extraction step failed to parse are folded in as
/// `parse_failure` residues, so the report accounts for every input row.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    let resolver = NameResolver::new(config.roster.tables()?)?;

    let mut outcome = reconcile(
        &input.left.records,
        &input.right.records,
        &resolver,
        &config.tolerance,
    );

    for failure in &input.left.failures {
        outcome.unmatched_left.push(failure_residue(failure));
    }
    for failure in &input.right.failures {
        outcome.unmatched_right.push(failure_residue(failure));
    }

    let summary = compute_summary(&outcome.matched, &outcome.unmatched_left, &outcome.unmatched_right);

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        matched: outcome.matched,
        unmatched_left: outcome.unmatched_left,
        unmatched_right: outcome.unmatched_right,
        diagnostics: outcome.diagnostics,
    })
}

fn failure_residue(failure: &crate::model::RowFailure) -> Residue {
    Residue {
        record: StatRecord::new(""),
        reason: ResidueReason::ParseFailure,
        detail: Some(format!("row {}: {}", failure.row, failure.message)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadedRecords;
    use crate::model::RowFailure;

    fn config(toml: &str) -> ReconConfig {
        ReconConfig::from_toml(toml).unwrap()
    }

    const BASIC: &str = r#"
name = "Engine test"

[sources.left]
file = "stats.csv"
[sources.left.columns]
name = "TEAM"
[sources.left.columns.attributes]
wins = "W"

[sources.right]
file = "standings.csv"
[sources.right.columns]
name = "Team"
[sources.right.columns.attributes]
wins = "Wins"

[tolerance]
default_epsilon = 0.5
"#;

    #[test]
    fn parse_failures_become_residues() {
        let config = config(BASIC);
        let left = LoadedRecords {
            records: vec![StatRecord::new("Boston Celtics").with_attribute("wins", 61.0)],
            failures: vec![RowFailure { row: 3, message: "blank 'TEAM' cell".into() }],
        };
        let right = LoadedRecords::from_records(vec![
            StatRecord::new("Celtics").with_attribute("wins", 61.0),
        ]);

        let result = run(&config, &ReconInput { left, right }).unwrap();
        assert_eq!(result.summary.matched, 1);
        assert_eq!(result.summary.unmatched_left, 1);
        assert_eq!(result.summary.residue_reasons["parse_failure"], 1);
        assert_eq!(result.summary.left_records, 2);
        assert_eq!(result.summary.right_records, 1);
        assert!(!result.is_reconciled());

        let residue = &result.unmatched_left[0];
        assert_eq!(residue.reason, ResidueReason::ParseFailure);
        assert!(residue.detail.as_deref().unwrap().contains("row 3"));
    }

    #[test]
    fn reconciled_verdict() {
        let config = config(BASIC);
        let left = LoadedRecords::from_records(vec![
            StatRecord::new("Boston Celtics").with_attribute("wins", 61.0),
        ]);
        let right = LoadedRecords::from_records(vec![
            StatRecord::new("BOS").with_attribute("wins", 61.0),
        ]);

        let result = run(&config, &ReconInput { left, right }).unwrap();
        assert!(result.is_reconciled());
        assert_eq!(result.meta.config_name, "Engine test");
        assert!(!result.meta.engine_version.is_empty());
    }

    #[test]
    fn report_serializes_to_json() {
        let config = config(BASIC);
        let left = LoadedRecords::from_records(vec![
            StatRecord::new("Lakers").with_attribute("wins", 50.0),
        ]);
        let right = LoadedRecords::from_records(vec![
            StatRecord::new("Golden State Warriors").with_attribute("wins", 46.0),
        ]);

        let result = run(&config, &ReconInput { left, right }).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("\"no_counterpart\""));
        assert!(json.contains("\"unmatched_left\""));
    }
}
