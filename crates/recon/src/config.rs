use std::collections::BTreeMap;

use courtsync_roster::{RosterTables, TeamEntry};
use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReconConfig {
    pub name: String,
    pub sources: SourcePair,
    pub tolerance: ToleranceConfig,
    #[serde(default)]
    pub roster: RosterConfig,
}

#[derive(Debug, Deserialize)]
pub struct SourcePair {
    pub left: SourceConfig,
    pub right: SourceConfig,
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub file: String,
    pub columns: ColumnMapping,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    /// CSV header of the team-name column.
    pub name: String,
    /// Attribute name → CSV header carrying its numeric value.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Tolerance
// ---------------------------------------------------------------------------

/// Per-attribute comparison tolerances.
///
/// `default_epsilon` is required: the engine never invents an implicit
/// infinite or zero tolerance for an attribute with no configured epsilon.
#[derive(Debug, Clone, Deserialize)]
pub struct ToleranceConfig {
    pub default_epsilon: f64,
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
}

impl ToleranceConfig {
    pub fn new(default_epsilon: f64) -> Self {
        Self { default_epsilon, attributes: BTreeMap::new() }
    }

    pub fn with(mut self, attribute: impl Into<String>, epsilon: f64) -> Self {
        self.attributes.insert(attribute.into(), epsilon);
        self
    }

    pub fn epsilon_for(&self, attribute: &str) -> f64 {
        self.attributes.get(attribute).copied().unwrap_or(self.default_epsilon)
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// Which league tables the resolver runs on: a builtin league (`league =
/// "nba"`, the default) or inline custom tables.
#[derive(Debug, Default, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub teams: Vec<RosterTeam>,
    #[serde(default)]
    pub abbreviations: BTreeMap<String, String>,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct RosterTeam {
    pub name: String,
    pub conference: String,
}

impl RosterConfig {
    fn has_inline_tables(&self) -> bool {
        !self.teams.is_empty() || !self.abbreviations.is_empty() || !self.aliases.is_empty()
    }

    pub fn tables(&self) -> Result<RosterTables, ReconError> {
        match (&self.league, self.has_inline_tables()) {
            (Some(league), false) => match league.as_str() {
                "nba" => Ok(RosterTables::nba()),
                other => Err(ReconError::UnknownLeague(other.to_string())),
            },
            (None, false) => Ok(RosterTables::nba()),
            (None, true) => {
                let teams = self
                    .teams
                    .iter()
                    .map(|t| TeamEntry { name: t.name.clone(), category: t.conference.clone() })
                    .collect();
                let abbreviations =
                    self.abbreviations.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                let aliases = self.aliases.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                Ok(RosterTables::new(teams, abbreviations, aliases)?)
            }
            (Some(_), true) => Err(ReconError::ConfigValidation(
                "[roster] must set either a builtin league or inline tables, not both".into(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.tolerance.default_epsilon < 0.0 || !self.tolerance.default_epsilon.is_finite() {
            return Err(ReconError::ConfigValidation(format!(
                "default_epsilon must be finite and non-negative, got {}",
                self.tolerance.default_epsilon
            )));
        }
        for (attribute, epsilon) in &self.tolerance.attributes {
            if *epsilon < 0.0 || !epsilon.is_finite() {
                return Err(ReconError::ConfigValidation(format!(
                    "tolerance for '{attribute}' must be finite and non-negative, got {epsilon}"
                )));
            }
        }

        // Tolerance overrides must name a mapped attribute on some side,
        // otherwise the override can never fire.
        for attribute in self.tolerance.attributes.keys() {
            let mapped = self.sources.left.columns.attributes.contains_key(attribute)
                || self.sources.right.columns.attributes.contains_key(attribute);
            if !mapped {
                return Err(ReconError::ConfigValidation(format!(
                    "tolerance names attribute '{attribute}' not mapped by either source"
                )));
            }
        }

        for (side, source) in [("left", &self.sources.left), ("right", &self.sources.right)] {
            if source.columns.name.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "source '{side}': name column must not be blank"
                )));
            }
        }

        // Config must build a usable roster.
        self.roster.tables()?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "Conference wins cross-check"

[sources.left]
file = "stats.csv"
[sources.left.columns]
name = "TEAM"
[sources.left.columns.attributes]
wins = "W"
ppg = "PTS"

[sources.right]
file = "standings.csv"
[sources.right.columns]
name = "Team Name"
[sources.right.columns.attributes]
wins = "Wins"
ppg = "Points Per Game"

[tolerance]
default_epsilon = 0.0
[tolerance.attributes]
ppg = 0.1
"#;

    #[test]
    fn parse_valid() {
        let config = ReconConfig::from_toml(VALID).unwrap();
        assert_eq!(config.name, "Conference wins cross-check");
        assert_eq!(config.sources.left.columns.name, "TEAM");
        assert_eq!(config.sources.right.columns.attributes["wins"], "Wins");
        assert_eq!(config.tolerance.epsilon_for("ppg"), 0.1);
        assert_eq!(config.tolerance.epsilon_for("wins"), 0.0);
    }

    #[test]
    fn roster_defaults_to_nba() {
        let config = ReconConfig::from_toml(VALID).unwrap();
        let tables = config.roster.tables().unwrap();
        assert_eq!(tables.teams.len(), 30);
    }

    #[test]
    fn explicit_nba_league() {
        let input = format!("{VALID}\n[roster]\nleague = \"nba\"\n");
        let config = ReconConfig::from_toml(&input).unwrap();
        assert_eq!(config.roster.tables().unwrap().teams.len(), 30);
    }

    #[test]
    fn reject_unknown_league() {
        let input = format!("{VALID}\n[roster]\nleague = \"wnba\"\n");
        let err = ReconConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("wnba"));
    }

    #[test]
    fn inline_roster_tables() {
        let input = format!(
            r#"{VALID}
[[roster.teams]]
name = "Springfield Isotopes"
conference = "Western"

[roster.abbreviations]
SPR = "Springfield Isotopes"

[roster.aliases]
Isotopes = "Springfield Isotopes"
"#
        );
        let config = ReconConfig::from_toml(&input).unwrap();
        let tables = config.roster.tables().unwrap();
        assert_eq!(tables.teams.len(), 1);
        assert_eq!(tables.teams[0].name, "Springfield Isotopes");
    }

    #[test]
    fn reject_league_plus_inline_tables() {
        let input = format!(
            r#"{VALID}
[roster]
league = "nba"

[[roster.teams]]
name = "Springfield Isotopes"
conference = "Western"
"#
        );
        let err = ReconConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("not both"));
    }

    #[test]
    fn reject_missing_default_epsilon() {
        let input = r#"
name = "No default"

[sources.left]
file = "a.csv"
[sources.left.columns]
name = "TEAM"

[sources.right]
file = "b.csv"
[sources.right.columns]
name = "TEAM"

[tolerance]
[tolerance.attributes]
wins = 0.5
"#;
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn reject_negative_epsilon() {
        let input = VALID.replace("default_epsilon = 0.0", "default_epsilon = -1.0");
        let err = ReconConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn reject_unmapped_tolerance_attribute() {
        let input = format!("{}\nrpg = 0.1\n", VALID.trim_end());
        let err = ReconConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("rpg"));
    }
}
