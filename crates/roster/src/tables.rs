use serde::Deserialize;

use crate::error::RosterError;

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// One canonical team: the authoritative name plus its category (conference).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEntry {
    pub name: String,
    pub category: String,
}

/// Closed enumeration of a league's teams, abbreviations, and aliases.
///
/// Entry order is the iteration order of the substring scans, so it must stay
/// stable across construction paths. The resolver never infers membership
/// beyond these tables.
#[derive(Debug, Clone)]
pub struct RosterTables {
    pub teams: Vec<TeamEntry>,
    /// Uppercase 2–3 letter code → canonical name.
    pub abbreviations: Vec<(String, String)>,
    /// Nickname / shorthand → canonical name.
    pub aliases: Vec<(String, String)>,
}

impl RosterTables {
    pub fn new(
        teams: Vec<TeamEntry>,
        abbreviations: Vec<(String, String)>,
        aliases: Vec<(String, String)>,
    ) -> Result<Self, RosterError> {
        let tables = Self { teams, abbreviations, aliases };
        tables.validate()?;
        Ok(tables)
    }

    /// All 30 NBA teams with conference categories, abbreviations, and the
    /// nicknames seen across stats and standings pages.
    pub fn nba() -> Self {
        let team = |name: &str, category: &str| TeamEntry {
            name: name.to_string(),
            category: category.to_string(),
        };
        let pair = |k: &str, v: &str| (k.to_string(), v.to_string());

        let teams = vec![
            // Eastern Conference
            team("Atlanta Hawks", "Eastern"),
            team("Boston Celtics", "Eastern"),
            team("Brooklyn Nets", "Eastern"),
            team("Charlotte Hornets", "Eastern"),
            team("Chicago Bulls", "Eastern"),
            team("Cleveland Cavaliers", "Eastern"),
            team("Detroit Pistons", "Eastern"),
            team("Indiana Pacers", "Eastern"),
            team("Miami Heat", "Eastern"),
            team("Milwaukee Bucks", "Eastern"),
            team("New York Knicks", "Eastern"),
            team("Orlando Magic", "Eastern"),
            team("Philadelphia 76ers", "Eastern"),
            team("Toronto Raptors", "Eastern"),
            team("Washington Wizards", "Eastern"),
            // Western Conference
            team("Dallas Mavericks", "Western"),
            team("Denver Nuggets", "Western"),
            team("Golden State Warriors", "Western"),
            team("Houston Rockets", "Western"),
            team("LA Clippers", "Western"),
            team("Los Angeles Lakers", "Western"),
            team("Memphis Grizzlies", "Western"),
            team("Minnesota Timberwolves", "Western"),
            team("New Orleans Pelicans", "Western"),
            team("Oklahoma City Thunder", "Western"),
            team("Phoenix Suns", "Western"),
            team("Portland Trail Blazers", "Western"),
            team("Sacramento Kings", "Western"),
            team("San Antonio Spurs", "Western"),
            team("Utah Jazz", "Western"),
        ];

        let abbreviations = vec![
            pair("ATL", "Atlanta Hawks"),
            pair("BOS", "Boston Celtics"),
            pair("BKN", "Brooklyn Nets"),
            pair("CHA", "Charlotte Hornets"),
            pair("CHI", "Chicago Bulls"),
            pair("CLE", "Cleveland Cavaliers"),
            pair("DET", "Detroit Pistons"),
            pair("IND", "Indiana Pacers"),
            pair("MIA", "Miami Heat"),
            pair("MIL", "Milwaukee Bucks"),
            pair("NYK", "New York Knicks"),
            pair("ORL", "Orlando Magic"),
            pair("PHI", "Philadelphia 76ers"),
            pair("TOR", "Toronto Raptors"),
            pair("WAS", "Washington Wizards"),
            pair("DAL", "Dallas Mavericks"),
            pair("DEN", "Denver Nuggets"),
            pair("GSW", "Golden State Warriors"),
            pair("HOU", "Houston Rockets"),
            pair("LAC", "LA Clippers"),
            pair("LAL", "Los Angeles Lakers"),
            pair("MEM", "Memphis Grizzlies"),
            pair("MIN", "Minnesota Timberwolves"),
            pair("NOP", "New Orleans Pelicans"),
            pair("OKC", "Oklahoma City Thunder"),
            pair("PHX", "Phoenix Suns"),
            pair("POR", "Portland Trail Blazers"),
            pair("SAC", "Sacramento Kings"),
            pair("SAS", "San Antonio Spurs"),
            pair("UTA", "Utah Jazz"),
        ];

        let aliases = vec![
            pair("Hawks", "Atlanta Hawks"),
            pair("Celtics", "Boston Celtics"),
            pair("Nets", "Brooklyn Nets"),
            pair("Hornets", "Charlotte Hornets"),
            pair("Bulls", "Chicago Bulls"),
            pair("Cavaliers", "Cleveland Cavaliers"),
            pair("Cavs", "Cleveland Cavaliers"),
            pair("Pistons", "Detroit Pistons"),
            pair("Pacers", "Indiana Pacers"),
            pair("Heat", "Miami Heat"),
            pair("Bucks", "Milwaukee Bucks"),
            pair("Knicks", "New York Knicks"),
            pair("Magic", "Orlando Magic"),
            pair("76ers", "Philadelphia 76ers"),
            pair("Sixers", "Philadelphia 76ers"),
            pair("Raptors", "Toronto Raptors"),
            pair("Wizards", "Washington Wizards"),
            pair("Mavs", "Dallas Mavericks"),
            pair("Nuggets", "Denver Nuggets"),
            pair("Warriors", "Golden State Warriors"),
            pair("Rockets", "Houston Rockets"),
            pair("Clippers", "LA Clippers"),
            pair("Lakers", "Los Angeles Lakers"),
            pair("Grizzlies", "Memphis Grizzlies"),
            pair("Timberwolves", "Minnesota Timberwolves"),
            pair("Pelicans", "New Orleans Pelicans"),
            pair("Thunder", "Oklahoma City Thunder"),
            pair("Suns", "Phoenix Suns"),
            pair("Blazers", "Portland Trail Blazers"),
            pair("Kings", "Sacramento Kings"),
            pair("Spurs", "San Antonio Spurs"),
            pair("Jazz", "Utah Jazz"),
        ];

        Self { teams, abbreviations, aliases }
    }

    pub fn from_toml(input: &str) -> Result<Self, RosterError> {
        let raw: TablesToml =
            toml::from_str(input).map_err(|e| RosterError::ConfigParse(e.to_string()))?;
        Self::new(
            raw.teams
                .into_iter()
                .map(|t| TeamEntry { name: t.name, category: t.conference })
                .collect(),
            raw.abbreviations.into_iter().collect(),
            raw.aliases.into_iter().collect(),
        )
    }

    pub fn validate(&self) -> Result<(), RosterError> {
        // Empty tables would make resolution meaningless.
        if self.teams.is_empty() {
            return Err(RosterError::TableValidation("team table is empty".into()));
        }
        if self.abbreviations.is_empty() {
            return Err(RosterError::TableValidation("abbreviation table is empty".into()));
        }
        if self.aliases.is_empty() {
            return Err(RosterError::TableValidation("alias table is empty".into()));
        }

        for (code, target) in &self.abbreviations {
            if !self.teams.iter().any(|t| &t.name == target) {
                return Err(RosterError::UnknownTarget {
                    kind: "abbreviation",
                    key: code.clone(),
                    target: target.clone(),
                });
            }
        }
        for (alias, target) in &self.aliases {
            if !self.teams.iter().any(|t| &t.name == target) {
                return Err(RosterError::UnknownTarget {
                    kind: "alias",
                    key: alias.clone(),
                    target: target.clone(),
                });
            }
        }

        let mut seen = std::collections::HashSet::new();
        for (alias, _) in &self.aliases {
            if !seen.insert(alias.to_lowercase()) {
                return Err(RosterError::DuplicateAlias(alias.clone()));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TOML shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TablesToml {
    #[serde(default)]
    teams: Vec<TeamToml>,
    #[serde(default)]
    abbreviations: std::collections::BTreeMap<String, String>,
    #[serde(default)]
    aliases: std::collections::BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct TeamToml {
    name: String,
    conference: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
