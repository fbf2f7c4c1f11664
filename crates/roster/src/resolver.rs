use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::RosterError;
use crate::metrics::ResolverMetrics;
use crate::tables::RosterTables;
use crate::UNKNOWN_CATEGORY;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// The single authoritative identity a raw string resolves to.
///
/// Equality is exact (case-sensitive) on the canonical name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalEntity {
    pub canonical_name: String,
    pub category: String,
}

/// Which waterfall stage produced the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    Exact,
    Abbreviation,
    Alias,
    NameSubstring,
    AliasSubstring,
    /// Exhausted every stage; the trimmed raw string stands in as canonical.
    FallbackNoMatch,
    /// Blank input, short-circuited before the waterfall. A caller error,
    /// not an ambiguous name.
    FallbackEmpty,
}

impl MatchMethod {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FallbackNoMatch | Self::FallbackEmpty)
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Abbreviation => write!(f, "abbreviation"),
            Self::Alias => write!(f, "alias"),
            Self::NameSubstring => write!(f, "name_substring"),
            Self::AliasSubstring => write!(f, "alias_substring"),
            Self::FallbackNoMatch => write!(f, "fallback_no_match"),
            Self::FallbackEmpty => write!(f, "fallback_empty"),
        }
    }
}

/// Result of one resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub entity: CanonicalEntity,
    pub method: MatchMethod,
    /// Other canonical names the substring scan also hit. First hit wins;
    /// additional hits are flagged here rather than resolved further.
    pub ambiguous_with: Vec<String>,
}

impl Resolution {
    pub fn is_ambiguous(&self) -> bool {
        !self.ambiguous_with.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Maps raw team names onto canonical identities via an ordered waterfall:
/// exact → abbreviation → alias → name substring → alias substring →
/// fallback. Each stage is tried only if the previous found nothing; the
/// first success wins with no backtracking.
pub struct NameResolver {
    tables: RosterTables,
    /// Lowercased team names, index-aligned with `tables.teams`.
    team_names_lower: Vec<String>,
    /// Lowercased aliases, index-aligned with `tables.aliases`.
    alias_names_lower: Vec<String>,
    exact: HashMap<String, usize>,
    abbreviations: HashMap<String, usize>,
    aliases_ci: HashMap<String, usize>,
    metrics: ResolverMetrics,
}

impl NameResolver {
    /// Build a resolver over validated tables. Fails only on table problems
    /// (empty tables, dangling targets): a data-free resolver would make
    /// every resolution meaningless.
    pub fn new(tables: RosterTables) -> Result<Self, RosterError> {
        tables.validate()?;

        let team_index: HashMap<&str, usize> = tables
            .teams
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.as_str(), i))
            .collect();

        let exact = tables
            .teams
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.clone(), i))
            .collect();
        let abbreviations = tables
            .abbreviations
            .iter()
            .map(|(code, target)| (code.to_uppercase(), team_index[target.as_str()]))
            .collect();
        let aliases_ci = tables
            .aliases
            .iter()
            .map(|(alias, target)| (alias.to_lowercase(), team_index[target.as_str()]))
            .collect();

        let team_names_lower = tables.teams.iter().map(|t| t.name.to_lowercase()).collect();
        let alias_names_lower = tables.aliases.iter().map(|(a, _)| a.to_lowercase()).collect();

        Ok(Self {
            tables,
            team_names_lower,
            alias_names_lower,
            exact,
            abbreviations,
            aliases_ci,
            metrics: ResolverMetrics::default(),
        })
    }

    pub fn tables(&self) -> &RosterTables {
        &self.tables
    }

    pub fn metrics(&self) -> &ResolverMetrics {
        &self.metrics
    }

    /// Total function: always returns an identity. Worst case the trimmed
    /// input stands in as the canonical name under the `Unknown` category,
    /// with the fallback visible on the returned method and in the metrics.
    pub fn resolve(&self, raw: &str) -> Resolution {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return self.finish(
                CanonicalEntity {
                    canonical_name: trimmed.to_string(),
                    category: UNKNOWN_CATEGORY.to_string(),
                },
                MatchMethod::FallbackEmpty,
                Vec::new(),
            );
        }

        // Stage 1: exact canonical name, case-sensitive.
        if let Some(&idx) = self.exact.get(trimmed) {
            return self.finish(self.entity(idx), MatchMethod::Exact, Vec::new());
        }

        // Stage 2: abbreviation code.
        if let Some(&idx) = self.abbreviations.get(trimmed.to_uppercase().as_str()) {
            return self.finish(self.entity(idx), MatchMethod::Abbreviation, Vec::new());
        }

        // Stage 3: alias, case-insensitive equality.
        if let Some(&idx) = self.aliases_ci.get(trimmed.to_lowercase().as_str()) {
            return self.finish(self.entity(idx), MatchMethod::Alias, Vec::new());
        }

        let lower = trimmed.to_lowercase();

        // Stage 4: containment either direction against canonical names, or
        // a whole whitespace token of a canonical name. Scans table order;
        // first hit wins, additional hits are flagged as ambiguous.
        let mut hits: Vec<usize> = Vec::new();
        for (idx, team) in self.tables.teams.iter().enumerate() {
            let name_lower = &self.team_names_lower[idx];
            let contained = name_lower.contains(&lower) || lower.contains(name_lower.as_str());
            let token_hit = team
                .name
                .split_whitespace()
                .any(|part| part.to_lowercase() == lower);
            if contained || token_hit {
                hits.push(idx);
            }
        }
        if let Some((&first, rest)) = hits.split_first() {
            let ambiguous_with = rest
                .iter()
                .map(|&i| self.tables.teams[i].name.clone())
                .collect();
            return self.finish(self.entity(first), MatchMethod::NameSubstring, ambiguous_with);
        }

        // Stage 5: containment either direction against aliases, resolved
        // through the alias table.
        let mut alias_hits: Vec<usize> = Vec::new();
        for (idx, alias_lower) in self.alias_names_lower.iter().enumerate() {
            if alias_lower.contains(&lower) || lower.contains(alias_lower.as_str()) {
                alias_hits.push(idx);
            }
        }
        if let Some((&first, rest)) = alias_hits.split_first() {
            let target = |i: usize| self.aliases_ci[&self.alias_names_lower[i]];
            let chosen = target(first);
            let ambiguous_with: Vec<String> = rest
                .iter()
                .map(|&i| self.tables.teams[target(i)].name.clone())
                .filter(|name| *name != self.tables.teams[chosen].name)
                .collect();
            return self.finish(self.entity(chosen), MatchMethod::AliasSubstring, ambiguous_with);
        }

        // Stage 6: fallback.
        self.finish(
            CanonicalEntity {
                canonical_name: trimmed.to_string(),
                category: UNKNOWN_CATEGORY.to_string(),
            },
            MatchMethod::FallbackNoMatch,
            Vec::new(),
        )
    }

    fn entity(&self, idx: usize) -> CanonicalEntity {
        let team = &self.tables.teams[idx];
        CanonicalEntity {
            canonical_name: team.name.clone(),
            category: team.category.clone(),
        }
    }

    fn finish(
        &self,
        entity: CanonicalEntity,
        method: MatchMethod,
        ambiguous_with: Vec<String>,
    ) -> Resolution {
        self.metrics.record(method, !ambiguous_with.is_empty());
        Resolution { entity, method, ambiguous_with }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn nba() -> NameResolver {
        NameResolver::new(RosterTables::nba()).unwrap()
    }

    #[test]
    fn exact_match_case_sensitive() {
        let r = nba();
        let res = r.resolve("Boston Celtics");
        assert_eq!(res.entity.canonical_name, "Boston Celtics");
        assert_eq!(res.entity.category, "Eastern");
        assert_eq!(res.method, MatchMethod::Exact);
    }

    #[test]
    fn abbreviation_any_case() {
        let r = nba();
        for input in ["GSW", "gsw", "Gsw"] {
            let res = r.resolve(input);
            assert_eq!(res.entity.canonical_name, "Golden State Warriors", "input {input:?}");
            assert_eq!(res.method, MatchMethod::Abbreviation);
        }
    }

    #[test]
    fn alias_case_insensitive() {
        let r = nba();
        let res = r.resolve("sixers");
        assert_eq!(res.entity.canonical_name, "Philadelphia 76ers");
        assert_eq!(res.method, MatchMethod::Alias);
    }

    #[test]
    fn substring_partial_city() {
        let r = nba();
        let res = r.resolve("Golden State");
        assert_eq!(res.entity.canonical_name, "Golden State Warriors");
        assert_eq!(res.method, MatchMethod::NameSubstring);
    }

    #[test]
    fn token_match_city_word() {
        let r = nba();
        let res = r.resolve("Antonio");
        assert_eq!(res.entity.canonical_name, "San Antonio Spurs");
        assert_eq!(res.method, MatchMethod::NameSubstring);
    }

    #[test]
    fn ambiguous_substring_first_table_hit_wins() {
        // "New" hits both New York and New Orleans. First hit in table order
        // (New York Knicks) wins and the other is flagged.
        let r = nba();
        let res = r.resolve("New");
        assert_eq!(res.entity.canonical_name, "New York Knicks");
        assert!(res.is_ambiguous());
        assert_eq!(res.ambiguous_with, vec!["New Orleans Pelicans".to_string()]);
    }

    #[test]
    fn trailing_whitespace_trimmed() {
        let r = nba();
        let res = r.resolve("  Utah Jazz  ");
        assert_eq!(res.entity.canonical_name, "Utah Jazz");
        assert_eq!(res.method, MatchMethod::Exact);
    }

    #[test]
    fn empty_input_flagged_distinctly() {
        let r = nba();
        for input in ["", "   ", "\t\n"] {
            let res = r.resolve(input);
            assert_eq!(res.entity.category, UNKNOWN_CATEGORY, "input {input:?}");
            assert_eq!(res.method, MatchMethod::FallbackEmpty);
        }
    }

    #[test]
    fn no_match_falls_back_with_raw_name() {
        let r = nba();
        let res = r.resolve("Harlem Globetrotters");
        assert_eq!(res.entity.canonical_name, "Harlem Globetrotters");
        assert_eq!(res.entity.category, UNKNOWN_CATEGORY);
        assert_eq!(res.method, MatchMethod::FallbackNoMatch);
    }

    #[test]
    fn every_canonical_name_resolves_to_itself() {
        let r = nba();
        for team in &r.tables().teams {
            let res = r.resolve(&team.name);
            assert_eq!(res.entity.canonical_name, team.name);
            assert_eq!(res.entity.category, team.category);
            assert_eq!(res.method, MatchMethod::Exact);
        }
    }

    #[test]
    fn every_abbreviation_agrees_with_full_name() {
        let r = nba();
        for (code, target) in &r.tables().abbreviations {
            let via_code = r.resolve(code);
            let via_name = r.resolve(target);
            assert_eq!(via_code.entity, via_name.entity, "abbreviation {code}");
        }
    }

    #[test]
    fn every_alias_agrees_with_full_name() {
        let r = nba();
        for (alias, target) in &r.tables().aliases {
            let via_alias = r.resolve(&alias.to_uppercase());
            let via_name = r.resolve(target);
            assert_eq!(via_alias.entity, via_name.entity, "alias {alias}");
        }
    }

    #[test]
    fn metrics_count_methods() {
        let r = nba();
        r.resolve("Boston Celtics");
        r.resolve("LAL");
        r.resolve("Mavs");
        r.resolve("");
        r.resolve("nobody");
        let snap = r.metrics().snapshot();
        assert_eq!(snap.exact, 1);
        assert_eq!(snap.abbreviation, 1);
        assert_eq!(snap.alias, 1);
        assert_eq!(snap.fallback_empty, 1);
        assert_eq!(snap.fallback_no_match, 1);
        assert_eq!(snap.total(), 5);
    }
}
