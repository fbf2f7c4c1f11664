use courtsync_roster::{MatchMethod, NameResolver, RosterTables, UNKNOWN_CATEGORY};
use proptest::prelude::*;

fn nba() -> NameResolver {
    NameResolver::new(RosterTables::nba()).unwrap()
}

// -------------------------------------------------------------------------
// Whole-table properties
// -------------------------------------------------------------------------

#[test]
fn resolution_is_idempotent_over_every_table_entry() {
    let r = nba();
    let mut inputs: Vec<String> = Vec::new();
    inputs.extend(r.tables().teams.iter().map(|t| t.name.clone()));
    inputs.extend(r.tables().abbreviations.iter().map(|(code, _)| code.clone()));
    inputs.extend(r.tables().aliases.iter().map(|(alias, _)| alias.clone()));

    for input in inputs {
        let first = r.resolve(&input);
        let second = r.resolve(&first.entity.canonical_name);
        assert_eq!(first.entity, second.entity, "input {input:?}");
        assert_eq!(second.method, MatchMethod::Exact, "input {input:?}");
    }
}

#[test]
fn no_table_entry_falls_back() {
    let r = nba();
    for team in &r.tables().teams {
        assert!(!r.resolve(&team.name).method.is_fallback());
    }
    for (code, _) in &r.tables().abbreviations {
        assert!(!r.resolve(code).method.is_fallback());
    }
    for (alias, _) in &r.tables().aliases {
        assert!(!r.resolve(alias).method.is_fallback());
    }
}

// -------------------------------------------------------------------------
// Arbitrary-input properties
// -------------------------------------------------------------------------

proptest! {
    /// resolve(resolve(x).canonical_name) == resolve(x) for non-blank x.
    #[test]
    fn resolution_is_idempotent(input in "\\PC{1,40}") {
        prop_assume!(!input.trim().is_empty());
        let r = nba();
        let first = r.resolve(&input);
        let second = r.resolve(&first.entity.canonical_name);
        prop_assert_eq!(&first.entity, &second.entity);
    }

    /// Resolution is total and never yields an empty category.
    #[test]
    fn resolution_never_fails(input in "\\PC{0,40}") {
        let r = nba();
        let res = r.resolve(&input);
        prop_assert!(!res.entity.category.is_empty());
        if input.trim().is_empty() {
            prop_assert_eq!(res.method, MatchMethod::FallbackEmpty);
            prop_assert_eq!(res.entity.category.as_str(), UNKNOWN_CATEGORY);
        }
    }

    /// Whitespace padding never changes the outcome.
    #[test]
    fn padding_is_ignored(input in "\\PC{1,20}") {
        let r = nba();
        let padded = format!("  {input}\t");
        prop_assert_eq!(r.resolve(&input).entity, r.resolve(&padded).entity);
    }
}
