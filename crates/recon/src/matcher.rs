use std::collections::BTreeMap;

use courtsync_roster::{MatchMethod, NameResolver, Resolution};

use crate::compare::{all_within, compare_attributes};
use crate::config::ToleranceConfig;
use crate::model::{
    Diagnostic, MatchedPair, PairOutcome, Residue, ResidueReason, Side, StatRecord,
};

/// Match two record lists by resolved canonical identity and compare matched
/// attributes under tolerance.
///
/// Never aborts on malformed records: a record that cannot be paired degrades
/// to a residue with a recorded reason and the pass continues. Every input
/// record lands in exactly one of matched / unmatched_left / unmatched_right.
pub fn reconcile(
    left: &[StatRecord],
    right: &[StatRecord],
    resolver: &NameResolver,
    tolerance: &ToleranceConfig,
) -> PairOutcome {
    let mut diagnostics = Vec::new();

    let left_ids = resolve_side(left, Side::Left, resolver, &mut diagnostics);
    let right_ids = resolve_side(right, Side::Right, resolver, &mut diagnostics);

    // Two raw names on one side resolving to the same identity is an internal
    // inconsistency: every involved record becomes a residue, nothing is
    // silently merged.
    let left_dup = flag_duplicates(left, &left_ids, Side::Left, &mut diagnostics);
    let right_dup = flag_duplicates(right, &right_ids, Side::Right, &mut diagnostics);

    // Unique canonical name → record index, deterministic order.
    let left_by_name: BTreeMap<&str, usize> = left_ids
        .iter()
        .enumerate()
        .filter(|(i, _)| !left_dup[*i])
        .map(|(i, res)| (res.entity.canonical_name.as_str(), i))
        .collect();
    let right_by_name: BTreeMap<&str, usize> = right_ids
        .iter()
        .enumerate()
        .filter(|(i, _)| !right_dup[*i])
        .map(|(i, res)| (res.entity.canonical_name.as_str(), i))
        .collect();

    let mut matched = Vec::new();
    let mut left_matched = vec![false; left.len()];
    let mut right_matched = vec![false; right.len()];

    for (name, &li) in &left_by_name {
        if let Some(&ri) = right_by_name.get(name) {
            left_matched[li] = true;
            right_matched[ri] = true;
            let comparisons = compare_attributes(&left[li], &right[ri], tolerance);
            let within_tolerance = all_within(&comparisons);
            matched.push(MatchedPair {
                left: left[li].clone(),
                right: right[ri].clone(),
                identity: left_ids[li].entity.clone(),
                comparisons,
                within_tolerance,
            });
        }
    }

    let unmatched_left = collect_residues(left, &left_ids, &left_dup, &left_matched);
    let unmatched_right = collect_residues(right, &right_ids, &right_dup, &right_matched);

    PairOutcome { matched, unmatched_left, unmatched_right, diagnostics }
}

fn resolve_side(
    records: &[StatRecord],
    side: Side,
    resolver: &NameResolver,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Resolution> {
    records
        .iter()
        .map(|record| {
            let res = resolver.resolve(&record.name);
            match res.method {
                MatchMethod::FallbackEmpty => diagnostics.push(Diagnostic::EmptyName { side }),
                MatchMethod::FallbackNoMatch => diagnostics.push(Diagnostic::UnresolvedName {
                    side,
                    raw: record.name.clone(),
                }),
                _ if res.is_ambiguous() => diagnostics.push(Diagnostic::AmbiguousResolution {
                    side,
                    raw: record.name.clone(),
                    resolved_to: res.entity.canonical_name.clone(),
                    also_matched: res.ambiguous_with.clone(),
                }),
                _ => {}
            }
            res
        })
        .collect()
}

/// Mark every record whose canonical identity appears more than once on its
/// side. Returns a per-record flag vector.
fn flag_duplicates(
    records: &[StatRecord],
    resolutions: &[Resolution],
    side: Side,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<bool> {
    let mut by_name: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, res) in resolutions.iter().enumerate() {
        by_name.entry(res.entity.canonical_name.as_str()).or_default().push(i);
    }

    let mut flagged = vec![false; records.len()];
    for (canonical_name, indices) in by_name {
        if indices.len() > 1 {
            for &i in &indices {
                flagged[i] = true;
            }
            diagnostics.push(Diagnostic::DuplicateIdentity {
                side,
                canonical_name: canonical_name.to_string(),
                records: indices.iter().map(|&i| records[i].name.clone()).collect(),
            });
        }
    }
    flagged
}

fn collect_residues(
    records: &[StatRecord],
    resolutions: &[Resolution],
    duplicates: &[bool],
    matched: &[bool],
) -> Vec<Residue> {
    records
        .iter()
        .enumerate()
        .filter(|(i, _)| !matched[*i])
        .map(|(i, record)| {
            let (reason, detail) = if duplicates[i] {
                (
                    ResidueReason::DuplicateIdentity,
                    Some(format!("resolves to '{}'", resolutions[i].entity.canonical_name)),
                )
            } else {
                (ResidueReason::NoCounterpart, None)
            };
            Residue { record: record.clone(), reason, detail }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
