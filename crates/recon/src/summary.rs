use std::collections::BTreeMap;

use crate::model::{ComparisonOutcome, MatchedPair, ReconSummary, Residue};

/// Compute summary statistics from one pairing pass.
pub fn compute_summary(
    matched: &[MatchedPair],
    unmatched_left: &[Residue],
    unmatched_right: &[Residue],
) -> ReconSummary {
    let mut attribute_mismatches = 0;
    let mut not_applicable = 0;
    let mut pairs_within_tolerance = 0;

    for pair in matched {
        if pair.within_tolerance {
            pairs_within_tolerance += 1;
        }
        for comparison in &pair.comparisons {
            match comparison.outcome {
                ComparisonOutcome::OutOfTolerance => attribute_mismatches += 1,
                ComparisonOutcome::NotApplicable => not_applicable += 1,
                ComparisonOutcome::WithinTolerance => {}
            }
        }
    }

    let mut residue_reasons: BTreeMap<String, usize> = BTreeMap::new();
    for residue in unmatched_left.iter().chain(unmatched_right) {
        *residue_reasons.entry(residue.reason.to_string()).or_insert(0) += 1;
    }

    ReconSummary {
        left_records: matched.len() + unmatched_left.len(),
        right_records: matched.len() + unmatched_right.len(),
        matched: matched.len(),
        pairs_within_tolerance,
        attribute_mismatches,
        not_applicable,
        unmatched_left: unmatched_left.len(),
        unmatched_right: unmatched_right.len(),
        residue_reasons,
    }
}
