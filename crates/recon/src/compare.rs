use std::collections::BTreeSet;

use crate::config::ToleranceConfig;
use crate::model::{AttributeComparison, ComparisonOutcome, StatRecord};

/// Compare every attribute present on either record.
///
/// Both sides present: signed delta, within tolerance iff `|delta| < ε`
/// (strict, so a delta exactly equal to ε is out). One side absent:
/// recorded as not applicable, never as a mismatch.
pub fn compare_attributes(
    left: &StatRecord,
    right: &StatRecord,
    tolerance: &ToleranceConfig,
) -> Vec<AttributeComparison> {
    let attributes: BTreeSet<&String> =
        left.attributes.keys().chain(right.attributes.keys()).collect();

    attributes
        .into_iter()
        .map(|attribute| {
            let l = left.attributes.get(attribute).copied();
            let r = right.attributes.get(attribute).copied();
            let epsilon = tolerance.epsilon_for(attribute);

            let (delta, outcome) = match (l, r) {
                (Some(l), Some(r)) => {
                    let delta = l - r;
                    let outcome = if delta.abs() < epsilon {
                        ComparisonOutcome::WithinTolerance
                    } else {
                        ComparisonOutcome::OutOfTolerance
                    };
                    (Some(delta), outcome)
                }
                _ => (None, ComparisonOutcome::NotApplicable),
            };

            AttributeComparison {
                attribute: attribute.clone(),
                left: l,
                right: r,
                delta,
                epsilon,
                outcome,
            }
        })
        .collect()
}

/// True iff no comparison came out `out_of_tolerance`.
pub fn all_within(comparisons: &[AttributeComparison]) -> bool {
    !comparisons.iter().any(|c| c.outcome == ComparisonOutcome::OutOfTolerance)
}
