use std::collections::BTreeMap;
use std::fmt;

use courtsync_roster::CanonicalEntity;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single stat row extracted from one page source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRecord {
    /// Raw name as scraped: full name, abbreviation, alias, or partial.
    pub name: String,
    /// Attribute → numeric value. A cell that failed to parse upstream is
    /// absent here, never zero.
    pub attributes: BTreeMap<String, f64>,
}

impl StatRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attributes: BTreeMap::new() }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(attribute.into(), value);
        self
    }
}

/// A row the extraction step could not turn into a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    /// 1-based data row number within the source CSV.
    pub row: usize,
    pub message: String,
}

/// Pre-loaded records for both sides of a reconciliation pass.
pub struct ReconInput {
    pub left: crate::loader::LoadedRecords,
    pub right: crate::loader::LoadedRecords,
}

/// Which input a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOutcome {
    WithinTolerance,
    OutOfTolerance,
    /// The attribute is absent on one side: recorded, not a mismatch.
    NotApplicable,
}

impl fmt::Display for ComparisonOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WithinTolerance => write!(f, "within_tolerance"),
            Self::OutOfTolerance => write!(f, "out_of_tolerance"),
            Self::NotApplicable => write!(f, "not_applicable"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttributeComparison {
    pub attribute: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    /// Signed left − right, present only when both sides have the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
    pub epsilon: f64,
    pub outcome: ComparisonOutcome,
}

// ---------------------------------------------------------------------------
// Pairing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct MatchedPair {
    pub left: StatRecord,
    pub right: StatRecord,
    pub identity: CanonicalEntity,
    pub comparisons: Vec<AttributeComparison>,
    /// True iff no comparison came out `out_of_tolerance`.
    pub within_tolerance: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidueReason {
    NoCounterpart,
    DuplicateIdentity,
    ParseFailure,
}

impl fmt::Display for ResidueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCounterpart => write!(f, "no_counterpart"),
            Self::DuplicateIdentity => write!(f, "duplicate_identity"),
            Self::ParseFailure => write!(f, "parse_failure"),
        }
    }
}

/// A record that could not be matched to a counterpart.
#[derive(Debug, Clone, Serialize)]
pub struct Residue {
    pub record: StatRecord,
    pub reason: ResidueReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Raw output of one pairing pass, before summary and meta are attached.
#[derive(Debug)]
pub struct PairOutcome {
    pub matched: Vec<MatchedPair>,
    pub unmatched_left: Vec<Residue>,
    pub unmatched_right: Vec<Residue>,
    pub diagnostics: Vec<Diagnostic>,
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The substring scan hit more than one table entry; the first won.
    AmbiguousResolution {
        side: Side,
        raw: String,
        resolved_to: String,
        also_matched: Vec<String>,
    },
    /// Two raw names on one side resolved to the same canonical identity.
    DuplicateIdentity {
        side: Side,
        canonical_name: String,
        records: Vec<String>,
    },
    /// Resolution exhausted the waterfall and fell back to the raw name.
    UnresolvedName { side: Side, raw: String },
    /// A blank name reached resolution, a caller error upstream.
    EmptyName { side: Side },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousResolution { side, raw, resolved_to, also_matched } => write!(
                f,
                "{side}: '{raw}' ambiguously resolved to '{resolved_to}' (also matched: {})",
                also_matched.join(", ")
            ),
            Self::DuplicateIdentity { side, canonical_name, records } => write!(
                f,
                "{side}: records [{}] all resolve to '{canonical_name}'",
                records.join(", ")
            ),
            Self::UnresolvedName { side, raw } => {
                write!(f, "{side}: no identity found for '{raw}'")
            }
            Self::EmptyName { side } => write!(f, "{side}: blank name in input"),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub left_records: usize,
    pub right_records: usize,
    pub matched: usize,
    pub pairs_within_tolerance: usize,
    /// Attribute-level out-of-tolerance count across all matched pairs.
    pub attribute_mismatches: usize,
    /// Attribute-level comparisons skipped because one side was absent.
    pub not_applicable: usize,
    pub unmatched_left: usize,
    pub unmatched_right: usize,
    pub residue_reasons: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub matched: Vec<MatchedPair>,
    pub unmatched_left: Vec<Residue>,
    pub unmatched_right: Vec<Residue>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ReconResult {
    /// Fully reconciled: every record matched and every comparison held.
    pub fn is_reconciled(&self) -> bool {
        self.summary.unmatched_left == 0
            && self.summary.unmatched_right == 0
            && self.summary.attribute_mismatches == 0
    }
}
