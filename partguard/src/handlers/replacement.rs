//! Replacement Resolver
//!
//! Decides whether a candidate MPN is an official replacement for an
//! original one. The decision is a conjunctive chain:
//!
//! 1. the series must be compatible (exact by default, or permitted by a
//!    named [`GenerationRule`]);
//! 2. every load-bearing attribute must match exactly;
//! 3. packaging-only attributes are never consulted.
//!
//! Fuzzy similarity takes part only when the handler opts in through
//! `similarity_floor`.

use super::ManufacturerHandler;
use crate::registry::normalize_mpn;
use crate::similarity::composite_similarity;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Electrically significant attribute extracted from an MPN
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    pub value: String,
}

impl Attribute {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Directional "newer generation may replace older generation" rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRule {
    /// Name used in logs, e.g. "ACS712 to ACS723"
    pub name: &'static str,
    pub older: &'static str,
    pub newer: &'static str,
}

impl GenerationRule {
    /// True when `candidate` is the newer series standing in for the older
    pub fn permits(&self, original_series: &str, candidate_series: &str) -> bool {
        original_series == self.older && candidate_series == self.newer
    }
}

/// Exact series equality, extended by the given generation rules
pub fn series_compatible_with(
    original_series: &str,
    candidate_series: &str,
    rules: &[GenerationRule],
) -> bool {
    if original_series.is_empty() || candidate_series.is_empty() {
        return false;
    }
    if original_series == candidate_series {
        return true;
    }
    match rules
        .iter()
        .find(|r| r.permits(original_series, candidate_series))
    {
        Some(rule) => {
            tracing::debug!(
                "Generation rule '{}' accepts {} -> {}",
                rule.name,
                original_series,
                candidate_series
            );
            true
        }
        None => false,
    }
}

/// Outcome of the replacement chain, with the reason for a refusal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ReplacementVerdict {
    Accepted,
    EmptyInput,
    /// No handler recognizes the part
    UnknownPart {
        mpn: String,
    },
    /// The parts belong to different manufacturers
    ManufacturerMismatch {
        original: &'static str,
        candidate: &'static str,
    },
    SeriesMismatch {
        original: String,
        candidate: String,
    },
    AttributeMismatch {
        attribute: &'static str,
        original: Option<String>,
        candidate: Option<String>,
    },
    BelowSimilarityFloor {
        score: f64,
        floor: f64,
    },
}

impl ReplacementVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ReplacementVerdict::Accepted)
    }
}

impl fmt::Display for ReplacementVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplacementVerdict::Accepted => write!(f, "accepted"),
            ReplacementVerdict::EmptyInput => write!(f, "empty part number"),
            ReplacementVerdict::UnknownPart { mpn } => write!(f, "no handler recognizes '{}'", mpn),
            ReplacementVerdict::ManufacturerMismatch { original, candidate } => {
                write!(f, "{} part cannot be replaced by a {} part", original, candidate)
            }
            ReplacementVerdict::SeriesMismatch { original, candidate } => {
                write!(f, "series '{}' cannot be replaced by '{}'", original, candidate)
            }
            ReplacementVerdict::AttributeMismatch {
                attribute,
                original,
                candidate,
            } => write!(
                f,
                "{} differs: {} vs {}",
                attribute,
                original.as_deref().unwrap_or("-"),
                candidate.as_deref().unwrap_or("-")
            ),
            ReplacementVerdict::BelowSimilarityFloor { score, floor } => {
                write!(f, "similarity {:.3} below floor {:.3}", score, floor)
            }
        }
    }
}

/// Run the replacement chain for `candidate` standing in for `original`
pub fn resolve_replacement<H>(handler: &H, original: &str, candidate: &str) -> ReplacementVerdict
where
    H: ManufacturerHandler + ?Sized,
{
    let original = normalize_mpn(original);
    let candidate = normalize_mpn(candidate);
    if original.is_empty() || candidate.is_empty() {
        return ReplacementVerdict::EmptyInput;
    }

    let verdict = check_chain(handler, &original, &candidate);
    tracing::debug!(
        "{}: {} -> {}: {}",
        handler.manufacturer(),
        original,
        candidate,
        verdict
    );
    verdict
}

fn check_chain<H>(handler: &H, original: &str, candidate: &str) -> ReplacementVerdict
where
    H: ManufacturerHandler + ?Sized,
{
    let original_series = handler.extract_series(original);
    let candidate_series = handler.extract_series(candidate);
    if !handler.series_compatible(&original_series, &candidate_series) {
        return ReplacementVerdict::SeriesMismatch {
            original: original_series,
            candidate: candidate_series,
        };
    }

    let original_attrs = handler.load_bearing_attributes(original);
    let candidate_attrs = handler.load_bearing_attributes(candidate);
    let names: BTreeSet<&'static str> = original_attrs
        .iter()
        .chain(candidate_attrs.iter())
        .map(|a| a.name)
        .collect();
    for name in names {
        let lookup = |attrs: &[Attribute]| {
            attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.clone())
        };
        let original_value = lookup(original_attrs.as_slice());
        let candidate_value = lookup(candidate_attrs.as_slice());
        if original_value != candidate_value {
            return ReplacementVerdict::AttributeMismatch {
                attribute: name,
                original: original_value,
                candidate: candidate_value,
            };
        }
    }

    if let Some(floor) = handler.similarity_floor() {
        let score = composite_similarity(original, candidate);
        if score < floor {
            return ReplacementVerdict::BelowSimilarityFloor { score, floor };
        }
    }

    ReplacementVerdict::Accepted
}
