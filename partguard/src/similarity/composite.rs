//! Decomposition-weighted MPN similarity
//!
//! An MPN is split into three contiguous segments:
//!
//! ```text
//!   LM  7805  CT
//!   ──  ────  ──
//!   │    │     └── suffix   (package, grade, reel options)
//!   │    └──────── numeric  (family / electrical identity)
//!   └───────────── prefix   (manufacturer or product line)
//! ```
//!
//! Each segment is scored on its own and the scores are blended with
//! [`SimilarityWeights`] (0.3 / 0.5 / 0.2 by default).

use super::levenshtein::{clamp_unit, levenshtein_similarity};
use super::numeric::numeric_similarity;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Credit for a suffix present on one side only
pub const MISSING_SUFFIX_CREDIT: f64 = 0.5;

/// Upper bound for two inputs that are not identical
pub const MAX_DISTINCT_SCORE: f64 = 0.99;

/// Upper bound for two distinct single-character inputs
pub const MAX_SINGLE_CHAR_SCORE: f64 = 0.5;

/// Segments of an MPN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MpnParts<'a> {
    /// Leading alphabetic run
    pub prefix: &'a str,
    /// Digit run immediately after the prefix
    pub numeric: &'a str,
    /// Everything after the digit run
    pub suffix: &'a str,
}

/// Split an MPN into prefix, numeric run and suffix
pub fn decompose(mpn: &str) -> MpnParts<'_> {
    let prefix_end = mpn
        .char_indices()
        .find(|(_, c)| !c.is_alphabetic())
        .map(|(i, _)| i)
        .unwrap_or(mpn.len());
    let rest = &mpn[prefix_end..];
    let numeric_len = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());

    MpnParts {
        prefix: &mpn[..prefix_end],
        numeric: &rest[..numeric_len],
        suffix: &rest[numeric_len..],
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum WeightsError {
    #[error("Weight '{name}' must be within [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("Segment weights must sum to 1.0, got {0}")]
    BadSum(f64),
}

/// Blend of the three segment scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityWeights {
    pub prefix: f64,
    pub numeric: f64,
    pub suffix: f64,
    /// Credit when exactly one side has a suffix
    pub missing_suffix_credit: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            prefix: 0.3,
            numeric: 0.5,
            suffix: 0.2,
            missing_suffix_credit: MISSING_SUFFIX_CREDIT,
        }
    }
}

impl SimilarityWeights {
    pub fn validate(&self) -> Result<(), WeightsError> {
        for (name, value) in [
            ("prefix", self.prefix),
            ("numeric", self.numeric),
            ("suffix", self.suffix),
            ("missing_suffix_credit", self.missing_suffix_credit),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(WeightsError::OutOfRange { name, value });
            }
        }
        let sum = self.prefix + self.numeric + self.suffix;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(WeightsError::BadSum(sum));
        }
        Ok(())
    }
}

/// Composite score with the default weights
pub fn composite_similarity(a: &str, b: &str) -> f64 {
    weighted_composite_similarity(a, b, &SimilarityWeights::default())
}

/// Composite score with explicit weights.
///
/// Identical inputs score exactly 1.0 and an empty input on either side
/// scores exactly 0.0. Distinct inputs are capped at
/// [`MAX_DISTINCT_SCORE`], so equal digit values written differently
/// ("LM0358" / "LM358") never look identical. Two distinct single
/// characters are capped at [`MAX_SINGLE_CHAR_SCORE`].
///
/// A prefix missing on either side earns no credit, like a missing
/// numeric run.
pub fn weighted_composite_similarity(a: &str, b: &str, weights: &SimilarityWeights) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let pa = decompose(a);
    let pb = decompose(b);

    let prefix = if pa.prefix.is_empty() || pb.prefix.is_empty() {
        0.0
    } else {
        levenshtein_similarity(pa.prefix, pb.prefix)
    };

    let numeric = if pa.numeric.is_empty() || pb.numeric.is_empty() {
        0.0
    } else {
        numeric_similarity(pa.numeric, pb.numeric)
    };

    let suffix = match (pa.suffix.is_empty(), pb.suffix.is_empty()) {
        (true, true) => 1.0,
        (false, false) => levenshtein_similarity(pa.suffix, pb.suffix),
        _ => weights.missing_suffix_credit,
    };

    let score = weights.prefix * prefix + weights.numeric * numeric + weights.suffix * suffix;
    let cap = if a.chars().count() == 1 && b.chars().count() == 1 {
        MAX_SINGLE_CHAR_SCORE
    } else {
        MAX_DISTINCT_SCORE
    };
    clamp_unit(score).min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose() {
        assert_eq!(
            decompose("LM358N"),
            MpnParts { prefix: "LM", numeric: "358", suffix: "N" }
        );
        assert_eq!(
            decompose("ACS712ELCTR-05B-T"),
            MpnParts { prefix: "ACS", numeric: "712", suffix: "ELCTR-05B-T" }
        );
        assert_eq!(decompose("7805"), MpnParts { prefix: "", numeric: "7805", suffix: "" });
        assert_eq!(decompose("ABC"), MpnParts { prefix: "ABC", numeric: "", suffix: "" });
        assert_eq!(decompose("2N3904"), MpnParts { prefix: "", numeric: "2", suffix: "N3904" });
        assert_eq!(decompose(""), MpnParts { prefix: "", numeric: "", suffix: "" });
    }

    #[test]
    fn test_decompose_multibyte() {
        let parts = decompose("µA741CN");
        assert_eq!(parts.prefix, "µA");
        assert_eq!(parts.numeric, "741");
        assert_eq!(parts.suffix, "CN");
    }

    #[test]
    fn test_segment_blend() {
        // prefix 1.0, numeric 1.0, suffix present on one side only
        let s = composite_similarity("LM358", "LM358N");
        assert!((s - 0.9).abs() < 1e-12);
        // prefix 0.0, numeric 0.0, both suffixes empty
        let s = composite_similarity("A", "B");
        assert!((s - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_single_characters_stay_low() {
        for (a, b) in [("1", "2"), ("7", "8"), ("8", "9"), ("A", "B"), ("A", "1")] {
            let s = composite_similarity(a, b);
            assert!(s <= MAX_SINGLE_CHAR_SCORE, "{} / {}: {}", a, b, s);
        }
        assert_eq!(composite_similarity("7", "7"), 1.0);
    }

    #[test]
    fn test_missing_prefix_earns_nothing() {
        // numeric 1 - 1/13, suffixes both empty
        let s = composite_similarity("12", "13");
        assert!((s - (0.5 * (1.0 - 1.0 / 13.0) + 0.2)).abs() < 1e-12);
        assert!(composite_similarity("12", "13") < composite_similarity("LM12", "LM13"));
    }

    #[test]
    fn test_distinct_inputs_never_reach_one() {
        assert!(composite_similarity("LM0358", "LM358") < 1.0);
        assert!(composite_similarity("lm358", "LM358") < 1.0);
        assert_eq!(composite_similarity("LM0358", "LM0358"), 1.0);
    }

    #[test]
    fn test_weights_validation() {
        assert!(SimilarityWeights::default().validate().is_ok());
        let bad_sum = SimilarityWeights { prefix: 0.5, ..Default::default() };
        assert!(matches!(bad_sum.validate(), Err(WeightsError::BadSum(_))));
        let out_of_range = SimilarityWeights {
            prefix: -0.2,
            numeric: 1.0,
            suffix: 0.2,
            missing_suffix_credit: 0.5,
        };
        assert_eq!(
            out_of_range.validate(),
            Err(WeightsError::OutOfRange { name: "prefix", value: -0.2 })
        );
    }

    #[test]
    fn test_custom_weights() {
        let digits_only = SimilarityWeights {
            prefix: 0.0,
            numeric: 1.0,
            suffix: 0.0,
            missing_suffix_credit: 0.0,
        };
        let s = weighted_composite_similarity("LM358", "TS358", &digits_only);
        assert_eq!(s, MAX_DISTINCT_SCORE);
        let s = weighted_composite_similarity("LM358", "LM7805", &digits_only);
        assert!(s < 0.1);
    }
}
