//! Substitution-aware similarity
//!
//! Some prefix notations are known to be interchangeable: the JIS
//! transistor prefix "2SC" is routinely printed as a bare "C" (2SC1815 and
//! C1815 are the same part). A substitution table records such fragment
//! pairs. Two MPNs carrying the two fragments of a pair score
//! `SUBSTITUTION_SCORE` instead of paying the edit distance of the prefix.
//!
//! [`SubstitutionTable::relates`] is the stricter test: the remainders after
//! the fragments must also be equal, so only two spellings of one part
//! qualify.

use super::levenshtein::levenshtein_similarity;
use serde::{Deserialize, Serialize};

/// Score returned for a pair related by a table entry
pub const SUBSTITUTION_SCORE: f64 = 0.95;

/// Interchangeable prefix fragments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTable")]
pub struct SubstitutionTable {
    pairs: Vec<(String, String)>,
}

/// Deserialized form; every pair goes through `insert`
#[derive(Deserialize)]
struct RawTable {
    #[serde(default)]
    pairs: Vec<(String, String)>,
}

impl From<RawTable> for SubstitutionTable {
    fn from(raw: RawTable) -> Self {
        let mut table = SubstitutionTable::new();
        for (a, b) in &raw.pairs {
            table.insert(a, b);
        }
        table
    }
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Legacy transistor and regulator notations
    pub fn builtin() -> Self {
        Self::new()
            .with_pair("2SA", "A")
            .with_pair("2SB", "B")
            .with_pair("2SC", "C")
            .with_pair("2SD", "D")
            .with_pair("2SK", "K")
            .with_pair("MC78", "LM78")
            .with_pair("UA78", "LM78")
            .with_pair("KA78", "LM78")
    }

    /// Add an equivalence; fragments are upper-cased and the pair is
    /// symmetric.
    pub fn with_pair(mut self, a: &str, b: &str) -> Self {
        self.insert(a, b);
        self
    }

    pub fn insert(&mut self, a: &str, b: &str) {
        let a = a.trim().to_uppercase();
        let b = b.trim().to_uppercase();
        if a.is_empty() || b.is_empty() || a == b {
            return;
        }
        self.pairs.push((a, b));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// True when one fragment of a pair prefixes `a` and its partner
    /// prefixes `b`
    pub fn applies(&self, a: &str, b: &str) -> bool {
        self.any_pair(a, b, |_, _| true)
    }

    /// True when `a` and `b` differ only by a table fragment at the front
    pub fn relates(&self, a: &str, b: &str) -> bool {
        self.any_pair(a, b, |rest_a, rest_b| !rest_a.is_empty() && rest_a == rest_b)
    }

    fn any_pair<F>(&self, a: &str, b: &str, remainders_ok: F) -> bool
    where
        F: Fn(&str, &str) -> bool,
    {
        let a = a.trim().to_uppercase();
        let b = b.trim().to_uppercase();
        if a.is_empty() || b.is_empty() {
            return false;
        }
        let split = |prefix_a: &str, prefix_b: &str| {
            match (a.strip_prefix(prefix_a), b.strip_prefix(prefix_b)) {
                (Some(rest_a), Some(rest_b)) => remainders_ok(rest_a, rest_b),
                _ => false,
            }
        };
        self.pairs
            .iter()
            .any(|(x, y)| split(x.as_str(), y.as_str()) || split(y.as_str(), x.as_str()))
    }
}

/// `SUBSTITUTION_SCORE` when a table pair prefixes the two inputs,
/// otherwise the plain similarity. Identical inputs still score 1.0.
pub fn substitution_similarity(a: &str, b: &str, table: &SubstitutionTable) -> f64 {
    if a == b {
        return levenshtein_similarity(a, b);
    }
    if table.applies(a, b) {
        return SUBSTITUTION_SCORE;
    }
    levenshtein_similarity(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jis_prefix() {
        let table = SubstitutionTable::builtin();
        assert_eq!(substitution_similarity("2SC1815", "C1815", &table), SUBSTITUTION_SCORE);
        assert_eq!(substitution_similarity("C1815", "2SC1815", &table), SUBSTITUTION_SCORE);
        assert_eq!(substitution_similarity("2sc1815", "c1815", &table), SUBSTITUTION_SCORE);
    }

    #[test]
    fn test_fragment_pair_scores_regardless_of_remainder() {
        let table = SubstitutionTable::builtin();
        assert_eq!(substitution_similarity("2SC1815", "C945", &table), SUBSTITUTION_SCORE);
        assert_eq!(substitution_similarity("MC7805", "LM7812", &table), SUBSTITUTION_SCORE);
        assert!(table.applies("C945", "2SC1815"));
        // No fragment on one side
        assert_eq!(
            substitution_similarity("2SC1815", "BC547", &table),
            levenshtein_similarity("2SC1815", "BC547")
        );
    }

    #[test]
    fn test_relates_requires_equal_remainder() {
        let table = SubstitutionTable::builtin();
        assert!(table.relates("2SC1815", "C1815"));
        assert!(!table.relates("2SC1815", "C945"));
        assert!(!table.relates("MC7805", "LM7812"));
        // A fragment alone is not a part number
        assert!(!table.relates("2SC", "C"));
    }

    #[test]
    fn test_identical_and_empty() {
        let table = SubstitutionTable::builtin();
        assert_eq!(substitution_similarity("MC7805", "MC7805", &table), 1.0);
        assert_eq!(substitution_similarity("", "C1815", &table), 0.0);
    }

    #[test]
    fn test_regulator_second_sources() {
        let table = SubstitutionTable::builtin();
        assert_eq!(substitution_similarity("MC7805", "LM7805", &table), SUBSTITUTION_SCORE);
        assert_eq!(substitution_similarity("UA7805", "LM7805", &table), SUBSTITUTION_SCORE);
    }

    #[test]
    fn test_insert_ignores_degenerate_pairs() {
        let mut table = SubstitutionTable::new();
        table.insert("", "C");
        table.insert("LM", "lm");
        assert!(table.is_empty());
        table.insert("2sc", "c");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_deserialize_normalizes_pairs() {
        let table: SubstitutionTable =
            serde_json::from_str(r#"{"pairs": [["mc78", " lm78 "], ["", "C"], ["ua78", "UA78"]]}"#)
                .unwrap();
        assert_eq!(table, SubstitutionTable::new().with_pair("MC78", "LM78"));
        assert!(table.relates("mc7805", "LM7805"));
        // An empty fragment would otherwise prefix everything
        assert!(!table.applies("LM358", "TL072"));

        let empty: SubstitutionTable = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
