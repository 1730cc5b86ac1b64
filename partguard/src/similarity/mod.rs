//! Similarity Kernel
//!
//! Symmetric, bounded similarity scores between MPN strings, used to rank
//! near-duplicate parts and suggest alternates when exact handler rules
//! are not enough. Every function here is pure.
//!
//! Each algorithm is a standalone function, and the [`Similarity`] trait
//! wraps them so a ranking routine can take any metric.

pub mod composite;
pub mod levenshtein;
pub mod numeric;
pub mod substitution;

pub use composite::{
    composite_similarity, decompose, weighted_composite_similarity, MpnParts, SimilarityWeights,
    WeightsError, MAX_DISTINCT_SCORE, MAX_SINGLE_CHAR_SCORE, MISSING_SUFFIX_CREDIT,
};
pub use levenshtein::{
    case_insensitive_similarity, edit_distance, levenshtein_distance, levenshtein_similarity,
    prefix_similarity, weighted_length_similarity,
};
pub use numeric::{numeric_similarity, parse_number};
pub use substitution::{substitution_similarity, SubstitutionTable, SUBSTITUTION_SCORE};

/// A similarity metric.
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Score possibly-missing inputs; a missing side scores 0.0
    fn similarity_opt(&self, a: Option<&str>, b: Option<&str>) -> f64 {
        match (a, b) {
            (Some(a), Some(b)) => self.similarity(a, b),
            _ => 0.0,
        }
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

/// Normalized Levenshtein similarity
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl Similarity for Levenshtein {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        levenshtein_similarity(a, b)
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Wrapper that upper-cases both inputs before delegating
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitive<T>(pub T);

impl<T: Similarity> Similarity for CaseInsensitive<T> {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self.0.similarity(&a.to_uppercase(), &b.to_uppercase())
    }

    fn name(&self) -> &'static str {
        self.0.name()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NumericSimilarity;

impl Similarity for NumericSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        numeric_similarity(a, b)
    }

    fn name(&self) -> &'static str {
        "numeric"
    }
}

/// Levenshtein with a length-difference penalty
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedLength {
    pub weight: f64,
}

impl Similarity for WeightedLength {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        weighted_length_similarity(a, b, self.weight)
    }

    fn name(&self) -> &'static str {
        "weighted_length"
    }
}

/// Levenshtein over the first `len` chars
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixSimilarity {
    pub len: usize,
}

impl Similarity for PrefixSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        prefix_similarity(a, b, self.len)
    }

    fn name(&self) -> &'static str {
        "prefix"
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubstitutionAware {
    pub table: SubstitutionTable,
}

impl Similarity for SubstitutionAware {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        substitution_similarity(a, b, &self.table)
    }

    fn name(&self) -> &'static str {
        "substitution"
    }
}

/// Decomposition-weighted MPN comparator
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeSimilarity {
    pub weights: SimilarityWeights,
}

impl Similarity for CompositeSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        weighted_composite_similarity(a, b, &self.weights)
    }

    fn name(&self) -> &'static str {
        "composite"
    }
}

/// Rank `candidates` against `query`, best first. Ties keep input order.
pub fn rank<'a, S, I>(metric: &S, query: &str, candidates: I) -> Vec<(&'a str, f64)>
where
    S: Similarity + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    let mut scored: Vec<(&'a str, f64)> = candidates
        .into_iter()
        .map(|c| (c, metric.similarity(query, c)))
        .collect();
    scored.sort_by(|x, y| y.1.total_cmp(&x.1));
    scored
}
