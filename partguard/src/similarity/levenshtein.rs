//! Edit distance and the string similarity variants built on it.

/// Classic Levenshtein distance (insert, delete, substitute; unit costs),
/// computed over chars with two DP rows.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Edit distance over possibly-missing inputs; `None` means undefined
pub fn edit_distance(a: Option<&str>, b: Option<&str>) -> Option<usize> {
    Some(levenshtein_distance(a?, b?))
}

/// `1 - distance / max(len)`, clamped to [0, 1].
///
/// Equal strings (both empty included) score 1.0; empty against non-empty
/// scores 0.0.
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let max_len = a.chars().count().max(b.chars().count());
    let distance = levenshtein_distance(a, b);
    clamp_unit(1.0 - distance as f64 / max_len as f64)
}

/// Plain similarity after folding both inputs to upper case
pub fn case_insensitive_similarity(a: &str, b: &str) -> f64 {
    levenshtein_similarity(&a.to_uppercase(), &b.to_uppercase())
}

/// Plain similarity minus `weight * relative length difference`.
/// `weight` is clamped to [0, 1]; zero gives the plain formula.
pub fn weighted_length_similarity(a: &str, b: &str, weight: f64) -> f64 {
    let base = levenshtein_similarity(a, b);
    if a.is_empty() || b.is_empty() {
        return base;
    }
    let weight = if weight.is_nan() { 0.0 } else { weight.clamp(0.0, 1.0) };
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let relative_diff = len_a.abs_diff(len_b) as f64 / len_a.max(len_b) as f64;
    clamp_unit(base - weight * relative_diff)
}

/// Plain similarity of the first `len` chars of each input.
///
/// The suffix past `len` is ignored, so "LM358N" and "LM358DR" agree on a
/// five-char family code. `len == 0` compares the full strings.
pub fn prefix_similarity(a: &str, b: &str, len: usize) -> f64 {
    if a.is_empty() || b.is_empty() {
        return levenshtein_similarity(a, b);
    }
    if len == 0 {
        return levenshtein_similarity(a, b);
    }
    let head_a: String = a.chars().take(len).collect();
    let head_b: String = b.chars().take(len).collect();
    levenshtein_similarity(&head_a, &head_b)
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
