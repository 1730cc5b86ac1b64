//! Numeric similarity
//!
//! Part families keep their electrical identity in the digits
//! (LM358 / LM359 / LM7805), so digit runs are compared by magnitude rather
//! than by edit distance.

use super::levenshtein::{clamp_unit, levenshtein_similarity};

/// Parse a string that is entirely a finite number
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `1 - |a - b| / max(|a|, |b|, 1)` when both inputs are numbers,
/// otherwise the plain string similarity.
pub fn numeric_similarity(a: &str, b: &str) -> f64 {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => {
            let scale = x.abs().max(y.abs()).max(1.0);
            clamp_unit(1.0 - (x - y).abs() / scale)
        }
        _ => levenshtein_similarity(a, b),
    }
}
