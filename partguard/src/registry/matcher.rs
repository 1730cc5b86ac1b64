//! Matchers
//!
//! A matcher is a stateless predicate over a normalized MPN (trimmed and
//! upper-cased before it reaches the matcher).

use regex::Regex;
use std::fmt;

/// Predicate bound to one component type once registered
pub trait Matcher: Send + Sync {
    /// Test a normalized MPN
    fn accepts(&self, normalized: &str) -> bool;

    /// Short description for logs and debugging
    fn describe(&self) -> String;
}

impl fmt::Debug for dyn Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matcher({})", self.describe())
    }
}

/// Regex matcher. The pattern is used as written; anchor it with `^` to
/// match from the start of the MPN.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Matcher for PatternMatcher {
    fn accepts(&self, normalized: &str) -> bool {
        self.regex.is_match(normalized)
    }

    fn describe(&self) -> String {
        format!("pattern /{}/", self.regex.as_str())
    }
}

/// Literal prefix matcher
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    prefixes: Vec<String>,
}

impl PrefixMatcher {
    /// Prefixes are upper-cased to line up with normalized input
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(|p| p.as_ref().trim().to_uppercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl Matcher for PrefixMatcher {
    fn accepts(&self, normalized: &str) -> bool {
        self.prefixes.iter().any(|p| normalized.starts_with(p.as_str()))
    }

    fn describe(&self) -> String {
        format!("prefix [{}]", self.prefixes.join(", "))
    }
}

/// Closure matcher for rules that do not fit a regex
pub struct FnMatcher<F> {
    name: &'static str,
    predicate: F,
}

impl<F> FnMatcher<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    pub fn new(name: &'static str, predicate: F) -> Self {
        Self { name, predicate }
    }
}

impl<F> Matcher for FnMatcher<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn accepts(&self, normalized: &str) -> bool {
        (self.predicate)(normalized)
    }

    fn describe(&self) -> String {
        format!("fn {}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matcher() {
        let m = PatternMatcher::new(r"^LM(358|324)").unwrap();
        assert!(m.accepts("LM358N"));
        assert!(m.accepts("LM324DR"));
        assert!(!m.accepts("XLM358"));
        assert_eq!(m.pattern(), r"^LM(358|324)");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PatternMatcher::new(r"^LM(358").is_err());
    }

    #[test]
    fn test_prefix_matcher_normalizes_prefixes() {
        let m = PrefixMatcher::new(["stm32", " L78 ", ""]);
        assert!(m.accepts("STM32F411CEU6"));
        assert!(m.accepts("L7805CV"));
        assert!(!m.accepts("AMS1117"));
        assert!(!m.is_empty());
        assert_eq!(m.describe(), "prefix [STM32, L78]");
    }

    #[test]
    fn test_fn_matcher() {
        let m = FnMatcher::new("all digits", |s: &str| s.chars().all(|c| c.is_ascii_digit()));
        assert!(m.accepts("1234"));
        assert!(!m.accepts("12A4"));
        assert_eq!(m.describe(), "fn all digits");
    }
}
