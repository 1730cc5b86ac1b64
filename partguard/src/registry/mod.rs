//! Pattern Registry
//!
//! Type-indexed collection of matchers and the sole authority for
//! "does MPN X match component type T".
//!
//! Every type owns an ordered list of independent matchers. Several
//! manufacturers usually contribute matchers for the same generic type
//! (`Ic`, `OpAmp`, ...), so a query must try every matcher in the list and
//! accept on the first one that matches.
//!
//! # Usage
//!
//! ```rust
//! use partguard::registry::PatternRegistry;
//! use partguard::ComponentType;
//!
//! let mut registry = PatternRegistry::new();
//! registry.register_pattern(ComponentType::OpAmp, r"^LM(358|324)").unwrap();
//! registry.register_pattern(ComponentType::OpAmp, r"^TS9\d{2}").unwrap();
//!
//! assert!(registry.matches("ts912idt", ComponentType::OpAmp));
//! assert!(!registry.matches("ts912idt", None));
//! ```

pub mod matcher;

pub use matcher::{FnMatcher, Matcher, PatternMatcher, PrefixMatcher};

use crate::taxonomy::ComponentType;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while populating a registry. These are bugs in a rule
/// table, never a property of the MPN being classified.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid pattern for {component_type}: {source}")]
    InvalidPattern {
        component_type: ComponentType,
        #[source]
        source: regex::Error,
    },
    #[error("Empty pattern registered for {0}")]
    EmptyPattern(ComponentType),
    #[error("Empty prefix set registered for {0}")]
    EmptyPrefixSet(ComponentType),
}

/// Shared handle to a registered matcher
pub type MatcherRef = Arc<dyn Matcher>;

/// Canonical form every matcher sees
pub fn normalize_mpn(text: &str) -> String {
    text.trim().to_uppercase()
}

/// Component type to ordered matcher list
#[derive(Default)]
pub struct PatternRegistry {
    matchers: HashMap<ComponentType, Vec<MatcherRef>>,
}

impl PatternRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a matcher to the type's collection. Earlier matchers for the
    /// same type are kept; duplicates are allowed.
    pub fn register(&mut self, component_type: ComponentType, matcher: impl Matcher + 'static) {
        self.register_shared(component_type, Arc::new(matcher));
    }

    /// Append an already shared matcher, e.g. one used for several types
    pub fn register_shared(&mut self, component_type: ComponentType, matcher: MatcherRef) {
        tracing::trace!("Registering {} for {}", matcher.describe(), component_type);
        self.matchers.entry(component_type).or_default().push(matcher);
    }

    /// Compile and register a regex matcher
    pub fn register_pattern(
        &mut self,
        component_type: ComponentType,
        pattern: &str,
    ) -> Result<(), RegistryError> {
        if pattern.trim().is_empty() {
            return Err(RegistryError::EmptyPattern(component_type));
        }
        let matcher = PatternMatcher::new(pattern).map_err(|source| {
            RegistryError::InvalidPattern {
                component_type,
                source,
            }
        })?;
        self.register(component_type, matcher);
        Ok(())
    }

    /// Register a literal prefix matcher
    pub fn register_prefixes(
        &mut self,
        component_type: ComponentType,
        prefixes: &[&str],
    ) -> Result<(), RegistryError> {
        let matcher = PrefixMatcher::new(prefixes);
        if matcher.is_empty() {
            return Err(RegistryError::EmptyPrefixSet(component_type));
        }
        self.register(component_type, matcher);
        Ok(())
    }

    /// True iff at least one matcher registered for `component_type`
    /// accepts the normalized `text`.
    ///
    /// Empty text, an absent type, or a type without matchers is simply a
    /// non-match.
    pub fn matches(&self, text: &str, component_type: impl Into<Option<ComponentType>>) -> bool {
        let Some(component_type) = component_type.into() else {
            return false;
        };
        let normalized = normalize_mpn(text);
        if normalized.is_empty() {
            return false;
        }
        self.matches_normalized(&normalized, component_type)
    }

    fn matches_normalized(&self, normalized: &str, component_type: ComponentType) -> bool {
        self.matchers
            .get(&component_type)
            .map(|list| list.iter().any(|m| m.accepts(normalized)))
            .unwrap_or(false)
    }

    /// Every type with an accepting matcher, in `ComponentType::ALL` order
    pub fn matching_types(&self, text: &str) -> Vec<ComponentType> {
        let normalized = normalize_mpn(text);
        if normalized.is_empty() {
            return Vec::new();
        }
        ComponentType::ALL
            .iter()
            .copied()
            .filter(|ty| self.matches_normalized(&normalized, *ty))
            .collect()
    }

    /// First matcher registered for a type.
    ///
    /// Debug-only introspection. Never use it to decide whether an MPN
    /// matches a type: other matchers for the same type would be skipped.
    /// Use [`PatternRegistry::matches`] instead.
    pub fn first_matcher(&self, component_type: ComponentType) -> Option<&MatcherRef> {
        self.matchers.get(&component_type).and_then(|list| list.first())
    }

    /// Read-only view of a type's matchers in registration order
    pub fn matchers(&self, component_type: ComponentType) -> &[MatcherRef] {
        self.matchers
            .get(&component_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn matcher_count(&self, component_type: ComponentType) -> usize {
        self.matchers(component_type).len()
    }

    pub fn total_matchers(&self) -> usize {
        self.matchers.values().map(Vec::len).sum()
    }

    /// Types with at least one matcher, in `ComponentType::ALL` order
    pub fn registered_types(&self) -> Vec<ComponentType> {
        ComponentType::ALL
            .iter()
            .copied()
            .filter(|ty| self.matcher_count(*ty) > 0)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.values().all(Vec::is_empty)
    }
}

impl std::fmt::Debug for PatternRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for ty in self.registered_types() {
            map.entry(&ty, &self.matcher_count(ty));
        }
        map.finish()
    }
}
