//! Manufacturer Handlers
//!
//! One capability object per manufacturer family. A handler owns that
//! manufacturer's MPN grammar: it registers matchers into the shared
//! [`PatternRegistry`] once, then answers attribute and replacement
//! queries read-only.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  initialize_patterns  ┌──────────────────┐
//! │   Handler    │──────────────────────▶│ Pattern Registry │
//! │ (per vendor) │                       └────────┬─────────┘
//! └──────┬───────┘                                │ matches
//!        │ extract_series / attributes            ▼
//!        ▼                                ┌──────────────────┐
//! ┌──────────────┐                        │  Classification  │
//! │ Replacement  │                        └──────────────────┘
//! │   Resolver   │
//! └──────────────┘
//! ```
//!
//! The built-in handlers below are rule tables, kept small: enough to
//! cover the contract for passives, op-amps, regulators, MCUs and sensors.

pub mod allegro;
pub mod replacement;
pub mod st;
pub mod texas_instruments;
pub mod yageo;

pub use allegro::AllegroHandler;
pub use replacement::{
    resolve_replacement, series_compatible_with, Attribute, GenerationRule, ReplacementVerdict,
};
pub use st::StMicroHandler;
pub use texas_instruments::TexasInstrumentsHandler;
pub use yageo::YageoHandler;

use crate::registry::{PatternRegistry, RegistryError};
use crate::similarity::decompose;
use crate::taxonomy::ComponentType;
use std::collections::BTreeSet;

/// Contract implemented once per manufacturer family
pub trait ManufacturerHandler: Send + Sync {
    /// Manufacturer display name
    fn manufacturer(&self) -> &'static str;

    /// Register every matcher this handler owns. Called exactly once, on
    /// the registry being built; must not touch anything else.
    fn initialize_patterns(&self, registry: &mut PatternRegistry) -> Result<(), RegistryError>;

    /// The fixed set of types this handler registers matchers for
    fn supported_types(&self) -> &BTreeSet<ComponentType>;

    /// Forwards to [`PatternRegistry::matches`], which evaluates every
    /// matcher registered for the type.
    fn matches(&self, text: &str, component_type: ComponentType, registry: &PatternRegistry) -> bool {
        registry.matches(text, component_type)
    }

    /// Generic family code; empty when unrecognized
    fn extract_series(&self, mpn: &str) -> String;

    /// Physical package code; empty when unrecognized
    fn extract_package_code(&self, mpn: &str) -> String;

    /// Attributes that must match exactly for a replacement
    fn load_bearing_attributes(&self, _mpn: &str) -> Vec<Attribute> {
        Vec::new()
    }

    /// Can a part of `candidate` series stand in for `original` series
    fn series_compatible(&self, original: &str, candidate: &str) -> bool {
        series_compatible_with(original, candidate, &[])
    }

    /// Minimum composite similarity for a replacement. `None` keeps fuzzy
    /// scores out of the decision.
    fn similarity_floor(&self) -> Option<f64> {
        None
    }

    /// Is `candidate` an official replacement for `original`
    fn is_official_replacement(&self, original: &str, candidate: &str) -> bool {
        resolve_replacement(self, original, candidate).is_accepted()
    }
}

/// All built-in handlers, in a stable order
pub fn builtin_handlers() -> Vec<Box<dyn ManufacturerHandler>> {
    vec![
        Box::new(TexasInstrumentsHandler::new()),
        Box::new(StMicroHandler::new()),
        Box::new(AllegroHandler::new()),
        Box::new(YageoHandler::new()),
    ]
}

/// Register a `(type, pattern)` table
pub(crate) fn register_table(
    registry: &mut PatternRegistry,
    table: &[(ComponentType, &str)],
) -> Result<(), RegistryError> {
    for (component_type, pattern) in table {
        registry.register_pattern(*component_type, pattern)?;
    }
    Ok(())
}

/// Set of the types named in a pattern table
pub(crate) fn types_of(table: &[(ComponentType, &str)]) -> BTreeSet<ComponentType> {
    table.iter().map(|(t, _)| *t).collect()
}

/// Alphabetic prefix plus digit run, when the prefix is one of `prefixes`
pub(crate) fn alpha_numeric_series(normalized: &str, prefixes: &[&str]) -> Option<String> {
    let parts = decompose(normalized);
    if parts.numeric.is_empty() || !prefixes.contains(&parts.prefix) {
        return None;
    }
    Some(format!("{}{}", parts.prefix, parts.numeric))
}

/// Return the first candidate (whole code, reel marker dropped, grade
/// letter dropped, both dropped) listed in `known`
pub(crate) fn match_package_code(
    head: &str,
    grade_letters: &[char],
    reel_letters: &[char],
    known: &[&str],
) -> String {
    let without_reel = head
        .strip_suffix(|c: char| reel_letters.contains(&c))
        .filter(|s| !s.is_empty());
    let without_grade = head
        .strip_prefix(|c: char| grade_letters.contains(&c))
        .filter(|s| !s.is_empty());
    let without_both = without_grade.and_then(|s| {
        s.strip_suffix(|c: char| reel_letters.contains(&c))
            .filter(|s| !s.is_empty())
    });

    [Some(head), without_reel, without_grade, without_both]
        .into_iter()
        .flatten()
        .find(|code| known.contains(code))
        .map(str::to_string)
        .unwrap_or_default()
}
