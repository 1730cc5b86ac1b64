//! PartGuard - manufacturer part number classification library
//!
//! Classifies MPNs into component types, extracts series and package codes
//! with per-manufacturer rules, scores how similar two MPNs are, and
//! decides whether one part is an official replacement for another.
//!
//! # Quick Start
//!
//! ```
//! use partguard::{ComponentType, PartClassifier};
//!
//! let classifier = PartClassifier::with_builtin_handlers().unwrap();
//!
//! assert!(classifier.matches("LM358DR", ComponentType::OpAmp));
//! assert!(classifier.matches("TS912IDT", ComponentType::OpAmp));
//!
//! let info = classifier.classify("lm358dr");
//! assert_eq!(info.series, "LM358");
//! assert_eq!(info.package_code, "D");
//!
//! assert!(classifier.is_official_replacement("LM358N", "LM358DR"));
//! assert!(!classifier.is_official_replacement("LM358N", "LM324N"));
//!
//! for alt in classifier.suggest_alternates("LM358N", ["LM358DR", "LM324N", "TL072CP"]) {
//!     println!("{} {:.2} official={}", alt.mpn, alt.score, alt.official_replacement);
//! }
//! ```
//!
//! # Features
//!
//! - **Pattern registry**: any-match lookup over every matcher registered for a type
//! - **Similarity kernel**: edit distance, numeric, substitution-aware and composite scores
//! - **Manufacturer handlers**: series, package code and load-bearing attributes per vendor
//! - **Replacement resolver**: series compatibility, generation rules, attribute checks

pub mod core;
pub mod handlers;
pub mod registry;
pub mod similarity;
pub mod taxonomy;

// Re-export main types
pub use crate::core::{
    Classification, ClassifierOptions, ConfigError, PartClassifier, PartClassifierBuilder,
    PartGuardError, RankedAlternate, RegistryStats,
};
pub use handlers::{builtin_handlers, Attribute, ManufacturerHandler, ReplacementVerdict};
pub use registry::{normalize_mpn, PatternRegistry, RegistryError};
pub use similarity::{composite_similarity, Similarity, SimilarityWeights};
pub use taxonomy::ComponentType;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Classification, ClassifierOptions, ComponentType, ManufacturerHandler, PartClassifier,
        PartGuardError, PatternRegistry, RankedAlternate, ReplacementVerdict, Similarity,
    };
}
