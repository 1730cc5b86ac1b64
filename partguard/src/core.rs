//! Part classifier facade.
//!
//! Builds the pattern registry from a set of manufacturer handlers and
//! answers every classification, similarity and replacement query against
//! it. Registration only happens inside [`PartClassifierBuilder::build`];
//! the returned [`PartClassifier`] is immutable and can be shared across
//! threads behind an `Arc`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::handlers::{builtin_handlers, resolve_replacement, ManufacturerHandler, ReplacementVerdict};
use crate::registry::{normalize_mpn, PatternRegistry, RegistryError};
use crate::similarity::{
    weighted_composite_similarity, SimilarityWeights, SubstitutionTable, WeightsError,
    SUBSTITUTION_SCORE,
};
use crate::taxonomy::ComponentType;

#[derive(Debug, thiserror::Error)]
pub enum PartGuardError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("Handler '{manufacturer}' registered {component_type} without declaring it")]
    UndeclaredType {
        manufacturer: String,
        component_type: ComponentType,
    },
    #[error("Handler '{0}' added twice")]
    DuplicateHandler(String),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid similarity weights: {0}")]
    Weights(#[from] WeightsError),
    #[error("min_alternate_score must be within [0, 1], got {0}")]
    MinScoreOutOfRange(f64),
}

/// Options for a classifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
    pub similarity: SimilarityWeights,
    /// Interchangeable prefix notations; a related pair scores at least
    /// `SUBSTITUTION_SCORE`
    pub substitutions: SubstitutionTable,
    pub min_alternate_score: f64,
    pub max_alternates: usize,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            similarity: SimilarityWeights::default(),
            substitutions: SubstitutionTable::builtin(),
            min_alternate_score: 0.5,
            max_alternates: 5,
        }
    }
}

impl ClassifierOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: ClassifierOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.similarity.validate()?;
        if !(0.0..=1.0).contains(&self.min_alternate_score) {
            return Err(ConfigError::MinScoreOutOfRange(self.min_alternate_score));
        }
        Ok(())
    }
}

/// Everything the classifier knows about one MPN
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Classification {
    pub mpn: String,
    /// Every matching type, generic and manufacturer-specific
    pub types: Vec<ComponentType>,
    pub manufacturer: Option<&'static str>,
    pub series: String,
    pub package_code: String,
}

impl Classification {
    pub fn is_recognized(&self) -> bool {
        !self.types.is_empty()
    }

    /// Most specific matching type, if any
    pub fn primary_type(&self) -> Option<ComponentType> {
        self.types
            .iter()
            .copied()
            .find(|t| !t.is_generic())
            .or_else(|| self.types.first().copied())
    }
}

/// One entry of [`PartClassifier::suggest_alternates`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAlternate {
    pub mpn: String,
    pub score: f64,
    pub official_replacement: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub handlers: usize,
    pub types: usize,
    pub matchers: usize,
}

struct HandlerEntry {
    handler: Box<dyn ManufacturerHandler>,
    /// Matchers this handler contributed, used to decide ownership
    patterns: PatternRegistry,
}

/// Collects handlers and options, then populates the registry once.
#[derive(Default)]
pub struct PartClassifierBuilder {
    handlers: Vec<Box<dyn ManufacturerHandler>>,
    options: ClassifierOptions,
}

impl PartClassifierBuilder {
    pub fn with_options(mut self, options: ClassifierOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_handler<H: ManufacturerHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn with_builtin_handlers(mut self) -> Self {
        self.handlers.extend(builtin_handlers());
        self
    }

    /// Run every handler's `initialize_patterns` exactly once and publish
    /// the result.
    pub fn build(self) -> Result<PartClassifier, PartGuardError> {
        self.options.validate()?;

        let mut registry = PatternRegistry::new();
        let mut entries = Vec::with_capacity(self.handlers.len());
        let mut seen = BTreeSet::new();

        for handler in self.handlers {
            let manufacturer = handler.manufacturer();
            if !seen.insert(manufacturer) {
                return Err(PartGuardError::DuplicateHandler(manufacturer.to_string()));
            }

            let mut patterns = PatternRegistry::new();
            handler.initialize_patterns(&mut patterns)?;

            for component_type in patterns.registered_types() {
                if !handler.supported_types().contains(&component_type) {
                    return Err(PartGuardError::UndeclaredType {
                        manufacturer: manufacturer.to_string(),
                        component_type,
                    });
                }
                for matcher in patterns.matchers(component_type) {
                    registry.register_shared(component_type, matcher.clone());
                }
            }

            tracing::debug!(
                "Initialized {} with {} matchers",
                manufacturer,
                patterns.total_matchers()
            );
            entries.push(HandlerEntry { handler, patterns });
        }

        tracing::info!(
            "Built part classifier: {} handlers, {} matchers across {} types",
            entries.len(),
            registry.total_matchers(),
            registry.registered_types().len()
        );

        Ok(PartClassifier {
            registry,
            handlers: entries,
            options: self.options,
        })
    }
}

/// Immutable, thread-safe MPN classifier.
pub struct PartClassifier {
    registry: PatternRegistry,
    handlers: Vec<HandlerEntry>,
    options: ClassifierOptions,
}

impl PartClassifier {
    pub fn builder() -> PartClassifierBuilder {
        PartClassifierBuilder::default()
    }

    /// Classifier with every built-in handler and default options
    pub fn with_builtin_handlers() -> Result<Self, PartGuardError> {
        Self::builder().with_builtin_handlers().build()
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// Read-only view of the populated registry
    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    pub fn handlers(&self) -> impl Iterator<Item = &dyn ManufacturerHandler> {
        self.handlers.iter().map(|e| e.handler.as_ref())
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            handlers: self.handlers.len(),
            types: self.registry.registered_types().len(),
            matchers: self.registry.total_matchers(),
        }
    }

    /// Does `mpn` match `component_type`? Absent inputs never match.
    pub fn matches(&self, mpn: &str, component_type: impl Into<Option<ComponentType>>) -> bool {
        self.registry.matches(mpn, component_type)
    }

    pub fn matching_types(&self, mpn: &str) -> Vec<ComponentType> {
        self.registry.matching_types(mpn)
    }

    fn owner_of(&self, normalized: &str) -> Option<&dyn ManufacturerHandler> {
        if normalized.is_empty() {
            return None;
        }
        self.handlers
            .iter()
            .find(|e| !e.patterns.matching_types(normalized).is_empty())
            .map(|e| e.handler.as_ref())
    }

    /// Handler whose own matchers accept `mpn`; first added wins
    pub fn handler_for(&self, mpn: &str) -> Option<&dyn ManufacturerHandler> {
        self.owner_of(&normalize_mpn(mpn))
    }

    pub fn classify(&self, mpn: &str) -> Classification {
        let normalized = normalize_mpn(mpn);
        let types = self.registry.matching_types(&normalized);
        let handler = self.owner_of(&normalized);
        Classification {
            types,
            manufacturer: handler.map(|h| h.manufacturer()),
            series: handler
                .map(|h| h.extract_series(&normalized))
                .unwrap_or_default(),
            package_code: handler
                .map(|h| h.extract_package_code(&normalized))
                .unwrap_or_default(),
            mpn: normalized,
        }
    }

    /// Series from the owning handler; empty when no handler owns `mpn`
    pub fn extract_series(&self, mpn: &str) -> String {
        self.handler_for(mpn)
            .map(|h| h.extract_series(mpn))
            .unwrap_or_default()
    }

    pub fn extract_package_code(&self, mpn: &str) -> String {
        self.handler_for(mpn)
            .map(|h| h.extract_package_code(mpn))
            .unwrap_or_default()
    }

    /// Both parts must belong to the same handler, which then runs its
    /// replacement chain.
    pub fn explain_replacement(&self, original: &str, candidate: &str) -> ReplacementVerdict {
        let original = normalize_mpn(original);
        let candidate = normalize_mpn(candidate);
        if original.is_empty() || candidate.is_empty() {
            return ReplacementVerdict::EmptyInput;
        }
        let Some(handler) = self.owner_of(&original) else {
            return ReplacementVerdict::UnknownPart { mpn: original };
        };
        let Some(candidate_handler) = self.owner_of(&candidate) else {
            return ReplacementVerdict::UnknownPart { mpn: candidate };
        };
        if handler.manufacturer() != candidate_handler.manufacturer() {
            return ReplacementVerdict::ManufacturerMismatch {
                original: handler.manufacturer(),
                candidate: candidate_handler.manufacturer(),
            };
        }
        resolve_replacement(handler, &original, &candidate)
    }

    pub fn is_official_replacement(&self, original: &str, candidate: &str) -> bool {
        self.explain_replacement(original, candidate).is_accepted()
    }

    /// Composite similarity with the configured weights, lifted to
    /// `SUBSTITUTION_SCORE` for pairs related by the substitution table.
    ///
    /// Both inputs are trimmed and upper-cased first, so `"lm358n"` and
    /// `"LM358N"` score 1.0 here even though the raw
    /// [`composite_similarity`](crate::similarity::composite_similarity)
    /// keeps them apart.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        let a = normalize_mpn(a);
        let b = normalize_mpn(b);
        let score = weighted_composite_similarity(&a, &b, &self.options.similarity);
        if self.options.substitutions.relates(&a, &b) {
            score.max(SUBSTITUTION_SCORE)
        } else {
            score
        }
    }

    /// Rank `candidates` as alternates for `mpn`, best first.
    ///
    /// Candidates identical to `mpn` after normalization are skipped, as
    /// are those below `min_alternate_score`. At most `max_alternates`
    /// are returned; equal scores keep input order.
    pub fn suggest_alternates<'a, I>(&self, mpn: &str, candidates: I) -> Vec<RankedAlternate>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let query = normalize_mpn(mpn);
        if query.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<RankedAlternate> = candidates
            .into_iter()
            .map(normalize_mpn)
            .filter(|c| !c.is_empty() && *c != query)
            .filter_map(|candidate| {
                let score = self.similarity(&query, &candidate);
                if score < self.options.min_alternate_score {
                    return None;
                }
                Some(RankedAlternate {
                    official_replacement: self.is_official_replacement(&query, &candidate),
                    mpn: candidate,
                    score,
                })
            })
            .collect();

        ranked.sort_by(|x, y| y.score.total_cmp(&x.score));
        ranked.truncate(self.options.max_alternates);
        tracing::trace!("{} alternates for {}", ranked.len(), query);
        ranked
    }
}

impl std::fmt::Debug for PartClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartClassifier")
            .field("handlers", &self.handlers().map(|h| h.manufacturer()).collect::<Vec<_>>())
            .field("registry", &self.registry)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{Attribute, StMicroHandler, TexasInstrumentsHandler};

    fn classifier() -> PartClassifier {
        PartClassifier::with_builtin_handlers().unwrap()
    }

    #[test]
    fn test_classifier_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PartClassifier>();
    }

    #[test]
    fn test_stats() {
        let c = classifier();
        let stats = c.stats();
        assert_eq!(stats.handlers, 4);
        assert_eq!(stats.matchers, c.registry().total_matchers());
        assert!(stats.types > 10);
    }

    #[test]
    fn test_classify() {
        let c = classifier();
        let result = c.classify(" lm358dr ");
        assert_eq!(result.mpn, "LM358DR");
        assert_eq!(result.manufacturer, Some("Texas Instruments"));
        assert_eq!(result.series, "LM358");
        assert_eq!(result.package_code, "D");
        assert!(result.types.contains(&ComponentType::OpAmp));
        assert!(result.types.contains(&ComponentType::OpAmpTi));
        assert!(result.types.contains(&ComponentType::Ic));
        assert_eq!(result.primary_type(), Some(ComponentType::OpAmpTi));
    }

    #[test]
    fn test_classify_unknown() {
        let c = classifier();
        let result = c.classify("NOT-A-PART");
        assert!(!result.is_recognized());
        assert_eq!(result.manufacturer, None);
        assert_eq!(result.series, "");
        assert_eq!(c.classify("").types, Vec::<ComponentType>::new());
    }

    #[test]
    fn test_handler_order_decides_owner() {
        let c = PartClassifier::builder()
            .with_handler(StMicroHandler::new())
            .with_handler(TexasInstrumentsHandler::new())
            .build()
            .unwrap();
        assert_eq!(c.handler_for("TS912IDT").map(|h| h.manufacturer()), Some("STMicroelectronics"));
        assert_eq!(c.handler_for("LM358N").map(|h| h.manufacturer()), Some("Texas Instruments"));
        assert!(c.handler_for("").is_none());
    }

    #[test]
    fn test_explain_replacement() {
        let c = classifier();
        assert_eq!(c.explain_replacement("LM358N", "LM358DR"), ReplacementVerdict::Accepted);
        assert_eq!(c.explain_replacement("", "LM358DR"), ReplacementVerdict::EmptyInput);
        assert_eq!(
            c.explain_replacement("LM358N", "QQ123"),
            ReplacementVerdict::UnknownPart { mpn: "QQ123".to_string() }
        );
        assert_eq!(
            c.explain_replacement("LM358N", "TS912IDT"),
            ReplacementVerdict::ManufacturerMismatch {
                original: "Texas Instruments",
                candidate: "STMicroelectronics",
            }
        );
    }

    #[test]
    fn test_similarity_uses_substitutions() {
        let c = classifier();
        assert_eq!(c.similarity("2SC1815", "C1815"), SUBSTITUTION_SCORE);
        assert_eq!(c.similarity("lm358", "LM358"), 1.0);
        assert_eq!(c.similarity("", "LM358"), 0.0);

        let plain = PartClassifier::builder()
            .with_options(ClassifierOptions {
                substitutions: SubstitutionTable::new(),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert!(plain.similarity("2SC1815", "C1815") < SUBSTITUTION_SCORE);
    }

    #[test]
    fn test_suggest_alternates() {
        let c = classifier();
        let ranked = c.suggest_alternates(
            "LM358N",
            ["TL072CP", "LM358DR", "lm358n", "STM32F411CEU6", "LM358PWR"],
        );
        let mpns: Vec<&str> = ranked.iter().map(|r| r.mpn.as_str()).collect();
        assert_eq!(mpns[..2], ["LM358DR", "LM358PWR"]);
        assert!(!mpns.contains(&"LM358N"));
        assert!(ranked.iter().all(|r| r.score >= 0.5));
        assert!(ranked[0].official_replacement);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_suggest_alternates_truncates() {
        let c = PartClassifier::builder()
            .with_builtin_handlers()
            .with_options(ClassifierOptions {
                max_alternates: 1,
                min_alternate_score: 0.0,
                ..Default::default()
            })
            .build()
            .unwrap();
        // Same suffix and a close family number outscore a shared series
        let ranked = c.suggest_alternates("LM358N", ["LM358DR", "LM324N"]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].mpn, "LM324N");
        assert!(!ranked[0].official_replacement);
        assert!(c.suggest_alternates("", ["LM358DR"]).is_empty());
    }

    #[test]
    fn test_options_defaults_and_json() {
        let options = ClassifierOptions::from_json(r#"{"max_alternates": 3}"#).unwrap();
        assert_eq!(options.max_alternates, 3);
        assert_eq!(options.similarity, SimilarityWeights::default());
        assert_eq!(options.substitutions, SubstitutionTable::builtin());

        let json = options.to_json().unwrap();
        assert_eq!(ClassifierOptions::from_json(&json).unwrap(), options);
    }

    #[test]
    fn test_options_rejected() {
        assert!(matches!(
            ClassifierOptions::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            ClassifierOptions::from_json(r#"{"min_alternate_score": 1.5}"#),
            Err(ConfigError::MinScoreOutOfRange(_))
        ));
        assert!(matches!(
            ClassifierOptions::from_json(r#"{"similarity": {"prefix": 0.9}}"#),
            Err(ConfigError::Weights(WeightsError::BadSum(_)))
        ));
    }

    #[test]
    fn test_build_rejects_invalid_options() {
        let mut options = ClassifierOptions::default();
        options.similarity.numeric = 2.0;
        let err = PartClassifier::builder().with_options(options).build().unwrap_err();
        assert!(matches!(err, PartGuardError::Config(ConfigError::Weights(_))));
    }

    #[test]
    fn test_duplicate_handler() {
        let err = PartClassifier::builder()
            .with_handler(TexasInstrumentsHandler::new())
            .with_handler(TexasInstrumentsHandler::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, PartGuardError::DuplicateHandler(ref m) if m == "Texas Instruments"));
    }

    struct Sneaky {
        types: BTreeSet<ComponentType>,
    }

    impl ManufacturerHandler for Sneaky {
        fn manufacturer(&self) -> &'static str {
            "Sneaky"
        }

        fn initialize_patterns(&self, registry: &mut PatternRegistry) -> Result<(), RegistryError> {
            registry.register_pattern(ComponentType::Diode, "^SN")?;
            registry.register_pattern(ComponentType::Mosfet, "^SN")
        }

        fn supported_types(&self) -> &BTreeSet<ComponentType> {
            &self.types
        }

        fn extract_series(&self, _mpn: &str) -> String {
            String::new()
        }

        fn extract_package_code(&self, _mpn: &str) -> String {
            String::new()
        }

        fn load_bearing_attributes(&self, _mpn: &str) -> Vec<Attribute> {
            Vec::new()
        }
    }

    #[test]
    fn test_undeclared_type() {
        let err = PartClassifier::builder()
            .with_handler(Sneaky {
                types: BTreeSet::from([ComponentType::Diode]),
            })
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            PartGuardError::UndeclaredType { component_type: ComponentType::Mosfet, .. }
        ));
        assert_eq!(
            err.to_string(),
            "Handler 'Sneaky' registered mosfet without declaring it"
        );
    }
}
