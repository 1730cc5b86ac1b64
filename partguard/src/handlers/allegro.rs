//! Allegro MicroSystems rule table
//!
//! ACS7xx Hall-effect current sensors and A13xx linear Hall sensors.
//!
//! Ordering code layout:
//!
//! ```text
//! ACS712 E LC TR -05B -T
//! │      │ │  │   │    └── lead-free option (ignored)
//! │      │ │  │   └─────── current range + direction (load-bearing)
//! │      │ │  └─────────── tape and reel (ignored)
//! │      │ └────────────── package
//! │      └──────────────── temperature grade (ignored)
//! └─────────────────────── series
//! ```

use super::{
    register_table, series_compatible_with, types_of, Attribute, GenerationRule,
    ManufacturerHandler,
};
use crate::registry::{normalize_mpn, PatternRegistry, RegistryError};
use crate::similarity::decompose;
use crate::taxonomy::ComponentType;
use std::collections::BTreeSet;

const PATTERNS: &[(ComponentType, &str)] = &[
    (ComponentType::CurrentSensor, r"^ACS7\d{2}"),
    (ComponentType::CurrentSensorAllegro, r"^ACS7\d{2}"),
    (ComponentType::HallSensor, r"^A13\d{2}"),
    (ComponentType::HallSensorAllegro, r"^A13\d{2}"),
    (ComponentType::Sensor, r"^(ACS7\d{2}|A13\d{2})"),
];

/// The ACS723 is the drop-in successor of the ACS712
const GENERATIONS: &[GenerationRule] = &[GenerationRule {
    name: "ACS712 to ACS723",
    older: "ACS712",
    newer: "ACS723",
}];

pub struct AllegroHandler {
    supported: BTreeSet<ComponentType>,
}

impl AllegroHandler {
    pub fn new() -> Self {
        Self {
            supported: types_of(PATTERNS),
        }
    }

    /// Text between the series and the first dash
    fn option_block(normalized: &str) -> &str {
        decompose(normalized)
            .suffix
            .split('-')
            .next()
            .unwrap_or_default()
    }

    /// Amps and direction from a rating token such as "05B", "10AU" or "050B"
    fn current_rating(normalized: &str) -> Option<(String, &'static str)> {
        if !normalized.starts_with("ACS") {
            return None;
        }
        let token = normalized.split('-').nth(1)?;
        let digits: String = token.chars().take_while(char::is_ascii_digit).collect();
        let amps: u32 = digits.parse().ok()?;
        let direction = if token.ends_with('U') {
            "unidirectional"
        } else {
            "bidirectional"
        };
        Some((amps.to_string(), direction))
    }
}

impl Default for AllegroHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManufacturerHandler for AllegroHandler {
    fn manufacturer(&self) -> &'static str {
        "Allegro MicroSystems"
    }

    fn initialize_patterns(&self, registry: &mut PatternRegistry) -> Result<(), RegistryError> {
        register_table(registry, PATTERNS)
    }

    fn supported_types(&self) -> &BTreeSet<ComponentType> {
        &self.supported
    }

    fn extract_series(&self, mpn: &str) -> String {
        let normalized = normalize_mpn(mpn);
        let parts = decompose(&normalized);
        match (parts.prefix, parts.numeric.len()) {
            ("ACS", 3) => format!("ACS{}", parts.numeric),
            ("A", 4) if parts.numeric.starts_with("13") => format!("A{}", parts.numeric),
            _ => String::new(),
        }
    }

    fn extract_package_code(&self, mpn: &str) -> String {
        let normalized = normalize_mpn(mpn);
        if self.extract_series(&normalized).is_empty() {
            return String::new();
        }
        // Skip the temperature grade letter, keep the two package letters
        let code: String = Self::option_block(&normalized)
            .chars()
            .skip(1)
            .take(2)
            .collect();
        if code.len() == 2 {
            code
        } else {
            String::new()
        }
    }

    fn load_bearing_attributes(&self, mpn: &str) -> Vec<Attribute> {
        let normalized = normalize_mpn(mpn);
        match Self::current_rating(&normalized) {
            Some((amps, direction)) => vec![
                Attribute::new("current_range_a", amps),
                Attribute::new("direction", direction),
            ],
            None => Vec::new(),
        }
    }

    fn series_compatible(&self, original: &str, candidate: &str) -> bool {
        series_compatible_with(original, candidate, GENERATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series() {
        let h = AllegroHandler::new();
        assert_eq!(h.extract_series("ACS712ELCTR-05B-T"), "ACS712");
        assert_eq!(h.extract_series("acs723llctr-10ab-t"), "ACS723");
        assert_eq!(h.extract_series("A1324LLHLT-T"), "A1324");
        assert_eq!(h.extract_series("A4988"), "");
        assert_eq!(h.extract_series("ACS"), "");
        assert_eq!(h.extract_series(""), "");
    }

    #[test]
    fn test_package_code() {
        let h = AllegroHandler::new();
        assert_eq!(h.extract_package_code("ACS712ELCTR-05B-T"), "LC");
        assert_eq!(h.extract_package_code("ACS758LCB-050B-PFF-T"), "CB");
        assert_eq!(h.extract_package_code("A1324LUA-T"), "UA");
        assert_eq!(h.extract_package_code("ACS712"), "");
        assert_eq!(h.extract_package_code("LM358N"), "");
    }

    #[test]
    fn test_current_rating() {
        let h = AllegroHandler::new();
        assert_eq!(
            h.load_bearing_attributes("ACS712ELCTR-05B-T"),
            vec![
                Attribute::new("current_range_a", "5"),
                Attribute::new("direction", "bidirectional"),
            ]
        );
        assert_eq!(
            h.load_bearing_attributes("ACS723LLCTR-10AU-T")[1],
            Attribute::new("direction", "unidirectional")
        );
        assert!(h.load_bearing_attributes("A1324LUA-T").is_empty());
    }

    #[test]
    fn test_next_generation_replaces_previous() {
        let h = AllegroHandler::new();
        assert!(h.is_official_replacement("ACS712ELCTR-05B-T", "ACS723LLCTR-05AB-T"));
        // Not the other way round
        assert!(!h.is_official_replacement("ACS723LLCTR-05AB-T", "ACS712ELCTR-05B-T"));
        // Current range is load-bearing
        assert!(!h.is_official_replacement("ACS712ELCTR-05B-T", "ACS723LLCTR-10AB-T"));
        assert!(!h.is_official_replacement("ACS712ELCTR-20A-T", "ACS712ELCTR-05B-T"));
    }

    #[test]
    fn test_packaging_is_ignored() {
        let h = AllegroHandler::new();
        assert!(h.is_official_replacement("ACS712ELCTR-05B-T", "ACS712KLCTR-05B"));
        assert!(h.is_official_replacement("A1324LLHLT-T", "A1324LUA-T"));
        assert!(!h.is_official_replacement("A1324LUA-T", "A1326LUA-T"));
    }
}
