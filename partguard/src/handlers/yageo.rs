//! Yageo rule table
//!
//! RC-series thick-film chip resistors and CC-series MLCCs.
//!
//! ```text
//! RC 0603 F R -07 10K L        CC 0603 K R X7R 9 BB 104
//!    │    │ │  │   │              │    │ │ │   │    └── capacitance
//!    │    │ │  │   └── value      │    │ │ │   └─────── rated voltage
//!    │    │ │  └────── reel       │    │ │ └─────────── dielectric
//!    │    │ └───────── packaging  │    │ └───────────── packaging
//!    │    └─────────── tolerance  │    └─────────────── tolerance
//!    └──────────────── size       └──────────────────── size
//! ```
//!
//! Size, packaging and reel codes never veto a replacement; tolerance,
//! value, dielectric and voltage do.

use super::{register_table, types_of, Attribute, ManufacturerHandler};
use crate::registry::{normalize_mpn, PatternRegistry, RegistryError};
use crate::taxonomy::ComponentType;
use std::collections::BTreeSet;

const PATTERNS: &[(ComponentType, &str)] = &[
    (ComponentType::Resistor, r"^RC\d{4}[A-Z]"),
    (ComponentType::ResistorYageo, r"^RC\d{4}[A-Z]"),
    (ComponentType::Capacitor, r"^CC\d{4}[A-Z]"),
    (ComponentType::CapacitorYageo, r"^CC\d{4}[A-Z]"),
];

pub struct YageoHandler {
    supported: BTreeSet<ComponentType>,
}

impl YageoHandler {
    pub fn new() -> Self {
        Self {
            supported: types_of(PATTERNS),
        }
    }

    /// ("RC" | "CC", size code, remainder)
    fn split(normalized: &str) -> Option<(&str, &str, &str)> {
        let family = normalized.get(..2).filter(|f| matches!(*f, "RC" | "CC"))?;
        let size = normalized.get(2..6)?;
        if !size.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        Some((family, size, &normalized[6..]))
    }

    fn resistor_attributes(rest: &str) -> Vec<Attribute> {
        let mut attrs = Vec::new();
        if let Some(tolerance) = rest.chars().next().filter(char::is_ascii_alphabetic) {
            attrs.push(Attribute::new("tolerance", tolerance.to_string()));
        }
        // Value sits after the two-digit reel code: "-0710KL" -> "10K"
        if let Some((_, tail)) = rest.split_once('-') {
            let value = tail.get(2..).unwrap_or_default();
            let value = value.strip_suffix('L').unwrap_or(value);
            if !value.is_empty() {
                attrs.push(Attribute::new("resistance", value));
            }
        }
        attrs
    }

    fn capacitor_attributes(rest: &str) -> Vec<Attribute> {
        let mut attrs = Vec::new();
        let chars: Vec<char> = rest.chars().collect();
        if let Some(tolerance) = chars.first().filter(|c| c.is_ascii_alphabetic()) {
            attrs.push(Attribute::new("tolerance", tolerance.to_string()));
        }
        // chars[1] is the packaging code
        if chars.len() >= 5 {
            attrs.push(Attribute::new("dielectric", chars[2..5].iter().collect::<String>()));
        }
        if let Some(voltage) = chars.get(5) {
            attrs.push(Attribute::new("voltage_code", voltage.to_string()));
        }
        if chars.len() > 8 {
            attrs.push(Attribute::new("capacitance", chars[8..].iter().collect::<String>()));
        }
        attrs
    }
}

impl Default for YageoHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManufacturerHandler for YageoHandler {
    fn manufacturer(&self) -> &'static str {
        "Yageo"
    }

    fn initialize_patterns(&self, registry: &mut PatternRegistry) -> Result<(), RegistryError> {
        register_table(registry, PATTERNS)
    }

    fn supported_types(&self) -> &BTreeSet<ComponentType> {
        &self.supported
    }

    /// Resistors and capacitors form one family per dielectric class, not
    /// per size, so the series is the two-letter family code.
    fn extract_series(&self, mpn: &str) -> String {
        let normalized = normalize_mpn(mpn);
        Self::split(&normalized)
            .map(|(family, _, _)| family.to_string())
            .unwrap_or_default()
    }

    fn extract_package_code(&self, mpn: &str) -> String {
        let normalized = normalize_mpn(mpn);
        Self::split(&normalized)
            .map(|(_, size, _)| size.to_string())
            .unwrap_or_default()
    }

    fn load_bearing_attributes(&self, mpn: &str) -> Vec<Attribute> {
        let normalized = normalize_mpn(mpn);
        match Self::split(&normalized) {
            Some(("RC", _, rest)) => Self::resistor_attributes(rest),
            Some(("CC", _, rest)) => Self::capacitor_attributes(rest),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_and_package() {
        let h = YageoHandler::new();
        assert_eq!(h.extract_series("RC0603FR-0710KL"), "RC");
        assert_eq!(h.extract_package_code("RC0603FR-0710KL"), "0603");
        assert_eq!(h.extract_series("cc0402krx7r9bb104"), "CC");
        assert_eq!(h.extract_package_code("CC0402KRX7R9BB104"), "0402");
        assert_eq!(h.extract_series("RC06"), "");
        assert_eq!(h.extract_package_code("RCXXXX"), "");
        assert_eq!(h.extract_series(""), "");
    }

    #[test]
    fn test_resistor_attributes() {
        let h = YageoHandler::new();
        assert_eq!(
            h.load_bearing_attributes("RC0603FR-0710KL"),
            vec![
                Attribute::new("tolerance", "F"),
                Attribute::new("resistance", "10K"),
            ]
        );
    }

    #[test]
    fn test_capacitor_attributes() {
        let h = YageoHandler::new();
        assert_eq!(
            h.load_bearing_attributes("CC0603KRX7R9BB104"),
            vec![
                Attribute::new("tolerance", "K"),
                Attribute::new("dielectric", "X7R"),
                Attribute::new("voltage_code", "9"),
                Attribute::new("capacitance", "104"),
            ]
        );
    }

    #[test]
    fn test_replacements() {
        let h = YageoHandler::new();
        // Reel size and case size are packaging
        assert!(h.is_official_replacement("RC0603FR-0710KL", "RC0603FR-1310KL"));
        assert!(h.is_official_replacement("RC0603FR-0710KL", "RC0402FR-0710KL"));
        // Tolerance and value are load-bearing
        assert!(!h.is_official_replacement("RC0603FR-0710KL", "RC0603JR-0710KL"));
        assert!(!h.is_official_replacement("RC0603FR-0710KL", "RC0603FR-074K7L"));
        // Resistor is not a capacitor
        assert!(!h.is_official_replacement("RC0603FR-0710KL", "CC0603KRX7R9BB104"));
        assert!(!h.is_official_replacement("CC0603KRX7R9BB104", "CC0603KRX5R9BB104"));
        assert!(h.is_official_replacement("CC0603KRX7R9BB104", "CC0805KPX7R9BB104"));
    }
}
