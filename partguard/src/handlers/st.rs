//! STMicroelectronics rule table
//!
//! TSxxx op-amps, L78xx regulators and STM32 microcontrollers. ST also
//! contributes matchers for the generic `OpAmp`, `VoltageRegulator` and
//! `Ic` types that Texas Instruments registers for.

use super::{
    alpha_numeric_series, match_package_code, register_table, types_of, Attribute,
    ManufacturerHandler,
};
use crate::registry::{normalize_mpn, PatternRegistry, RegistryError};
use crate::taxonomy::ComponentType;
use std::collections::BTreeSet;

const PATTERNS: &[(ComponentType, &str)] = &[
    (ComponentType::OpAmp, r"^TS(9\d{2}|27\d{2}|3\d{2})"),
    (ComponentType::OpAmpSt, r"^TS(9\d{2}|27\d{2}|3\d{2})"),
    (ComponentType::VoltageRegulator, r"^L78[ML]?\d{2}"),
    (ComponentType::VoltageRegulatorSt, r"^L78[ML]?\d{2}"),
    (ComponentType::Microcontroller, r"^STM32[A-Z]\d{3}"),
    (ComponentType::MicrocontrollerSt, r"^STM32[A-Z]\d{3}"),
    (ComponentType::Ic, r"^(TS\d|L78|STM32)"),
];

/// V (TO-220), D2T (D2PAK), DT (DPAK), P (TO-220FP)
const REGULATOR_PACKAGES: &[&str] = &["D2T", "DT", "V", "P"];
/// D (SO-8), N (DIP), PT (TSSOP), LT (SOT23-5); a trailing T is tape
const OP_AMP_PACKAGES: &[&str] = &["PT", "LT", "D", "N"];
const GRADE_LETTERS: &[char] = &['C', 'I', 'A', 'B'];

pub struct StMicroHandler {
    supported: BTreeSet<ComponentType>,
}

impl StMicroHandler {
    pub fn new() -> Self {
        Self {
            supported: types_of(PATTERNS),
        }
    }

    /// STM32 ordering code: STM32 F 411 C E U 6
    ///                       family|line|pins|flash|package|temp
    fn stm32_fields(normalized: &str) -> Option<(String, Option<char>, Option<char>, Option<char>)> {
        let rest = normalized.strip_prefix("STM32")?;
        let mut chars = rest.chars();
        let family = chars.next().filter(char::is_ascii_alphabetic)?;
        let line: String = chars.by_ref().take(3).collect();
        if line.len() != 3 || !line.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let pins = chars.next();
        let flash = chars.next();
        let package = chars.next();
        Some((format!("STM32{}{}", family, line), pins, flash, package))
    }
}

impl Default for StMicroHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManufacturerHandler for StMicroHandler {
    fn manufacturer(&self) -> &'static str {
        "STMicroelectronics"
    }

    fn initialize_patterns(&self, registry: &mut PatternRegistry) -> Result<(), RegistryError> {
        register_table(registry, PATTERNS)
    }

    fn supported_types(&self) -> &BTreeSet<ComponentType> {
        &self.supported
    }

    fn extract_series(&self, mpn: &str) -> String {
        let normalized = normalize_mpn(mpn);
        if let Some((series, ..)) = Self::stm32_fields(&normalized) {
            return series;
        }
        // L78M05 / L78L05 keep the current class letter in the series
        if let Some(rest) = normalized.strip_prefix("L78") {
            let class: String = rest.chars().take(1).filter(|c| matches!(*c, 'M' | 'L')).collect();
            let digits: String = rest[class.len()..]
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            if digits.len() == 2 {
                return format!("L78{}{}", class, digits);
            }
            return String::new();
        }
        alpha_numeric_series(&normalized, &["TS"]).unwrap_or_default()
    }

    fn extract_package_code(&self, mpn: &str) -> String {
        let normalized = normalize_mpn(mpn);
        if let Some((_, _, _, package)) = Self::stm32_fields(&normalized) {
            return package.map(String::from).unwrap_or_default();
        }
        let series = self.extract_series(&normalized);
        if series.is_empty() {
            return String::new();
        }
        let rest = normalized.strip_prefix(series.as_str()).unwrap_or_default();
        let head = rest.split('-').next().unwrap_or_default();
        if series.starts_with("TS") {
            return match_package_code(head, GRADE_LETTERS, &['T'], OP_AMP_PACKAGES);
        }
        // "ABV" carries a two-letter grade
        let head = head.strip_prefix("AB").unwrap_or(head);
        match_package_code(head, GRADE_LETTERS, &[], REGULATOR_PACKAGES)
    }

    fn load_bearing_attributes(&self, mpn: &str) -> Vec<Attribute> {
        let normalized = normalize_mpn(mpn);
        let Some((_, pins, flash, _)) = Self::stm32_fields(&normalized) else {
            return Vec::new();
        };
        let mut attrs = Vec::new();
        if let Some(pins) = pins {
            attrs.push(Attribute::new("pin_count", pins.to_string()));
        }
        if let Some(flash) = flash {
            attrs.push(Attribute::new("flash_size", flash.to_string()));
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series() {
        let h = StMicroHandler::new();
        assert_eq!(h.extract_series("STM32F411CEU6"), "STM32F411");
        assert_eq!(h.extract_series("L7805CV"), "L7805");
        assert_eq!(h.extract_series("L78M05CDT-TR"), "L78M05");
        assert_eq!(h.extract_series("TS912IDT"), "TS912");
        assert_eq!(h.extract_series("STM32"), "");
        assert_eq!(h.extract_series("L78"), "");
        assert_eq!(h.extract_series(""), "");
    }

    #[test]
    fn test_package_code() {
        let h = StMicroHandler::new();
        assert_eq!(h.extract_package_code("STM32F411CEU6"), "U");
        assert_eq!(h.extract_package_code("STM32F411RET6"), "T");
        assert_eq!(h.extract_package_code("L7805CV"), "V");
        assert_eq!(h.extract_package_code("L7805ABV"), "V");
        assert_eq!(h.extract_package_code("L7805CD2T-TR"), "D2T");
        assert_eq!(h.extract_package_code("L78M05CDT-TR"), "DT");
        assert_eq!(h.extract_package_code("TS912IDT"), "D");
        assert_eq!(h.extract_package_code("TS912IN"), "N");
        assert_eq!(h.extract_package_code("TS912IPT"), "PT");
        assert_eq!(h.extract_package_code("LM358N"), "");
    }

    #[test]
    fn test_stm32_replacements() {
        let h = StMicroHandler::new();
        // Temperature grade only
        assert!(h.is_official_replacement("STM32F411CEU6", "STM32F411CEU7"));
        // Package only
        assert!(h.is_official_replacement("STM32F411CEU6", "STM32F411CEY6"));
        // Flash size differs
        assert!(!h.is_official_replacement("STM32F411CEU6", "STM32F411CCU6"));
        // Pin count differs
        assert!(!h.is_official_replacement("STM32F411CEU6", "STM32F411RET6"));
        assert!(!h.is_official_replacement("STM32F411CEU6", "STM32F401CEU6"));
    }

    #[test]
    fn test_regulator_replacements() {
        let h = StMicroHandler::new();
        assert!(h.is_official_replacement("L7805CV", "L7805CD2T-TR"));
        assert!(!h.is_official_replacement("L7805CV", "L78M05CDT-TR"));
        assert!(!h.is_official_replacement("L7805CV", "L7812CV"));
    }
}
