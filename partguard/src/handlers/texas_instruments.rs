//! Texas Instruments rule table
//!
//! Covers the classic LM358/LM324/LM2904 and TL07x op-amps, the LM78xx,
//! LM78Lxx/LM78Mxx and LM1117 linear regulators, and a generic IC matcher for the LM/TL/TPS/SN
//! product lines.

use super::{
    alpha_numeric_series, match_package_code, register_table, types_of, Attribute,
    ManufacturerHandler,
};
use crate::registry::{normalize_mpn, PatternRegistry, RegistryError};
use crate::similarity::parse_number;
use crate::taxonomy::ComponentType;
use std::collections::BTreeSet;

const PATTERNS: &[(ComponentType, &str)] = &[
    (ComponentType::OpAmp, r"^(LM(358|324|2904|2902)|TL0[78][1-4])"),
    (ComponentType::OpAmpTi, r"^(LM(358|324|2904|2902)|TL0[78][1-4])"),
    (ComponentType::VoltageRegulator, r"^LM(78[LM]?\d{2}|1117)"),
    (ComponentType::VoltageRegulatorTi, r"^LM(78[LM]?\d{2}|1117)"),
    (ComponentType::Ic, r"^(LM|TL|TPS|SN)\d"),
];

const SERIES_PREFIXES: &[&str] = &["LM", "TL", "TPS", "SN"];

/// D (SOIC), DGK (VSSOP), DBV (SOT-23), PW (TSSOP), N/P (DIP),
/// MP (SOT-223), DT (TO-252), CT (TO-220)
const PACKAGE_CODES: &[&str] = &["DGK", "DBV", "PW", "MP", "DT", "CT", "D", "N", "P"];
const GRADE_LETTERS: &[char] = &['C', 'I'];
const REEL_LETTERS: &[char] = &['R', 'X'];

pub struct TexasInstrumentsHandler {
    supported: BTreeSet<ComponentType>,
}

impl TexasInstrumentsHandler {
    pub fn new() -> Self {
        Self {
            supported: types_of(PATTERNS),
        }
    }

    /// LM78L05 / LM78M05 keep the current class letter in the series
    fn class_letter_series(normalized: &str) -> Option<String> {
        let mut rest = normalized.strip_prefix("LM78")?.chars();
        let class = rest.next().filter(|c| matches!(*c, 'L' | 'M'))?;
        let digits: String = rest.take_while(char::is_ascii_digit).collect();
        if digits.len() != 2 {
            return None;
        }
        Some(format!("LM78{}{}", class, digits))
    }

    /// Regulated output in volts, or "ADJ" for the adjustable LM1117
    fn output_voltage(normalized: &str, series: &str) -> Option<String> {
        if let Some(code) = series.strip_prefix("LM78") {
            let code = code.trim_start_matches(|c: char| c == 'L' || c == 'M');
            return parse_number(code).map(|v| format!("{}", v));
        }
        if series == "LM1117" {
            return Some(
                normalized
                    .split_once('-')
                    .and_then(|(_, v)| parse_number(v))
                    .map(|v| format!("{:.1}", v))
                    .unwrap_or_else(|| "ADJ".to_string()),
            );
        }
        None
    }
}

impl Default for TexasInstrumentsHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManufacturerHandler for TexasInstrumentsHandler {
    fn manufacturer(&self) -> &'static str {
        "Texas Instruments"
    }

    fn initialize_patterns(&self, registry: &mut PatternRegistry) -> Result<(), RegistryError> {
        register_table(registry, PATTERNS)
    }

    fn supported_types(&self) -> &BTreeSet<ComponentType> {
        &self.supported
    }

    fn extract_series(&self, mpn: &str) -> String {
        let normalized = normalize_mpn(mpn);
        Self::class_letter_series(&normalized)
            .or_else(|| alpha_numeric_series(&normalized, SERIES_PREFIXES))
            .unwrap_or_default()
    }

    fn extract_package_code(&self, mpn: &str) -> String {
        let normalized = normalize_mpn(mpn);
        let series = self.extract_series(&normalized);
        if series.is_empty() {
            return String::new();
        }
        let rest = normalized.strip_prefix(series.as_str()).unwrap_or_default();
        let head = rest.split('-').next().unwrap_or_default();
        match_package_code(head, GRADE_LETTERS, REEL_LETTERS, PACKAGE_CODES)
    }

    fn load_bearing_attributes(&self, mpn: &str) -> Vec<Attribute> {
        let normalized = normalize_mpn(mpn);
        let series = self.extract_series(&normalized);
        Self::output_voltage(&normalized, &series)
            .map(|v| vec![Attribute::new("output_voltage", v)])
            .unwrap_or_default()
    }
}
