//! Unit types and conversion constants
//!
//! The calculators work in base units only (M, L, g). Everything a caller
//! types in (mM, µL, mg, ...) is scaled through these tables first.

use serde::Serialize;

// ============================================================================
// Concentration Conversion Constants (to mol/L)
// ============================================================================

pub const M_PER_MM: f64 = 1e-3;
pub const M_PER_UM: f64 = 1e-6;
pub const M_PER_NM: f64 = 1e-9;

// ============================================================================
// Volume Conversion Constants (to liters)
// ============================================================================

pub const L_PER_ML: f64 = 1e-3;
pub const L_PER_UL: f64 = 1e-6;

// ============================================================================
// Mass Conversion Constants (to grams)
// ============================================================================

pub const G_PER_MG: f64 = 1e-3;
pub const G_PER_UG: f64 = 1e-6;

/// Replace both micro sign (U+00B5) and Greek mu (U+03BC) with a plain 'u'
fn normalize_micro(unit: &str) -> String {
    unit.trim().replace(['\u{00B5}', '\u{03BC}'], "u")
}

/// Molar concentration unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConcentrationUnit {
    #[serde(rename = "M")]
    Molar,
    #[serde(rename = "mM")]
    Millimolar,
    #[serde(rename = "µM")]
    Micromolar,
    #[serde(rename = "nM")]
    Nanomolar,
}

impl ConcentrationUnit {
    /// Parse a unit string
    ///
    /// Symbols are case-sensitive (`M` vs `mM`); spelled-out names are not.
    pub fn parse(unit: &str) -> Option<Self> {
        let normalized = normalize_micro(unit);
        match normalized.as_str() {
            "M" => return Some(Self::Molar),
            "mM" => return Some(Self::Millimolar),
            "uM" => return Some(Self::Micromolar),
            "nM" => return Some(Self::Nanomolar),
            _ => {}
        }
        match normalized.to_lowercase().as_str() {
            "molar" | "mol/l" => Some(Self::Molar),
            "millimolar" | "mmol/l" => Some(Self::Millimolar),
            "micromolar" | "umol/l" => Some(Self::Micromolar),
            "nanomolar" | "nmol/l" => Some(Self::Nanomolar),
            _ => None,
        }
    }

    /// Moles per liter represented by one of this unit
    pub fn factor(&self) -> f64 {
        match self {
            Self::Molar => 1.0,
            Self::Millimolar => M_PER_MM,
            Self::Micromolar => M_PER_UM,
            Self::Nanomolar => M_PER_NM,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Molar => "M",
            Self::Millimolar => "mM",
            Self::Micromolar => "µM",
            Self::Nanomolar => "nM",
        }
    }

    pub fn to_molar(&self, value: f64) -> f64 {
        value * self.factor()
    }

    pub fn from_molar(&self, molar: f64) -> f64 {
        molar / self.factor()
    }
}

/// Liquid volume unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VolumeUnit {
    #[serde(rename = "L")]
    Liter,
    #[serde(rename = "mL")]
    Milliliter,
    #[serde(rename = "µL")]
    Microliter,
}

impl VolumeUnit {
    pub fn parse(unit: &str) -> Option<Self> {
        match normalize_micro(unit).to_lowercase().as_str() {
            "l" | "liter" | "liters" | "litre" | "litres" => Some(Self::Liter),
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Some(Self::Milliliter)
            }
            "ul" | "microliter" | "microliters" | "microlitre" | "microlitres" => {
                Some(Self::Microliter)
            }
            _ => None,
        }
    }

    /// Liters represented by one of this unit
    pub fn factor(&self) -> f64 {
        match self {
            Self::Liter => 1.0,
            Self::Milliliter => L_PER_ML,
            Self::Microliter => L_PER_UL,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Liter => "L",
            Self::Milliliter => "mL",
            Self::Microliter => "µL",
        }
    }

    pub fn to_liters(&self, value: f64) -> f64 {
        value * self.factor()
    }

    pub fn from_liters(&self, liters: f64) -> f64 {
        liters / self.factor()
    }
}

/// Mass unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MassUnit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "mg")]
    Milligram,
    #[serde(rename = "µg")]
    Microgram,
}

impl MassUnit {
    pub fn parse(unit: &str) -> Option<Self> {
        match normalize_micro(unit).to_lowercase().as_str() {
            "g" | "gram" | "grams" => Some(Self::Gram),
            "mg" | "milligram" | "milligrams" => Some(Self::Milligram),
            "ug" | "mcg" | "microgram" | "micrograms" => Some(Self::Microgram),
            _ => None,
        }
    }

    /// Grams represented by one of this unit
    pub fn factor(&self) -> f64 {
        match self {
            Self::Gram => 1.0,
            Self::Milligram => G_PER_MG,
            Self::Microgram => G_PER_UG,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Gram => "g",
            Self::Milligram => "mg",
            Self::Microgram => "µg",
        }
    }

    pub fn to_grams(&self, value: f64) -> f64 {
        value * self.factor()
    }

    pub fn from_grams(&self, grams: f64) -> f64 {
        grams / self.factor()
    }
}

// ============================================================================
// Reagent Presets
// ============================================================================

/// A common reagent with a known molecular weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reagent {
    pub name: &'static str,
    /// Molecular weight in g/mol
    pub molecular_weight: f64,
}

/// Frequently used bench reagents
pub const COMMON_REAGENTS: &[Reagent] = &[
    Reagent {
        name: "NaCl",
        molecular_weight: 58.44,
    },
    Reagent {
        name: "IPTG",
        molecular_weight: 238.31,
    },
    Reagent {
        name: "Tris Base",
        molecular_weight: 121.14,
    },
    Reagent {
        name: "EDTA (disodium salt)",
        molecular_weight: 372.24,
    },
    Reagent {
        name: "Glucose (Dextrose)",
        molecular_weight: 180.16,
    },
];

/// Look up a reagent preset by name (case-insensitive)
pub fn find_reagent(name: &str) -> Option<&'static Reagent> {
    let wanted = name.trim().to_lowercase();
    COMMON_REAGENTS.iter().find(|r| r.name.to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_concentration_units() {
        assert_eq!(ConcentrationUnit::parse("M"), Some(ConcentrationUnit::Molar));
        assert_eq!(ConcentrationUnit::parse("mM"), Some(ConcentrationUnit::Millimolar));
        assert_eq!(ConcentrationUnit::parse("µM"), Some(ConcentrationUnit::Micromolar));
        assert_eq!(ConcentrationUnit::parse("μM"), Some(ConcentrationUnit::Micromolar));
        assert_eq!(ConcentrationUnit::parse("uM"), Some(ConcentrationUnit::Micromolar));
        assert_eq!(ConcentrationUnit::parse(" nM "), Some(ConcentrationUnit::Nanomolar));
        assert_eq!(ConcentrationUnit::parse("Millimolar"), Some(ConcentrationUnit::Millimolar));
        assert_eq!(ConcentrationUnit::parse("mg/mL"), None);
    }

    #[test]
    fn test_concentration_symbols_are_case_sensitive() {
        // "mm" is a length, not a concentration
        assert_eq!(ConcentrationUnit::parse("mm"), None);
        assert_eq!(ConcentrationUnit::parse("m"), None);
    }

    #[test]
    fn test_parse_volume_units() {
        assert_eq!(VolumeUnit::parse("L"), Some(VolumeUnit::Liter));
        assert_eq!(VolumeUnit::parse("mL"), Some(VolumeUnit::Milliliter));
        assert_eq!(VolumeUnit::parse("ml"), Some(VolumeUnit::Milliliter));
        assert_eq!(VolumeUnit::parse("µL"), Some(VolumeUnit::Microliter));
        assert_eq!(VolumeUnit::parse("ul"), Some(VolumeUnit::Microliter));
        assert_eq!(VolumeUnit::parse("cup"), None);
    }

    #[test]
    fn test_parse_mass_units() {
        assert_eq!(MassUnit::parse("g"), Some(MassUnit::Gram));
        assert_eq!(MassUnit::parse("MG"), Some(MassUnit::Milligram));
        assert_eq!(MassUnit::parse("µg"), Some(MassUnit::Microgram));
        assert_eq!(MassUnit::parse("mcg"), Some(MassUnit::Microgram));
        assert_eq!(MassUnit::parse("kg"), None);
    }

    #[test]
    fn test_factors() {
        assert_eq!(ConcentrationUnit::Millimolar.factor(), 1e-3);
        assert_eq!(ConcentrationUnit::Nanomolar.factor(), 1e-9);
        assert_eq!(VolumeUnit::Microliter.factor(), 1e-6);
        assert_eq!(MassUnit::Milligram.factor(), 1e-3);
    }

    #[test]
    fn test_conversions() {
        assert!((VolumeUnit::Milliliter.to_liters(250.0) - 0.25).abs() < 1e-12);
        assert!((ConcentrationUnit::Millimolar.to_molar(150.0) - 0.15).abs() < 1e-12);
        assert!((MassUnit::Milligram.from_grams(0.5844) - 584.4).abs() < 1e-9);
        assert!((ConcentrationUnit::Micromolar.from_molar(1e-3) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_find_reagent() {
        let nacl = find_reagent("nacl").unwrap();
        assert_eq!(nacl.name, "NaCl");
        assert_eq!(nacl.molecular_weight, 58.44);
        assert_eq!(find_reagent(" Tris Base ").map(|r| r.molecular_weight), Some(121.14));
        assert!(find_reagent("HEPES").is_none());
    }
}
