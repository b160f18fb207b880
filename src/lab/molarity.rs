//! Molarity conversions
//!
//! Mass, molar concentration and volume of a solute with known molecular
//! weight. All quantities are in base units: g/mol, M (mol/L), L, g.

use super::error::{require_non_negative, require_positive, LabResult};

/// Mass in grams needed to reach `concentration_m` in `volume_l`
///
/// A zero concentration or volume is valid and yields zero grams.
pub fn mass(molecular_weight: f64, concentration_m: f64, volume_l: f64) -> LabResult<f64> {
    require_positive("Molecular weight", molecular_weight)?;
    require_non_negative("Concentration", concentration_m)?;
    require_non_negative("Volume", volume_l)?;
    Ok(molecular_weight * concentration_m * volume_l)
}

/// Molar concentration of `mass_g` dissolved to `volume_l`
pub fn molarity(molecular_weight: f64, mass_g: f64, volume_l: f64) -> LabResult<f64> {
    require_positive("Molecular weight", molecular_weight)?;
    require_non_negative("Mass", mass_g)?;
    require_positive("Volume", volume_l)?;
    Ok(mass_g / (molecular_weight * volume_l))
}

/// Volume in liters that brings `mass_g` to `concentration_m`
pub fn volume(molecular_weight: f64, mass_g: f64, concentration_m: f64) -> LabResult<f64> {
    require_positive("Molecular weight", molecular_weight)?;
    require_non_negative("Mass", mass_g)?;
    require_positive("Concentration", concentration_m)?;
    Ok(mass_g / (molecular_weight * concentration_m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lab::LabError;

    const NACL_MW: f64 = 58.44;

    #[test]
    fn test_mass_one_molar_liter() {
        let grams = mass(NACL_MW, 1.0, 1.0).unwrap();
        assert!((grams - 58.44).abs() < 1e-9);
    }

    #[test]
    fn test_mass_is_linear_in_volume() {
        let single = mass(NACL_MW, 0.15, 0.25).unwrap();
        let double = mass(NACL_MW, 0.15, 0.5).unwrap();
        assert!((double - 2.0 * single).abs() < 1e-12);
    }

    #[test]
    fn test_mass_is_linear_in_concentration_and_mw() {
        let base = mass(100.0, 0.1, 0.2).unwrap();
        assert!((mass(200.0, 0.1, 0.2).unwrap() - 2.0 * base).abs() < 1e-12);
        assert!((mass(100.0, 0.3, 0.2).unwrap() - 3.0 * base).abs() < 1e-12);
    }

    #[test]
    fn test_mass_zero_volume_is_zero() {
        assert_eq!(mass(NACL_MW, 1.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_mass_rejects_non_positive_mw() {
        assert!(matches!(mass(0.0, 1.0, 1.0), Err(LabError::InvalidArgument(_))));
        assert!(matches!(mass(-5.0, 1.0, 1.0), Err(LabError::InvalidArgument(_))));
    }

    #[test]
    fn test_round_trip() {
        let cases = [(58.44, 0.15, 0.5), (238.31, 1e-3, 1e-3), (372.24, 0.5, 2.0)];
        for (mw, m, v) in cases {
            let grams = mass(mw, m, v).unwrap();
            assert!((molarity(mw, grams, v).unwrap() - m).abs() < 1e-12 * m.max(1.0));
            assert!((volume(mw, grams, m).unwrap() - v).abs() < 1e-12 * v.max(1.0));
        }
    }

    #[test]
    fn test_molarity_rejects_zero_divisors() {
        assert!(matches!(molarity(0.0, 1.0, 1.0), Err(LabError::InvalidArgument(_))));
        assert!(matches!(molarity(NACL_MW, 1.0, 0.0), Err(LabError::InvalidArgument(_))));
    }

    #[test]
    fn test_volume_rejects_zero_divisors() {
        assert!(matches!(volume(0.0, 1.0, 1.0), Err(LabError::InvalidArgument(_))));
        assert!(matches!(volume(NACL_MW, 1.0, 0.0), Err(LabError::InvalidArgument(_))));
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        assert!(molarity(NACL_MW, -1.0, 1.0).is_err());
        assert!(volume(NACL_MW, f64::NAN, 1.0).is_err());
        assert!(mass(NACL_MW, 1.0, f64::INFINITY).is_err());
    }
}
