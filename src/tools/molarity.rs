//! Molarity MCP Tools
//!
//! Unit-aware wrappers around the molarity calculators.

use serde::Serialize;

use crate::lab::{
    find_reagent, molarity, ConcentrationUnit, MassUnit, Reagent, VolumeUnit, COMMON_REAGENTS,
};

/// Response for list_reagents
#[derive(Debug, Serialize)]
pub struct ListReagentsResponse {
    pub reagents: Vec<Reagent>,
    pub total: usize,
}

/// Response for calculate_mass / calculate_molarity / calculate_volume
#[derive(Debug, Serialize)]
pub struct ConversionResponse {
    /// Which quantity was solved for: mass, molarity, or volume
    pub solved_for: &'static str,
    pub molecular_weight: f64,
    pub reagent: Option<&'static str>,
    /// Result in the unit the caller asked for
    pub result: f64,
    pub unit: &'static str,
    /// Result in base units (g, M, L)
    pub result_base: f64,
    pub base_unit: &'static str,
    pub message: String,
}

pub fn list_reagents() -> ListReagentsResponse {
    ListReagentsResponse {
        reagents: COMMON_REAGENTS.to_vec(),
        total: COMMON_REAGENTS.len(),
    }
}

/// Resolve the molecular weight from an explicit value or a reagent preset
///
/// An explicit value takes precedence over the preset.
pub fn resolve_molecular_weight(
    molecular_weight: Option<f64>,
    reagent: Option<&str>,
) -> Result<(f64, Option<&'static str>), String> {
    if let Some(mw) = molecular_weight {
        return Ok((mw, None));
    }
    match reagent {
        Some(name) => find_reagent(name)
            .map(|r| (r.molecular_weight, Some(r.name)))
            .ok_or_else(|| {
                let known: Vec<&str> = COMMON_REAGENTS.iter().map(|r| r.name).collect();
                format!("Unknown reagent '{}'. Known reagents: {}", name, known.join(", "))
            }),
        None => Err("Provide either molecular_weight or reagent".to_string()),
    }
}

fn parse_concentration_unit(unit: &str) -> Result<ConcentrationUnit, String> {
    ConcentrationUnit::parse(unit)
        .ok_or_else(|| format!("Unknown concentration unit '{}' (expected M, mM, µM, nM)", unit))
}

fn parse_volume_unit(unit: &str) -> Result<VolumeUnit, String> {
    VolumeUnit::parse(unit)
        .ok_or_else(|| format!("Unknown volume unit '{}' (expected L, mL, µL)", unit))
}

fn parse_mass_unit(unit: &str) -> Result<MassUnit, String> {
    MassUnit::parse(unit)
        .ok_or_else(|| format!("Unknown mass unit '{}' (expected g, mg, µg)", unit))
}

/// Mass needed for a target concentration and volume
pub fn calculate_mass(
    molecular_weight: Option<f64>,
    reagent: Option<&str>,
    concentration: f64,
    concentration_unit: &str,
    volume: f64,
    volume_unit: &str,
    result_unit: Option<&str>,
) -> Result<ConversionResponse, String> {
    let (mw, reagent) = resolve_molecular_weight(molecular_weight, reagent)?;
    let concentration_m = parse_concentration_unit(concentration_unit)?.to_molar(concentration);
    let volume_l = parse_volume_unit(volume_unit)?.to_liters(volume);
    let out_unit = parse_mass_unit(result_unit.unwrap_or("g"))?;

    let mass_g = molarity::mass(mw, concentration_m, volume_l).map_err(|e| {
        tracing::warn!("calculate_mass rejected: {}", e);
        e.to_string()
    })?;
    let result = out_unit.from_grams(mass_g);

    Ok(ConversionResponse {
        solved_for: "mass",
        molecular_weight: mw,
        reagent,
        result,
        unit: out_unit.symbol(),
        result_base: mass_g,
        base_unit: "g",
        message: format!("Mass required: {:.4} {}", result, out_unit.symbol()),
    })
}

/// Molar concentration of a known mass in a known volume
pub fn calculate_molarity(
    molecular_weight: Option<f64>,
    reagent: Option<&str>,
    mass: f64,
    mass_unit: &str,
    volume: f64,
    volume_unit: &str,
    result_unit: Option<&str>,
) -> Result<ConversionResponse, String> {
    let (mw, reagent) = resolve_molecular_weight(molecular_weight, reagent)?;
    let mass_g = parse_mass_unit(mass_unit)?.to_grams(mass);
    let volume_l = parse_volume_unit(volume_unit)?.to_liters(volume);
    let out_unit = parse_concentration_unit(result_unit.unwrap_or("M"))?;

    let molar = molarity::molarity(mw, mass_g, volume_l).map_err(|e| {
        tracing::warn!("calculate_molarity rejected: {}", e);
        e.to_string()
    })?;
    let result = out_unit.from_molar(molar);

    Ok(ConversionResponse {
        solved_for: "molarity",
        molecular_weight: mw,
        reagent,
        result,
        unit: out_unit.symbol(),
        result_base: molar,
        base_unit: "M",
        message: format!("Molarity: {:.4} {}", result, out_unit.symbol()),
    })
}

/// Volume that brings a known mass to a target concentration
pub fn calculate_volume(
    molecular_weight: Option<f64>,
    reagent: Option<&str>,
    mass: f64,
    mass_unit: &str,
    concentration: f64,
    concentration_unit: &str,
    result_unit: Option<&str>,
) -> Result<ConversionResponse, String> {
    let (mw, reagent) = resolve_molecular_weight(molecular_weight, reagent)?;
    let mass_g = parse_mass_unit(mass_unit)?.to_grams(mass);
    let concentration_m = parse_concentration_unit(concentration_unit)?.to_molar(concentration);
    let out_unit = parse_volume_unit(result_unit.unwrap_or("L"))?;

    let volume_l = molarity::volume(mw, mass_g, concentration_m).map_err(|e| {
        tracing::warn!("calculate_volume rejected: {}", e);
        e.to_string()
    })?;
    let result = out_unit.from_liters(volume_l);

    Ok(ConversionResponse {
        solved_for: "volume",
        molecular_weight: mw,
        reagent,
        result,
        unit: out_unit.symbol(),
        result_base: volume_l,
        base_unit: "L",
        message: format!("Volume required: {:.4} {}", result, out_unit.symbol()),
    })
}
