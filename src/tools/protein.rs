//! Protein (BCA) MCP Tools
//!
//! Standard-curve fitting and sample concentration / yield estimation. The
//! averaging of several dilution readings happens here, not in the core.

use serde::Serialize;

use crate::lab::{
    compute_sample_concentration, compute_standard_regression, compute_total_yield,
    parse_standard_duplicates, parse_standard_duplicates_with_ladder, LabError, RegressionFit,
    StandardCurve, StandardPoint,
};

/// One sample absorbance measured at a given dilution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleReading {
    pub absorbance: f64,
    pub dilution_factor: f64,
}

/// Response for fit_bca_standard_curve
#[derive(Debug, Serialize)]
pub struct StandardCurveResponse {
    pub standards: Vec<StandardPoint>,
    pub fit: RegressionFit,
}

#[derive(Debug, Serialize)]
pub struct ReadingResult {
    pub absorbance: f64,
    pub dilution_factor: f64,
    pub concentration_mg_per_ml: f64,
}

/// Response for estimate_protein
#[derive(Debug, Serialize)]
pub struct ProteinEstimateResponse {
    pub standards: Vec<StandardPoint>,
    pub fit: RegressionFit,
    pub readings: Vec<ReadingResult>,
    pub mean_concentration_mg_per_ml: f64,
    pub total_volume_ul: Option<f64>,
    pub total_yield_mg: Option<f64>,
}

fn parse_curve(raw_text: &str, ladder: Option<&[f64]>) -> Result<StandardCurve, LabError> {
    match ladder {
        Some(ladder) => parse_standard_duplicates_with_ladder(raw_text, ladder),
        None => parse_standard_duplicates(raw_text),
    }
}

fn fit_curve(
    raw_text: &str,
    ladder: Option<&[f64]>,
) -> Result<(StandardCurve, RegressionFit), String> {
    let curve = parse_curve(raw_text, ladder).map_err(|e| {
        tracing::warn!("Standard curve rejected: {}", e);
        e.to_string()
    })?;
    let fit = compute_standard_regression(&curve).map_err(|e| e.to_string())?;
    Ok((curve, fit))
}

/// Parse pasted standards and fit the curve
pub fn fit_bca_standard_curve(
    raw_text: &str,
    ladder: Option<&[f64]>,
) -> Result<StandardCurveResponse, String> {
    let (curve, fit) = fit_curve(raw_text, ladder)?;
    Ok(StandardCurveResponse {
        standards: curve.points().to_vec(),
        fit,
    })
}

/// Fit the curve, convert each reading, and average them
///
/// Total yield is computed from the mean concentration when a volume is given.
pub fn estimate_protein(
    raw_text: &str,
    ladder: Option<&[f64]>,
    readings: &[SampleReading],
    total_volume_ul: Option<f64>,
) -> Result<ProteinEstimateResponse, String> {
    if readings.is_empty() {
        return Err("At least one sample reading is required".to_string());
    }

    let (curve, fit) = fit_curve(raw_text, ladder)?;

    let readings = readings
        .iter()
        .map(|r| {
            compute_sample_concentration(r.absorbance, fit.slope, fit.intercept, r.dilution_factor)
                .map(|concentration_mg_per_ml| ReadingResult {
                    absorbance: r.absorbance,
                    dilution_factor: r.dilution_factor,
                    concentration_mg_per_ml,
                })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    let mean_concentration_mg_per_ml = readings
        .iter()
        .map(|r| r.concentration_mg_per_ml)
        .sum::<f64>()
        / readings.len() as f64;

    let total_yield_mg = total_volume_ul
        .map(|vol| compute_total_yield(mean_concentration_mg_per_ml, vol))
        .transpose()
        .map_err(|e| e.to_string())?;

    Ok(ProteinEstimateResponse {
        standards: curve.points().to_vec(),
        fit,
        readings,
        mean_concentration_mg_per_ml,
        total_volume_ul,
        total_yield_mg,
    })
}
