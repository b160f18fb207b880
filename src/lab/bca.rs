//! BCA protein assay
//!
//! Parses duplicate absorbance readings for the standard ladder, fits a
//! straight line through the mean absorbances, and converts sample
//! absorbances back to protein concentration and total yield.

use serde::Serialize;

use super::error::{require_finite, require_non_negative, require_positive, LabError, LabResult};

/// Standard ladder for wells A1..A9, in mg/mL
pub const STANDARD_CONCENTRATIONS: [f64; 9] = [2.0, 1.5, 1.0, 0.75, 0.5, 0.25, 0.125, 0.025, 0.0];

/// One standard with its duplicate readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StandardPoint {
    pub concentration_mg_per_ml: f64,
    pub absorbance_rep1: f64,
    pub absorbance_rep2: f64,
    pub absorbance_mean: f64,
}

impl StandardPoint {
    pub fn new(concentration_mg_per_ml: f64, absorbance_rep1: f64, absorbance_rep2: f64) -> Self {
        Self {
            concentration_mg_per_ml,
            absorbance_rep1,
            absorbance_rep2,
            absorbance_mean: (absorbance_rep1 + absorbance_rep2) / 2.0,
        }
    }
}

/// Ordered standard curve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardCurve {
    points: Vec<StandardPoint>,
}

impl StandardCurve {
    /// Build a curve from explicitly labelled points
    ///
    /// The mean absorbance is always recomputed from the two replicates.
    pub fn from_points(points: Vec<StandardPoint>) -> LabResult<Self> {
        let mut checked = Vec::with_capacity(points.len());
        for (i, p) in points.into_iter().enumerate() {
            let label = format!("Standard {} concentration", i + 1);
            require_non_negative(&label, p.concentration_mg_per_ml)?;
            require_finite(&format!("Standard {} absorbance", i + 1), p.absorbance_rep1)?;
            require_finite(&format!("Standard {} absorbance", i + 1), p.absorbance_rep2)?;
            checked.push(StandardPoint::new(
                p.concentration_mg_per_ml,
                p.absorbance_rep1,
                p.absorbance_rep2,
            ));
        }
        Ok(Self { points: checked })
    }

    pub fn points(&self) -> &[StandardPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Straight-line fit `absorbance = slope * concentration + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination of the fit
    pub r_squared: f64,
}

impl RegressionFit {
    pub fn absorbance_at(&self, concentration_mg_per_ml: f64) -> f64 {
        self.slope * concentration_mg_per_ml + self.intercept
    }
}

/// Parse nine lines of duplicate absorbances against the fixed ladder
///
/// Row order is the binding: line 1 is 2.0 mg/mL, line 9 is the blank.
/// Lines after the ninth are ignored.
pub fn parse_standard_duplicates(raw_text: &str) -> LabResult<StandardCurve> {
    parse_standard_duplicates_with_ladder(raw_text, &STANDARD_CONCENTRATIONS)
}

/// Parse duplicate absorbances against a caller-supplied ladder
///
/// Each line holds at least two whitespace separated numbers (rep1, rep2);
/// extra columns are ignored.
pub fn parse_standard_duplicates_with_ladder(
    raw_text: &str,
    ladder: &[f64],
) -> LabResult<StandardCurve> {
    if ladder.len() < 2 {
        return Err(LabError::InvalidArgument(format!(
            "A standard ladder needs at least 2 concentrations (got {})",
            ladder.len()
        )));
    }
    for &conc in ladder {
        require_non_negative("Ladder concentration", conc)?;
    }

    let lines: Vec<&str> = raw_text.trim().lines().collect();
    if lines.len() < ladder.len() {
        return Err(LabError::ParseError(format!(
            "You must provide at least {} lines of data for the {} standard concentrations (got {})",
            ladder.len(),
            ladder.len(),
            lines.len()
        )));
    }

    let mut points = Vec::with_capacity(ladder.len());
    for (i, (line, &conc)) in lines.iter().zip(ladder).enumerate() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(LabError::ParseError(format!(
                "Line {} doesn't have 2 columns of absorbance",
                i + 1
            )));
        }
        let rep1 = parse_absorbance(parts[0], i + 1)?;
        let rep2 = parse_absorbance(parts[1], i + 1)?;
        points.push(StandardPoint::new(conc, rep1, rep2));
    }

    tracing::debug!("Parsed {} standard points", points.len());
    Ok(StandardCurve { points })
}

fn parse_absorbance(token: &str, line_no: usize) -> LabResult<f64> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LabError::ParseError(format!(
            "Line {}: '{}' is not a valid absorbance",
            line_no, token
        ))),
    }
}

/// Least-squares line through (concentration, mean absorbance)
pub fn compute_standard_regression(curve: &StandardCurve) -> LabResult<RegressionFit> {
    let n = curve.len();
    if n < 2 {
        return Err(LabError::InsufficientData(format!(
            "Need at least 2 points for regression (got {})",
            n
        )));
    }

    let n_f = n as f64;
    let mean_x = curve.points.iter().map(|p| p.concentration_mg_per_ml).sum::<f64>() / n_f;
    let mean_y = curve.points.iter().map(|p| p.absorbance_mean).sum::<f64>() / n_f;

    let (sxx, sxy, syy) = curve.points.iter().fold((0.0, 0.0, 0.0), |(sxx, sxy, syy), p| {
        let dx = p.concentration_mg_per_ml - mean_x;
        let dy = p.absorbance_mean - mean_y;
        (sxx + dx * dx, sxy + dx * dy, syy + dy * dy)
    });

    if sxx == 0.0 {
        return Err(LabError::DivisionByZero(
            "All standards have the same concentration; cannot fit a line".to_string(),
        ));
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let mut fit = RegressionFit {
        slope,
        intercept,
        r_squared: 1.0,
    };
    if syy > 0.0 {
        let ss_res: f64 = curve
            .points
            .iter()
            .map(|p| (p.absorbance_mean - fit.absorbance_at(p.concentration_mg_per_ml)).powi(2))
            .sum();
        fit.r_squared = 1.0 - ss_res / syy;
    }

    tracing::debug!(
        "Standard curve fit: slope={:.5} intercept={:.5} r2={:.4}",
        fit.slope,
        fit.intercept,
        fit.r_squared
    );
    Ok(fit)
}

/// Protein concentration (mg/mL) of the undiluted sample
///
/// Readings below the blank clamp to zero before the dilution factor is
/// applied.
pub fn compute_sample_concentration(
    absorbance: f64,
    slope: f64,
    intercept: f64,
    dilution_factor: f64,
) -> LabResult<f64> {
    require_finite("Absorbance", absorbance)?;
    require_finite("Intercept", intercept)?;
    require_positive("Dilution factor", dilution_factor)?;
    if slope == 0.0 || !slope.is_finite() {
        return Err(LabError::DivisionByZero(format!(
            "Standard curve slope must be a non-zero finite number (got {})",
            slope
        )));
    }

    let calc_conc = ((absorbance - intercept) / slope).max(0.0);
    Ok(calc_conc * dilution_factor)
}

/// Total protein in mg for a concentration (mg/mL) and a volume in µL
pub fn compute_total_yield(concentration_mg_per_ml: f64, total_volume_ul: f64) -> LabResult<f64> {
    require_non_negative("Concentration", concentration_mg_per_ml)?;
    require_non_negative("Total volume", total_volume_ul)?;
    Ok(concentration_mg_per_ml * (total_volume_ul / 1000.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Noise-free curve on the fixed ladder with absorbance = 0.5c + 0.05
    fn linear_standard_text() -> String {
        STANDARD_CONCENTRATIONS
            .iter()
            .map(|c| {
                let a = 0.5 * c + 0.05;
                format!("{}\t{}", a, a)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_parse_binds_ladder_by_position() {
        let curve = parse_standard_duplicates(&linear_standard_text()).unwrap();
        assert_eq!(curve.len(), 9);
        assert_eq!(curve.points()[0].concentration_mg_per_ml, 2.0);
        assert_eq!(curve.points()[8].concentration_mg_per_ml, 0.0);
        assert!((curve.points()[0].absorbance_mean - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_parse_mean_of_duplicates() {
        let text = "1.10 1.20\n0.9 0.95\n0.7 0.72\n0.55 0.57\n0.4 0.41\n0.25 0.26\n0.17 0.18\n0.1 0.11\n0.05 0.06";
        let curve = parse_standard_duplicates(text).unwrap();
        let first = curve.points()[0];
        assert_eq!(first.absorbance_rep1, 1.10);
        assert_eq!(first.absorbance_rep2, 1.20);
        assert!((first.absorbance_mean - 1.15).abs() < 1e-12);
    }

    #[test]
    fn test_parse_ignores_extra_lines_and_columns() {
        let mut text = linear_standard_text().replace('\t', "  ");
        text = text.lines().map(|l| format!("{} 9.99", l)).collect::<Vec<_>>().join("\n");
        text.push_str("\n0.3 0.3\nnotes at the end\n");
        let curve = parse_standard_duplicates(&text).unwrap();
        assert_eq!(curve.len(), 9);
        assert!((curve.points()[8].absorbance_rep2 - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_parse_too_few_lines() {
        let text = "0.1 0.1\n0.2 0.2\n0.3 0.3";
        assert!(matches!(
            parse_standard_duplicates(text),
            Err(LabError::ParseError(_))
        ));
        assert!(matches!(parse_standard_duplicates(""), Err(LabError::ParseError(_))));
    }

    #[test]
    fn test_parse_single_column_line() {
        let mut lines: Vec<String> = linear_standard_text().lines().map(String::from).collect();
        lines[4] = "0.3".to_string();
        let err = parse_standard_duplicates(&lines.join("\n")).unwrap_err();
        assert_eq!(
            err,
            LabError::ParseError("Line 5 doesn't have 2 columns of absorbance".to_string())
        );
    }

    #[test]
    fn test_parse_non_numeric_token() {
        let mut lines: Vec<String> = linear_standard_text().lines().map(String::from).collect();
        lines[2] = "0.3 abc".to_string();
        assert!(matches!(
            parse_standard_duplicates(&lines.join("\n")),
            Err(LabError::ParseError(ref m)) if m.contains("Line 3")
        ));

        lines[2] = "NaN 0.3".to_string();
        assert!(parse_standard_duplicates(&lines.join("\n")).is_err());
    }

    #[test]
    fn test_parse_with_custom_ladder() {
        let text = "0.9 0.9\n0.5 0.5\n0.1 0.1";
        let curve = parse_standard_duplicates_with_ladder(text, &[1.6, 0.8, 0.0]).unwrap();
        assert_eq!(curve.len(), 3);
        assert_eq!(curve.points()[1].concentration_mg_per_ml, 0.8);

        assert!(matches!(
            parse_standard_duplicates_with_ladder(text, &[1.0]),
            Err(LabError::InvalidArgument(_))
        ));
        assert!(parse_standard_duplicates_with_ladder(text, &[1.0, -0.5]).is_err());
    }

    #[test]
    fn test_regression_recovers_known_line() {
        let curve = parse_standard_duplicates(&linear_standard_text()).unwrap();
        let fit = compute_standard_regression(&curve).unwrap();
        assert!((fit.slope - 0.5).abs() < 1e-9);
        assert!((fit.intercept - 0.05).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_regression_with_noise() {
        let points = vec![
            StandardPoint::new(0.0, 0.10, 0.10),
            StandardPoint::new(1.0, 0.55, 0.65),
            StandardPoint::new(2.0, 1.10, 1.10),
        ];
        let curve = StandardCurve::from_points(points).unwrap();
        let fit = compute_standard_regression(&curve).unwrap();
        // means: 0.1, 0.6, 1.1 -> exact line
        assert!((fit.slope - 0.5).abs() < 1e-9);
        assert!((fit.intercept - 0.1).abs() < 1e-9);
        assert!(fit.r_squared <= 1.0);
    }

    #[test]
    fn test_regression_needs_two_points() {
        let curve = StandardCurve::from_points(vec![StandardPoint::new(1.0, 0.5, 0.5)]).unwrap();
        assert!(matches!(
            compute_standard_regression(&curve),
            Err(LabError::InsufficientData(_))
        ));
        let empty = StandardCurve::from_points(Vec::new()).unwrap();
        assert!(empty.is_empty());
        assert!(compute_standard_regression(&empty).is_err());
    }

    #[test]
    fn test_regression_identical_concentrations() {
        let curve = StandardCurve::from_points(vec![
            StandardPoint::new(1.0, 0.5, 0.5),
            StandardPoint::new(1.0, 0.6, 0.6),
        ])
        .unwrap();
        assert!(matches!(
            compute_standard_regression(&curve),
            Err(LabError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_from_points_rejects_negative_concentration() {
        assert!(StandardCurve::from_points(vec![StandardPoint::new(-1.0, 0.5, 0.5)]).is_err());
    }

    #[test]
    fn test_from_points_recomputes_stale_mean() {
        let stale = StandardPoint {
            concentration_mg_per_ml: 1.0,
            absorbance_rep1: 0.6,
            absorbance_rep2: 0.6,
            absorbance_mean: 9.0,
        };
        let curve =
            StandardCurve::from_points(vec![StandardPoint::new(0.0, 0.1, 0.1), stale]).unwrap();
        assert!((curve.points()[1].absorbance_mean - 0.6).abs() < 1e-12);

        let fit = compute_standard_regression(&curve).unwrap();
        assert!((fit.slope - 0.5).abs() < 1e-9);
        assert!((fit.intercept - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_sample_concentration() {
        // (0.35 - 0.05) / 0.5 = 0.6 mg/mL, x5 dilution
        let conc = compute_sample_concentration(0.35, 0.5, 0.05, 5.0).unwrap();
        assert!((conc - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_concentration_clamps_below_blank() {
        let conc = compute_sample_concentration(0.05, 0.5, 0.1, 1.0).unwrap();
        assert_eq!(conc, 0.0);
        let conc = compute_sample_concentration(0.05, 0.5, 0.1, 10.0).unwrap();
        assert_eq!(conc, 0.0);
    }

    #[test]
    fn test_sample_concentration_flat_curve() {
        assert!(matches!(
            compute_sample_concentration(0.5, 0.0, 0.1, 1.0),
            Err(LabError::DivisionByZero(_))
        ));
        assert!(matches!(
            compute_sample_concentration(0.5, f64::NAN, 0.1, 1.0),
            Err(LabError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_sample_concentration_rejects_bad_dilution() {
        assert!(matches!(
            compute_sample_concentration(0.5, 0.5, 0.1, 0.0),
            Err(LabError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_total_yield() {
        assert!((compute_total_yield(2.0, 1000.0).unwrap() - 2.0).abs() < 1e-12);
        assert!((compute_total_yield(1.5, 250.0).unwrap() - 0.375).abs() < 1e-12);
        assert_eq!(compute_total_yield(0.0, 500.0).unwrap(), 0.0);
        assert!(compute_total_yield(1.0, -5.0).is_err());
    }
}
