//! DNA assembly planner
//!
//! Pipetting volumes for a fixed-volume Gibson / HiFi style assembly: one
//! vector backbone, any number of inserts at a molar excess over the vector,
//! a master mix dosed by its concentration factor, and water to fill.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::{require_positive, LabError, LabResult};

/// Average molar mass of one double-stranded DNA base pair, in g/mol
pub const AVG_BP_MOLECULAR_WEIGHT: f64 = 650.0;

/// Slack allowed when the fragments fill the reaction exactly
const VOLUME_TOLERANCE_UL: f64 = 1e-9;

/// A DNA fragment going into the reaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub name: String,
    pub length_bp: f64,
    /// Stock concentration in ng/µL
    pub concentration_ng_per_ul: f64,
    #[serde(default)]
    pub is_vector: bool,
}

impl Fragment {
    pub fn vector(name: impl Into<String>, length_bp: f64, concentration_ng_per_ul: f64) -> Self {
        Self {
            name: name.into(),
            length_bp,
            concentration_ng_per_ul,
            is_vector: true,
        }
    }

    pub fn insert(name: impl Into<String>, length_bp: f64, concentration_ng_per_ul: f64) -> Self {
        Self {
            name: name.into(),
            length_bp,
            concentration_ng_per_ul,
            is_vector: false,
        }
    }

    fn role(&self) -> &'static str {
        if self.is_vector {
            "Vector"
        } else {
            "Insert"
        }
    }
}

/// Reaction-level settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssemblyParams {
    /// Final reaction volume in µL
    pub total_reaction_volume: f64,
    /// Concentration factor of the master mix (2.0 for a 2X mix)
    pub master_mix_concentration: f64,
    /// Target amount of vector in pmol
    pub vector_pmol: f64,
    /// Molar ratio of each insert to the vector
    pub insert_molar_excess: f64,
}

impl Default for AssemblyParams {
    fn default() -> Self {
        Self {
            total_reaction_volume: 20.0,
            master_mix_concentration: 2.0,
            vector_pmol: 0.05,
            insert_molar_excess: 2.0,
        }
    }
}

impl AssemblyParams {
    fn validate(&self) -> LabResult<()> {
        require_positive("Total reaction volume", self.total_reaction_volume)?;
        require_positive("Master mix concentration", self.master_mix_concentration)?;
        require_positive("Vector pmol", self.vector_pmol)?;
        require_positive("Insert molar excess", self.insert_molar_excess)?;
        Ok(())
    }
}

/// Computed amount and volume for one fragment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentVolume {
    pub name: String,
    pub is_vector: bool,
    pub pmol: f64,
    pub mass_ng: f64,
    pub volume_ul: f64,
}

/// Full pipetting plan for one reaction (all volumes in µL)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssemblyResult {
    /// Vector first, then inserts in input order
    pub fragment_volumes: Vec<FragmentVolume>,
    pub master_mix_volume: f64,
    pub water_volume: f64,
    pub total_reaction_volume: f64,
}

impl AssemblyResult {
    /// Volume of the named fragment, if it was part of the plan
    pub fn volume_of(&self, name: &str) -> Option<f64> {
        self.fragment_volumes
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.volume_ul)
    }

    pub fn total_fragment_volume(&self) -> f64 {
        self.fragment_volumes.iter().map(|f| f.volume_ul).sum()
    }
}

/// Convert an amount of dsDNA in pmol to a mass in ng
pub fn pmol_to_ng(pmol: f64, length_bp: f64) -> f64 {
    // pmol -> mol -> g -> ng
    pmol * 1e-12 * (length_bp * AVG_BP_MOLECULAR_WEIGHT) * 1e9
}

fn fragment_volume(fragment: &Fragment, pmol: f64) -> LabResult<FragmentVolume> {
    if !(fragment.concentration_ng_per_ul > 0.0) || !fragment.concentration_ng_per_ul.is_finite() {
        return Err(LabError::InvalidConfiguration(format!(
            "{} concentration must be > 0 ng/µL for {}",
            fragment.role(),
            fragment.name
        )));
    }
    let mass_ng = pmol_to_ng(pmol, fragment.length_bp);
    Ok(FragmentVolume {
        name: fragment.name.clone(),
        is_vector: fragment.is_vector,
        pmol,
        mass_ng,
        volume_ul: mass_ng / fragment.concentration_ng_per_ul,
    })
}

fn validate_fragments(fragments: &[Fragment]) -> LabResult<&Fragment> {
    let mut seen = HashSet::new();
    for fragment in fragments {
        if fragment.name.trim().is_empty() {
            return Err(LabError::InvalidConfiguration(
                "Every fragment needs a non-empty name".to_string(),
            ));
        }
        if !seen.insert(fragment.name.as_str()) {
            return Err(LabError::InvalidConfiguration(format!(
                "Fragment names must be unique; '{}' appears more than once",
                fragment.name
            )));
        }
        if !(fragment.length_bp > 0.0) || !fragment.length_bp.is_finite() {
            return Err(LabError::InvalidConfiguration(format!(
                "Fragment length must be > 0 bp for {}",
                fragment.name
            )));
        }
    }

    let mut vectors = fragments.iter().filter(|f| f.is_vector);
    match (vectors.next(), vectors.next()) {
        (Some(vector), None) => Ok(vector),
        _ => Err(LabError::InvalidConfiguration(
            "Exactly one fragment must be flagged as vector".to_string(),
        )),
    }
}

/// Plan the volumes for one assembly reaction
///
/// Every insert targets `insert_molar_excess * vector_pmol`, regardless of
/// how many inserts there are. Fails when the fragments plus master mix do
/// not fit in the reaction volume.
pub fn compute_assembly_protocol(
    fragments: &[Fragment],
    params: &AssemblyParams,
) -> LabResult<AssemblyResult> {
    params.validate()?;
    let vector = validate_fragments(fragments)?;

    let mut fragment_volumes = Vec::with_capacity(fragments.len());
    fragment_volumes.push(fragment_volume(vector, params.vector_pmol)?);

    let insert_pmol = params.insert_molar_excess * params.vector_pmol;
    for insert in fragments.iter().filter(|f| !f.is_vector) {
        fragment_volumes.push(fragment_volume(insert, insert_pmol)?);
    }

    let sum_fragments: f64 = fragment_volumes.iter().map(|f| f.volume_ul).sum();
    let master_mix_volume = params.total_reaction_volume / params.master_mix_concentration;
    let water_volume = params.total_reaction_volume - master_mix_volume - sum_fragments;

    if water_volume < -VOLUME_TOLERANCE_UL {
        tracing::debug!(
            "Assembly overflows by {:.4} µL ({} fragments)",
            -water_volume,
            fragment_volumes.len()
        );
        return Err(LabError::InvalidConfiguration(
            "Calculated volumes exceed total reaction volume. \
             Try reducing vector pmol or total fragment count."
                .to_string(),
        ));
    }

    Ok(AssemblyResult {
        fragment_volumes,
        master_mix_volume,
        water_volume: water_volume.max(0.0),
        total_reaction_volume: params.total_reaction_volume,
    })
}
