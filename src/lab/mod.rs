//! Lab calculation module
//!
//! Pure, stateless calculators: molarity conversion, DNA assembly planning,
//! and BCA standard-curve protein estimation.

pub mod assembly;
pub mod bca;
pub mod error;
pub mod molarity;
pub mod units;

pub use assembly::{
    compute_assembly_protocol, pmol_to_ng, AssemblyParams, AssemblyResult, Fragment,
    FragmentVolume, AVG_BP_MOLECULAR_WEIGHT,
};
pub use bca::{
    compute_sample_concentration, compute_standard_regression, compute_total_yield,
    parse_standard_duplicates, parse_standard_duplicates_with_ladder, RegressionFit,
    StandardCurve, StandardPoint, STANDARD_CONCENTRATIONS,
};
pub use error::{LabError, LabResult};
pub use units::{find_reagent, ConcentrationUnit, MassUnit, Reagent, VolumeUnit, COMMON_REAGENTS};
