//! LabZen MCP Server Implementation
//!
//! Implements the MCP server with all LabZen tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::lab::{AssemblyParams, Fragment};
use crate::tools::assembly;
use crate::tools::molarity;
use crate::tools::protein::{self, SampleReading};
use crate::tools::status::StatusTracker;

/// LabZen MCP Service
#[derive(Clone)]
pub struct LabZenService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    tool_router: ToolRouter<LabZenService>,
}

impl LabZenService {
    pub fn new() -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new())),
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for LabZenService {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a tool response as pretty JSON text content
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn invalid(e: String) -> McpError {
    McpError::invalid_params(e, None)
}

// ============================================================================
// Molarity Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateMassParams {
    /// Molecular weight in g/mol (takes precedence over reagent)
    pub molecular_weight: Option<f64>,
    /// Reagent preset name, e.g. "NaCl" (see list_reagents)
    pub reagent: Option<String>,
    /// Target concentration value
    pub concentration: f64,
    /// Concentration unit: M, mM, µM, nM (default M)
    #[serde(default = "default_concentration_unit")]
    pub concentration_unit: String,
    /// Final volume value
    pub volume: f64,
    /// Volume unit: L, mL, µL (default L)
    #[serde(default = "default_volume_unit")]
    pub volume_unit: String,
    /// Unit for the result: g, mg, µg (default g)
    pub result_unit: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateMolarityParams {
    /// Molecular weight in g/mol (takes precedence over reagent)
    pub molecular_weight: Option<f64>,
    /// Reagent preset name
    pub reagent: Option<String>,
    /// Mass of solute
    pub mass: f64,
    /// Mass unit: g, mg, µg (default g)
    #[serde(default = "default_mass_unit")]
    pub mass_unit: String,
    /// Solution volume
    pub volume: f64,
    /// Volume unit: L, mL, µL (default L)
    #[serde(default = "default_volume_unit")]
    pub volume_unit: String,
    /// Unit for the result: M, mM, µM, nM (default M)
    pub result_unit: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateVolumeParams {
    /// Molecular weight in g/mol (takes precedence over reagent)
    pub molecular_weight: Option<f64>,
    /// Reagent preset name
    pub reagent: Option<String>,
    /// Mass of solute
    pub mass: f64,
    /// Mass unit: g, mg, µg (default g)
    #[serde(default = "default_mass_unit")]
    pub mass_unit: String,
    /// Target concentration value
    pub concentration: f64,
    /// Concentration unit: M, mM, µM, nM (default M)
    #[serde(default = "default_concentration_unit")]
    pub concentration_unit: String,
    /// Unit for the result: L, mL, µL (default L)
    pub result_unit: Option<String>,
}

fn default_concentration_unit() -> String { "M".to_string() }
fn default_volume_unit() -> String { "L".to_string() }
fn default_mass_unit() -> String { "g".to_string() }

// ============================================================================
// Assembly Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FragmentParam {
    /// Unique fragment name
    pub name: String,
    /// Length in base pairs
    pub length_bp: f64,
    /// Stock concentration in ng/µL
    pub concentration_ng_per_ul: f64,
    /// True for the vector backbone (exactly one fragment)
    #[serde(default)]
    pub is_vector: bool,
}

impl From<FragmentParam> for Fragment {
    fn from(p: FragmentParam) -> Self {
        Fragment {
            name: p.name,
            length_bp: p.length_bp,
            concentration_ng_per_ul: p.concentration_ng_per_ul,
            is_vector: p.is_vector,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PlanAssemblyParams {
    /// Vector plus inserts
    pub fragments: Vec<FragmentParam>,
    /// Final reaction volume in µL (default 20)
    #[serde(default = "default_total_reaction_volume")]
    pub total_reaction_volume: f64,
    /// Master mix concentration factor (default 2.0 for 2X)
    #[serde(default = "default_master_mix_concentration")]
    pub master_mix_concentration: f64,
    /// Vector amount in pmol (default 0.05)
    #[serde(default = "default_vector_pmol")]
    pub vector_pmol: f64,
    /// Insert-to-vector molar ratio (default 2.0)
    #[serde(default = "default_insert_molar_excess")]
    pub insert_molar_excess: f64,
}

fn default_total_reaction_volume() -> f64 { AssemblyParams::default().total_reaction_volume }
fn default_master_mix_concentration() -> f64 { AssemblyParams::default().master_mix_concentration }
fn default_vector_pmol() -> f64 { AssemblyParams::default().vector_pmol }
fn default_insert_molar_excess() -> f64 { AssemblyParams::default().insert_molar_excess }

// ============================================================================
// BCA Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FitStandardCurveParams {
    /// One line per standard, two absorbance readings each (rep1 rep2)
    pub standards: String,
    /// Optional JSON array of concentrations in mg/mL, in row order (default: 9-point ladder)
    pub ladder: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SampleReadingParam {
    /// Measured absorbance
    pub absorbance: f64,
    /// Dilution factor of the measured sample (default 1)
    #[serde(default = "default_dilution_factor")]
    pub dilution_factor: f64,
}

fn default_dilution_factor() -> f64 { 1.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EstimateProteinParams {
    /// One line per standard, two absorbance readings each (rep1 rep2)
    pub standards: String,
    /// Optional JSON array of concentrations in mg/mL, in row order
    pub ladder: Option<Vec<f64>>,
    /// Sample readings; concentrations are averaged across them
    pub readings: Vec<SampleReadingParam>,
    /// Total sample volume in µL, for yield
    pub total_volume_ul: Option<f64>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl LabZenService {
    // --- Status ---

    #[tool(description = "Get the current status of the LabZen service including build info and process information")]
    async fn labzen_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status())
    }

    #[tool(description = "Get instructions for the molarity, DNA assembly, and BCA protein tools. Call this when unsure which units or inputs a tool expects.")]
    fn lab_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::LAB_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(LAB_INSTRUCTIONS)]))
    }

    // --- Molarity ---

    #[tool(description = "List reagent presets with their molecular weights")]
    fn list_reagents(&self) -> Result<CallToolResult, McpError> {
        json_result(&molarity::list_reagents())
    }

    #[tool(description = "Calculate the mass of solute needed for a target concentration and volume")]
    fn calculate_mass(&self, Parameters(p): Parameters<CalculateMassParams>) -> Result<CallToolResult, McpError> {
        let result = molarity::calculate_mass(
            p.molecular_weight, p.reagent.as_deref(),
            p.concentration, &p.concentration_unit,
            p.volume, &p.volume_unit,
            p.result_unit.as_deref(),
        ).map_err(invalid)?;
        json_result(&result)
    }

    #[tool(description = "Calculate the molar concentration of a known mass dissolved in a known volume")]
    fn calculate_molarity(&self, Parameters(p): Parameters<CalculateMolarityParams>) -> Result<CallToolResult, McpError> {
        let result = molarity::calculate_molarity(
            p.molecular_weight, p.reagent.as_deref(),
            p.mass, &p.mass_unit,
            p.volume, &p.volume_unit,
            p.result_unit.as_deref(),
        ).map_err(invalid)?;
        json_result(&result)
    }

    #[tool(description = "Calculate the volume needed to dissolve a known mass to a target concentration")]
    fn calculate_volume(&self, Parameters(p): Parameters<CalculateVolumeParams>) -> Result<CallToolResult, McpError> {
        let result = molarity::calculate_volume(
            p.molecular_weight, p.reagent.as_deref(),
            p.mass, &p.mass_unit,
            p.concentration, &p.concentration_unit,
            p.result_unit.as_deref(),
        ).map_err(invalid)?;
        json_result(&result)
    }

    // --- Assembly ---

    #[tool(description = "Plan pipetting volumes for a DNA assembly reaction (one vector, any number of inserts, master mix, water)")]
    fn plan_assembly(&self, Parameters(p): Parameters<PlanAssemblyParams>) -> Result<CallToolResult, McpError> {
        let params = AssemblyParams {
            total_reaction_volume: p.total_reaction_volume,
            master_mix_concentration: p.master_mix_concentration,
            vector_pmol: p.vector_pmol,
            insert_molar_excess: p.insert_molar_excess,
        };
        let fragments = p.fragments.into_iter().map(Fragment::from).collect();
        let result = assembly::plan_assembly(fragments, params).map_err(invalid)?;
        json_result(&result)
    }

    // --- BCA ---

    #[tool(description = "Parse duplicate BCA standard absorbances and fit the standard curve (slope, intercept, r²)")]
    fn fit_bca_standard_curve(&self, Parameters(p): Parameters<FitStandardCurveParams>) -> Result<CallToolResult, McpError> {
        let result = protein::fit_bca_standard_curve(&p.standards, p.ladder.as_deref())
            .map_err(invalid)?;
        json_result(&result)
    }

    #[tool(description = "Estimate protein concentration from sample absorbances against a BCA standard curve, averaging dilutions and computing total yield")]
    fn estimate_protein(&self, Parameters(p): Parameters<EstimateProteinParams>) -> Result<CallToolResult, McpError> {
        let readings: Vec<SampleReading> = p.readings.iter()
            .map(|r| SampleReading { absorbance: r.absorbance, dilution_factor: r.dilution_factor })
            .collect();
        let result = protein::estimate_protein(&p.standards, p.ladder.as_deref(), &readings, p.total_volume_ul)
            .map_err(invalid)?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for LabZenService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "labzen".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("LabZen".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "LabZen - bench calculators for molarity, DNA assembly, and BCA protein assays. \
                 Call lab_instructions for units and input formats. \
                 Molarity: list_reagents, calculate_mass, calculate_molarity, calculate_volume. \
                 Assembly: plan_assembly (exactly one vector, unique fragment names). \
                 BCA: fit_bca_standard_curve, estimate_protein. \
                 Status: labzen_status."
                    .into(),
            ),
        }
    }
}
