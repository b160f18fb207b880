//! Assembly MCP Tools
//!
//! Pipetting plan for a DNA assembly reaction.

use serde::Serialize;

use crate::lab::{compute_assembly_protocol, AssemblyParams, AssemblyResult, Fragment};

/// Response for plan_assembly
#[derive(Debug, Serialize)]
pub struct PlanAssemblyResponse {
    #[serde(flatten)]
    pub plan: AssemblyResult,
    pub total_fragment_volume: f64,
    pub fragment_count: usize,
    pub params: AssemblyParams,
}

pub fn plan_assembly(
    fragments: Vec<Fragment>,
    params: AssemblyParams,
) -> Result<PlanAssemblyResponse, String> {
    tracing::debug!(
        "Planning assembly: {} fragments, {} µL reaction",
        fragments.len(),
        params.total_reaction_volume
    );

    let plan = compute_assembly_protocol(&fragments, &params).map_err(|e| {
        tracing::warn!("plan_assembly rejected: {}", e);
        e.to_string()
    })?;

    Ok(PlanAssemblyResponse {
        total_fragment_volume: plan.total_fragment_volume(),
        fragment_count: plan.fragment_volumes.len(),
        plan,
        params,
    })
}
