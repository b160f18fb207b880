//! LabZen Tools module
//!
//! MCP tool implementations over the lab calculators.

pub mod assembly;
pub mod molarity;
pub mod protein;
pub mod status;
