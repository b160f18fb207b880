//! LabZen Library
//!
//! Laboratory calculators (molarity, DNA assembly, BCA protein assay) and the
//! MCP tool layer that exposes them.

pub mod build_info;
pub mod lab;
pub mod mcp;
pub mod tools;
