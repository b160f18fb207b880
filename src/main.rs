//! LabZen
//!
//! An MCP server exposing laboratory calculators over stdio.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

mod build_info;
mod lab;
mod mcp;
mod tools;

use mcp::LabZenService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the MCP protocol
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("labzen=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let service = LabZenService::new();
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    tracing::info!("LabZen MCP server ready");

    server.waiting().await?;

    Ok(())
}
