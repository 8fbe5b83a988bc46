//! chat2md MCP Server
//!
//! This binary provides a Model Context Protocol (MCP) server for
//! conversation export. It exposes the convert/download/copy tools to AI
//! assistants and other MCP clients over stdio.

use chat2md::mcp::ExportServer;
use rmcp::{ServiceExt, transport::stdio};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    eprintln!("chat2md MCP Server v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("Transport: stdio");
    eprintln!("Ready to accept MCP connections via stdio");

    let service = ExportServer::new();
    let server = service.serve(stdio()).await?;
    let quit_reason = server.waiting().await?;
    eprintln!("Server quit with reason: {:?}", quit_reason);

    Ok(())
}
