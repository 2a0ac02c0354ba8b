//! codebleu MCP Server
//!
//! This binary exposes codebleu's similarity scoring as MCP tools.

use anyhow::Result;

/// Main entry point for the MCP server.
///
/// Starts the server using stdio transport, which is the standard way
/// for MCP clients like Claude Desktop to communicate with servers.
#[tokio::main]
async fn main() -> Result<()> {
    codebleu_mcp::serve_stdio().await
}
