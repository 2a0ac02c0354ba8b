//! codebleu MCP server library.
//!
//! Exposes the scoring engine as MCP tools over stdio so that MCP clients
//! (Claude Desktop, Cursor, VS Code) can evaluate generated code.

pub mod tools;

use anyhow::Result;
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tools::CodeBleuServer;

/// Serves the MCP tools on stdin/stdout until the client disconnects.
///
/// # Errors
///
/// Returns an error if the transport fails to start or the session ends abnormally.
pub async fn serve_stdio() -> Result<()> {
    let server = CodeBleuServer::new();

    let transport = (stdin(), stdout());
    let service = server.serve(transport).await?;

    service.waiting().await?;

    Ok(())
}
