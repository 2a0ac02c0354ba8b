//! Command-line interface entry point for `codebleu`.

use anyhow::Result;
use codebleu::entry_point;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // The MCP server needs an async runtime, so it is started here rather than in the library.
    if args.first().map(String::as_str) == Some("mcp-server") {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(codebleu_mcp::serve_stdio())?;
        return Ok(());
    }

    let code = entry_point::run_with_args(args)?;
    std::process::exit(code);
}
