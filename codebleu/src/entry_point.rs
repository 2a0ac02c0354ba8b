use crate::cli::{Cli, Commands};
use crate::commands::{run_batch, run_languages, run_score, BatchOptions, ScoreOptions};
use anyhow::Result;
use clap::Parser;
use std::path::Path;

/// Runs codebleu with the given arguments.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run codebleu with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
/// Command failures are reported on stderr and turned into exit code `1`.
///
/// # Errors
///
/// Returns an error if writing help or version text fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["codebleu".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(1);
            }
        },
    };

    let verbose = cli_var.verbose;
    if verbose {
        eprintln!("[VERBOSE] codebleu v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
        eprintln!("[VERBOSE] Executing subcommand: {:?}", cli_var.command);
        eprintln!();
    }

    let outcome = match cli_var.command {
        Commands::Score {
            generated,
            reference,
            language,
            scoring,
            output,
        } => run_score(
            ScoreOptions {
                generated,
                reference,
                language,
                scoring,
                output,
                verbose,
            },
            &mut *writer,
        ),
        Commands::Batch {
            input,
            language,
            scoring,
            output,
            fail_under,
        } => run_batch(
            BatchOptions {
                input,
                language,
                scoring,
                output,
                fail_under,
                verbose,
            },
            &mut *writer,
        ),
        Commands::Languages {
            json,
            keywords,
            root,
        } => run_languages(
            root.as_deref().unwrap_or(Path::new(".")),
            json,
            keywords,
            verbose,
            &mut *writer,
        )
        .map(|()| 0),
        Commands::McpServer => {
            // Handled by the codebleu launcher binary before reaching here.
            eprintln!("Error: mcp-server command should be handled by codebleu-cli directly.");
            eprintln!("If you're seeing this, please use the codebleu binary.");
            Ok(1)
        }
    };

    match outcome {
        Ok(code) => Ok(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            Ok(1)
        }
    }
}
