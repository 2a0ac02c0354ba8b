//! Single-pair scoring command.

use super::utils::{
    build_evaluator, config_root, load_config, read_source, resolve_language, write_output,
    STDIN_MARKER,
};
use crate::cli::{OutputOptions, ScoringArgs};
use crate::evaluator::EvaluationRequest;

use anyhow::{bail, Result};
use std::io::Write;

/// Options for the `score` command.
#[derive(Debug, Default)]
pub struct ScoreOptions {
    /// Generated code source (path or `-`).
    pub generated: String,
    /// Reference code source (path or `-`).
    pub reference: String,
    /// Explicit language tag.
    pub language: Option<String>,
    /// Policy overrides.
    pub scoring: ScoringArgs,
    /// Output format and destination.
    pub output: OutputOptions,
    /// Verbose diagnostics.
    pub verbose: bool,
}

/// Scores one generated snippet against one reference.
///
/// Returns the process exit code: `1` when either input is blank.
///
/// # Errors
///
/// Returns an error if an input cannot be read, the configuration is invalid,
/// or JSON serialization fails.
pub fn run_score<W: Write>(options: ScoreOptions, mut writer: W) -> Result<i32> {
    if options.generated == STDIN_MARKER && options.reference == STDIN_MARKER {
        bail!("At most one input can be read from stdin.");
    }

    // A file path, if any, drives config discovery and the language guess.
    let anchor = if options.generated == STDIN_MARKER {
        options.reference.as_str()
    } else {
        options.generated.as_str()
    };
    let config = load_config(config_root(anchor), options.verbose)?;
    let evaluator = build_evaluator(&config, &options.scoring, options.verbose)?;
    let language = resolve_language(options.language.clone(), Some(anchor), &config);
    let request = EvaluationRequest::new(
        read_source(&options.generated)?,
        read_source(&options.reference)?,
        language,
    );

    if options.verbose {
        eprintln!(
            "[VERBOSE] Language: {} | generated {} bytes | reference {} bytes",
            request.language,
            request.generated_code.len(),
            request.reference_code.len()
        );
    }

    let report = match evaluator.evaluate_request(&request) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(1);
        }
    };

    if options.output.json {
        write_output(
            &mut writer,
            &serde_json::to_string_pretty(&report)?,
            options.output.output_file,
        )?;
    } else if let Some(path) = options.output.output_file {
        let mut buf = Vec::new();
        crate::output::print_report(&mut buf, &report)?;
        write_output(&mut writer, String::from_utf8_lossy(&buf).trim_end(), Some(path))?;
    } else {
        crate::output::print_report(&mut writer, &report)?;
    }
    Ok(0)
}
