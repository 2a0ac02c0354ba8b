//! Shared utilities for command implementations.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::cli::ScoringArgs;
use crate::config::Config;
use crate::constants::DEFAULT_LANGUAGE;
use crate::evaluator::CodeEvaluator;
use crate::language::Language;
use crate::scoring::{Profile, ScoreWeights, ScoringConfig};

/// Marker for "read from standard input".
pub const STDIN_MARKER: &str = "-";

/// Reads a source argument: a file path, or stdin for `-`.
pub fn read_source(source: &str) -> Result<String> {
    if source == STDIN_MARKER {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        return Ok(buf);
    }
    let path = Path::new(source);
    if !path.exists() {
        bail!("The file '{}' does not exist.", path.display());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))
}

/// Directory to start configuration discovery from for a source argument.
pub fn config_root(source: &str) -> &Path {
    if source == STDIN_MARKER {
        Path::new(".")
    } else {
        Path::new(source)
    }
}

/// Loads the configuration file that applies to `start`, reporting it when verbose.
pub fn load_config(start: &Path, verbose: bool) -> Result<Config> {
    let config = Config::try_load_from_path(start)?;
    if verbose {
        match &config.config_file_path {
            Some(path) => eprintln!("[VERBOSE] Using config file: {}", path.display()),
            None => eprintln!("[VERBOSE] No config file found, using defaults"),
        }
    }
    Ok(config)
}

/// Layers command-line overrides on top of the file configuration and validates the result.
pub fn resolve_scoring(config: &Config, args: &ScoringArgs) -> Result<ScoringConfig> {
    let mut section = config.codebleu.clone();
    if args.strict {
        section.profile = Some(Profile::Strict);
    }
    let mut scoring = section.scoring_config()?;
    if let Some(ngram) = args.ngram {
        scoring = scoring.with_ngram(ngram);
    }
    if let Some(policy) = args.keyword_policy {
        scoring = scoring.with_keyword_policy(policy);
    }
    if let Some(boost) = args.keyword_boost {
        scoring = scoring.with_keyword_boost(boost);
    }
    if let Some(syntax) = args.syntax {
        scoring = scoring.with_syntax(syntax);
    }
    if let Some(dataflow) = args.dataflow {
        scoring = scoring.with_dataflow(dataflow);
    }
    // A framing switch resets the weights, so explicit ones are applied last.
    let weights = match args.weights {
        Some(weights) => Some(weights),
        None => section
            .weights
            .as_deref()
            .map(ScoreWeights::from_slice)
            .transpose()?,
    };
    if let Some(weights) = weights {
        scoring = scoring.with_weights(weights);
    }
    Ok(scoring.validated()?)
}

/// Builds the evaluator for a resolved configuration.
pub fn build_evaluator(config: &Config, args: &ScoringArgs, verbose: bool) -> Result<CodeEvaluator> {
    let scoring = resolve_scoring(config, args)?;
    if verbose {
        eprintln!(
            "[VERBOSE] Policies: ngram={} keyword={} (boost {}) syntax={} dataflow={}",
            scoring.ngram,
            scoring.keyword_policy,
            scoring.keyword_boost,
            scoring.syntax,
            scoring.dataflow
        );
        eprintln!("[VERBOSE] Weights: {:?}", scoring.weights.as_array());
    }
    Ok(CodeEvaluator::with_catalog(
        scoring,
        config.codebleu.keyword_catalog(),
    ))
}

/// Picks the language tag: explicit flag, then file extension, then configuration, then the default.
pub fn resolve_language(explicit: Option<String>, hint: Option<&str>, config: &Config) -> String {
    if let Some(tag) = explicit {
        return tag;
    }
    if let Some(lang) = hint
        .filter(|h| *h != STDIN_MARKER)
        .and_then(|h| Language::from_path(Path::new(h)))
    {
        return lang.name().to_owned();
    }
    config
        .codebleu
        .default_language
        .clone()
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned())
}

/// Writes output to either a file or a writer.
pub fn write_output<W: Write>(
    writer: &mut W,
    content: &str,
    output_file: Option<String>,
) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = fs::File::create(path)?;
        writeln!(file, "{content}")?;
    } else {
        writeln!(writer, "{content}")?;
    }
    Ok(())
}
