use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::scoring::{DataflowFraming, KeywordPolicy, NgramPolicy, ScoreWeights, SyntaxPolicy};

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.codebleu.toml):
  Create this file in your project root to set defaults.
  A [tool.codebleu] table in pyproject.toml works too.

  [codebleu]
  profile = \"default\"            # default | strict
  ngram = \"arithmetic\"           # arithmetic | geometric
  keyword_policy = \"token-set\"   # token-set | ngram
  keyword_boost = 2.0            # Weight of keyword tokens (>= 1.0)
  syntax = \"keyword-coverage\"    # keyword-coverage | symbol-overlap
  dataflow = \"additive\"          # additive | multiplicative
  weights = [0.4, 0.4, 0.1, 0.1] # ngram, weighted, syntax, dataflow
  default_language = \"python\"

  [codebleu.keywords]
  python = [\"self\", \"print\"]   # Extra keywords per language

  Command-line flags override the file; the file overrides the profile.
";

/// Scoring policy overrides shared by `score` and `batch`.
#[derive(Args, Debug, Default, Clone)]
pub struct ScoringArgs {
    /// Start from the strict profile (BLEU-4, symbol overlap, identifier penalty).
    #[arg(long)]
    pub strict: bool,

    /// N-gram composition (arithmetic, geometric).
    #[arg(long)]
    pub ngram: Option<NgramPolicy>,

    /// Keyword weighting (token-set, ngram).
    #[arg(long)]
    pub keyword_policy: Option<KeywordPolicy>,

    /// Weight factor for keyword tokens.
    #[arg(long)]
    pub keyword_boost: Option<f64>,

    /// Syntax measure (keyword-coverage, symbol-overlap).
    #[arg(long)]
    pub syntax: Option<SyntaxPolicy>,

    /// Identifier framing (additive, multiplicative).
    #[arg(long)]
    pub dataflow: Option<DataflowFraming>,

    /// Sub-score weights as "ngram,weighted,syntax,dataflow".
    #[arg(long)]
    pub weights: Option<ScoreWeights>,
}

/// Options for output formatting.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Save output to file.
    #[arg(long, short = 'O')]
    pub output_file: Option<String>,
}

/// Command line interface configuration using `clap`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "codebleu - CodeBLEU-style similarity scoring for generated code",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    #[command(subcommand)]
    /// The subcommand to execute.
    pub command: Commands,

    /// Enable verbose diagnostics on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
/// Available subcommands.
pub enum Commands {
    /// Score a generated snippet against a reference snippet
    Score {
        /// File with the generated code ("-" reads stdin).
        generated: String,

        /// File with the reference code ("-" reads stdin).
        reference: String,

        /// Language tag (python, cpp, java, javascript).
        #[arg(long, short = 'l')]
        language: Option<String>,

        /// Scoring policy overrides.
        #[command(flatten)]
        scoring: ScoringArgs,

        /// Output options (json, output file).
        #[command(flatten)]
        output: OutputOptions,
    },
    /// Score many pairs from a JSON array or JSON Lines file
    Batch {
        /// File of evaluation requests ("-" reads stdin).
        input: String,

        /// Language for requests that do not name one.
        #[arg(long, short = 'l')]
        language: Option<String>,

        /// Scoring policy overrides.
        #[command(flatten)]
        scoring: ScoringArgs,

        /// Output options (json, output file).
        #[command(flatten)]
        output: OutputOptions,

        /// Exit with code 1 if the mean composite score is below this value.
        #[arg(long)]
        fail_under: Option<f64>,
    },
    /// List supported languages and their keywords
    Languages {
        /// Output JSON.
        #[arg(long, short = 'j')]
        json: bool,

        /// Print the full keyword list of each language.
        #[arg(long, short = 'k')]
        keywords: bool,

        /// Directory to start the configuration search from.
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Start MCP server for LLM integration (Claude Desktop, VS Code Copilot, etc.)
    #[command(name = "mcp-server")]
    McpServer,
}
