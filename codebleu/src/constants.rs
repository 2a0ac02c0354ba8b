use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Name of the project-level configuration file.
pub const CONFIG_FILENAME: &str = ".codebleu.toml";

/// Name of the Python project file that may carry a `[tool.codebleu]` table.
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";

/// Language tag used when a caller names none.
pub const DEFAULT_LANGUAGE: &str = "python";

/// Highest n-gram order used by the n-gram based metrics.
pub const MAX_NGRAM_ORDER: usize = 4;

/// Decimal places kept when a score is presented to a caller.
pub const REPORT_PRECISION: i32 = 4;

/// Tolerance used when checking that scoring weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Sub-scores below this value produce a targeted recommendation.
pub const RECOMMENDATION_FLOOR: f64 = 0.5;

/// All sub-scores at or above this value produce the positive recommendation.
pub const PRODUCTION_READY_FLOOR: f64 = 0.7;

/// Regex matching the comments removed before tokenization.
///
/// Block comments are matched first so that `/* // */` is removed as a whole.
/// Neither form is string-literal aware.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"(?s)/\*.*?\*/|(?:#|//)[^\n]*").expect("Invalid comment regex pattern")
    })
}

/// Regex splitting source text into word runs and single symbols.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"\w+|[^\w\s]").expect("Invalid token regex pattern"))
}

/// Regex for identifier-shaped tokens (a word run not starting with a digit).
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"^[^\W\d]\w*$").expect("Invalid identifier regex pattern"))
}

/// Operator symbols compared by the symbol-overlap syntax metric.
pub fn get_operator_symbols() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        ["=", "==", "!=", "<", ">", "+", "-", "*", "/", "%"]
            .into_iter()
            .collect()
    })
}

/// Bracket and separator symbols compared by the symbol-overlap syntax metric.
pub fn get_brace_symbols() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        ["(", ")", "{", "}", "[", "]", ";", ","]
            .into_iter()
            .collect()
    })
}

pub use get_brace_symbols as BRACE_SYMBOLS;
pub use get_comment_re as COMMENT_RE;
pub use get_identifier_re as IDENTIFIER_RE;
pub use get_operator_symbols as OPERATOR_SYMBOLS;
pub use get_token_re as TOKEN_RE;
