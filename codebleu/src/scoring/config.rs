//! Configuration for similarity scoring.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::WEIGHT_SUM_TOLERANCE;

/// Errors raised while building a scoring configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A weight is negative, NaN or infinite.
    #[error("Invalid weight for {name}: {value}")]
    InvalidWeight {
        /// Which weight was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The weights that take part in the composite do not sum to one.
    #[error("Weights must sum to 1.0 (got {0:.4})")]
    WeightSum(f64),
    /// Weight lists must name all four sub-scores.
    #[error("Expected 4 weights (ngram, weighted, syntax, dataflow), got {0}")]
    WeightCount(usize),
    /// A weight list entry is not a number.
    #[error("Invalid weight list entry: {0:?}")]
    WeightParse(String),
    /// Keyword boost must be a finite factor of at least 1.0.
    #[error("Invalid keyword boost: {0} (must be finite and >= 1.0)")]
    InvalidBoost(f64),
    /// A policy name that none of the known policies match.
    #[error("Unknown {kind} policy: {value:?} (expected one of: {expected})")]
    UnknownPolicy {
        /// The policy family (`ngram`, `keyword`, ...).
        kind: &'static str,
        /// The rejected name.
        value: String,
        /// Accepted names, comma separated.
        expected: String,
    },
    /// A configuration file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// A configuration file is not valid TOML for this schema.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },
}

macro_rules! policy_names {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Configuration name of this policy.
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().replace('_', "-").as_str() {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(ConfigError::UnknownPolicy {
                        kind: $kind,
                        value: s.to_owned(),
                        expected: [$($name),+].join(", "),
                    }),
                }
            }
        }
    };
}

/// How per-order n-gram precisions are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NgramPolicy {
    /// Mean of the orders the candidate actually has.
    #[default]
    Arithmetic,
    /// BLEU-4: geometric mean of all four orders times a brevity penalty.
    Geometric,
}

policy_names!(NgramPolicy, "ngram", {
    Arithmetic => "arithmetic",
    Geometric => "geometric",
});

/// How keyword-bearing tokens are weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeywordPolicy {
    /// Weighted clipped precision over candidate n-grams of every order.
    Ngram,
    /// Weighted overlap of token sets, relative to the reference set.
    #[default]
    TokenSet,
}

policy_names!(KeywordPolicy, "keyword", {
    Ngram => "ngram",
    TokenSet => "token-set",
});

impl KeywordPolicy {
    /// Boost applied to keywords when no explicit boost is configured.
    #[must_use]
    pub const fn default_boost(&self) -> f64 {
        match self {
            Self::Ngram => 1.1,
            Self::TokenSet => 2.0,
        }
    }
}

/// How structural similarity is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyntaxPolicy {
    /// Fraction of reference keywords that the candidate also uses.
    #[default]
    KeywordCoverage,
    /// Multiset overlap of operators and of braces/separators.
    SymbolOverlap,
}

policy_names!(SyntaxPolicy, "syntax", {
    KeywordCoverage => "keyword-coverage",
    SymbolOverlap => "symbol-overlap",
});

/// How identifier overlap enters the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataflowFraming {
    /// A weighted term of the composite sum.
    #[default]
    Additive,
    /// A factor applied to the blend of the other three sub-scores.
    Multiplicative,
}

policy_names!(DataflowFraming, "dataflow", {
    Additive => "additive",
    Multiplicative => "multiplicative",
});

impl DataflowFraming {
    /// Weights used when none are configured explicitly.
    #[must_use]
    pub fn default_weights(&self) -> ScoreWeights {
        match self {
            Self::Additive => ScoreWeights::default(),
            Self::Multiplicative => ScoreWeights::penalty_default(),
        }
    }
}

/// Weights of the four sub-scores in the composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// N-gram precision weight.
    pub ngram: f64,
    /// Weighted keyword precision weight.
    pub weighted_ngram: f64,
    /// Syntax overlap weight.
    pub syntax: f64,
    /// Identifier overlap weight (unused under [`DataflowFraming::Multiplicative`]).
    pub dataflow: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            ngram: 0.4,
            weighted_ngram: 0.4,
            syntax: 0.1,
            dataflow: 0.1,
        }
    }
}

impl ScoreWeights {
    /// Weights for the multiplicative framing: `0.4·bleu + 0.4·keyword + 0.2·syntax`.
    #[must_use]
    pub const fn penalty_default() -> Self {
        Self {
            ngram: 0.4,
            weighted_ngram: 0.4,
            syntax: 0.2,
            dataflow: 0.0,
        }
    }

    /// Build from `[ngram, weighted, syntax, dataflow]`.
    pub fn from_slice(values: &[f64]) -> Result<Self, ConfigError> {
        match values {
            [ngram, weighted_ngram, syntax, dataflow] => Ok(Self {
                ngram: *ngram,
                weighted_ngram: *weighted_ngram,
                syntax: *syntax,
                dataflow: *dataflow,
            }),
            _ => Err(ConfigError::WeightCount(values.len())),
        }
    }

    /// Weights as `[ngram, weighted, syntax, dataflow]`.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 4] {
        [self.ngram, self.weighted_ngram, self.syntax, self.dataflow]
    }

    /// Check that each weight is usable and that the active ones sum to one.
    pub fn validate(&self, framing: DataflowFraming) -> Result<(), ConfigError> {
        let named = [
            ("ngram", self.ngram),
            ("weighted_ngram", self.weighted_ngram),
            ("syntax", self.syntax),
            ("dataflow", self.dataflow),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        let sum = match framing {
            DataflowFraming::Additive => self.ngram + self.weighted_ngram + self.syntax + self.dataflow,
            DataflowFraming::Multiplicative => self.ngram + self.weighted_ngram + self.syntax,
        };
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(())
    }
}

impl FromStr for ScoreWeights {
    type Err = ConfigError;

    /// Parse a comma separated list such as `0.4,0.4,0.1,0.1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::WeightParse(part.trim().to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_slice(&values)
    }
}

/// Named bundles of policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// Arithmetic n-grams, token-set keywords, keyword coverage, additive identifiers.
    #[default]
    Default,
    /// BLEU-4, n-gram keywords, symbol overlap, multiplicative identifier penalty.
    Strict,
}

policy_names!(Profile, "profile", {
    Default => "default",
    Strict => "strict",
});

/// Complete scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// N-gram composition.
    pub ngram: NgramPolicy,
    /// Keyword weighting.
    pub keyword_policy: KeywordPolicy,
    /// Weight factor for keyword-bearing tokens or n-grams.
    pub keyword_boost: f64,
    /// Structural similarity measure.
    pub syntax: SyntaxPolicy,
    /// How identifier overlap enters the composite.
    pub dataflow: DataflowFraming,
    /// Sub-score weights.
    pub weights: ScoreWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::for_profile(Profile::Default)
    }
}

impl ScoringConfig {
    /// Configuration of a named profile.
    #[must_use]
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Default => Self {
                ngram: NgramPolicy::Arithmetic,
                keyword_policy: KeywordPolicy::TokenSet,
                keyword_boost: KeywordPolicy::TokenSet.default_boost(),
                syntax: SyntaxPolicy::KeywordCoverage,
                dataflow: DataflowFraming::Additive,
                weights: ScoreWeights::default(),
            },
            Profile::Strict => Self::strict(),
        }
    }

    /// The BLEU-4 flavoured configuration with a multiplicative identifier penalty.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            ngram: NgramPolicy::Geometric,
            keyword_policy: KeywordPolicy::Ngram,
            keyword_boost: KeywordPolicy::Ngram.default_boost(),
            syntax: SyntaxPolicy::SymbolOverlap,
            dataflow: DataflowFraming::Multiplicative,
            weights: ScoreWeights::penalty_default(),
        }
    }

    /// Builder: set n-gram composition.
    #[must_use]
    pub const fn with_ngram(mut self, policy: NgramPolicy) -> Self {
        self.ngram = policy;
        self
    }

    /// Builder: set keyword weighting; resets the boost to the policy default.
    #[must_use]
    pub const fn with_keyword_policy(mut self, policy: KeywordPolicy) -> Self {
        self.keyword_policy = policy;
        self.keyword_boost = policy.default_boost();
        self
    }

    /// Builder: set the keyword boost factor.
    #[must_use]
    pub const fn with_keyword_boost(mut self, boost: f64) -> Self {
        self.keyword_boost = boost;
        self
    }

    /// Builder: set the syntax measure.
    #[must_use]
    pub const fn with_syntax(mut self, policy: SyntaxPolicy) -> Self {
        self.syntax = policy;
        self
    }

    /// Builder: set the identifier framing.
    ///
    /// Switching framing resets the weights to that framing's defaults, so
    /// explicit weights must be set afterwards.
    #[must_use]
    pub fn with_dataflow(mut self, framing: DataflowFraming) -> Self {
        if framing != self.dataflow {
            self.weights = framing.default_weights();
        }
        self.dataflow = framing;
        self
    }

    /// Builder: set the sub-score weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Check the configuration, returning it unchanged when valid.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if !self.keyword_boost.is_finite() || self.keyword_boost < 1.0 {
            return Err(ConfigError::InvalidBoost(self.keyword_boost));
        }
        self.weights.validate(self.dataflow)?;
        Ok(self)
    }
}
