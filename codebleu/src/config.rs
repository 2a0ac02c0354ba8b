use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILENAME, PYPROJECT_FILENAME};
use crate::language::{KeywordCatalog, Language};
use crate::scoring::{
    ConfigError, DataflowFraming, KeywordPolicy, NgramPolicy, Profile, ScoreWeights,
    ScoringConfig, SyntaxPolicy,
};

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The `[codebleu]` section.
    pub codebleu: CodeBleuConfig,
    /// The path to the configuration file this was loaded from.
    /// `None` when defaults are in use.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
/// Scoring options read from a configuration file. Unset keys fall back to the profile.
pub struct CodeBleuConfig {
    /// Named policy bundle to start from.
    pub profile: Option<Profile>,
    /// N-gram composition.
    pub ngram: Option<NgramPolicy>,
    /// Keyword weighting.
    pub keyword_policy: Option<KeywordPolicy>,
    /// Keyword weight factor; defaults to the policy's own factor.
    pub keyword_boost: Option<f64>,
    /// Structural similarity measure.
    pub syntax: Option<SyntaxPolicy>,
    /// Identifier framing.
    pub dataflow: Option<DataflowFraming>,
    /// `[ngram, weighted, syntax, dataflow]`.
    pub weights: Option<Vec<f64>>,
    /// Language used when none is given on the command line.
    pub default_language: Option<String>,
    /// Extra keywords per language tag.
    #[serde(default)]
    pub keywords: BTreeMap<String, Vec<String>>,
}

impl CodeBleuConfig {
    /// Scoring configuration described by this section.
    ///
    /// The result is not validated yet so that command-line overrides can still
    /// be layered on top.
    pub fn scoring_config(&self) -> Result<ScoringConfig, ConfigError> {
        let mut config = ScoringConfig::for_profile(self.profile.unwrap_or_default());
        if let Some(ngram) = self.ngram {
            config = config.with_ngram(ngram);
        }
        if let Some(policy) = self.keyword_policy {
            config = config.with_keyword_policy(policy);
        }
        if let Some(boost) = self.keyword_boost {
            config = config.with_keyword_boost(boost);
        }
        if let Some(syntax) = self.syntax {
            config = config.with_syntax(syntax);
        }
        if let Some(dataflow) = self.dataflow {
            config = config.with_dataflow(dataflow);
        }
        if let Some(weights) = &self.weights {
            config = config.with_weights(ScoreWeights::from_slice(weights)?);
        }
        Ok(config)
    }

    /// Built-in keywords extended with the configured extras.
    ///
    /// Entries whose tag is not a known language are ignored.
    #[must_use]
    pub fn keyword_catalog(&self) -> KeywordCatalog {
        self.keywords
            .iter()
            .fold(KeywordCatalog::builtin(), |catalog, (tag, words)| {
                catalog.with_extra(Language::from_tag(tag), words)
            })
    }
}

#[derive(Debug, Deserialize, Clone)]
struct PyProject {
    #[serde(default)]
    tool: Option<ToolConfig>,
}

#[derive(Debug, Deserialize, Clone)]
struct ToolConfig {
    codebleu: Option<CodeBleuConfig>,
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: serde::de::DeserializeOwned>(path: &Path, content: &str) -> Result<T, ConfigError> {
    toml::from_str::<T>(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Loads configuration from default locations (.codebleu.toml or pyproject.toml in current dir).
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// Unreadable or malformed files fall back to defaults.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        Self::try_load_from_path(path).unwrap_or_default()
    }

    /// Like [`Config::load_from_path`], but reports broken files.
    ///
    /// A `pyproject.toml` without a `[tool.codebleu]` table is skipped.
    pub fn try_load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            // 1. Try CONFIG_FILENAME
            let codebleu_toml = current.join(CONFIG_FILENAME);
            if codebleu_toml.exists() {
                let content = read(&codebleu_toml)?;
                let mut config: Config = parse(&codebleu_toml, &content)?;
                config.config_file_path = Some(codebleu_toml);
                return Ok(config);
            }

            // 2. Try PYPROJECT_FILENAME
            let pyproject_toml = current.join(PYPROJECT_FILENAME);
            if pyproject_toml.exists() {
                let content = read(&pyproject_toml)?;
                let pyproject: PyProject = parse(&pyproject_toml, &content)?;
                if let Some(codebleu) = pyproject.tool.and_then(|tool| tool.codebleu) {
                    return Ok(Config {
                        codebleu,
                        config_file_path: Some(pyproject_toml),
                    });
                }
            }

            if !current.pop() {
                break;
            }
        }

        Ok(Config::default())
    }
}
