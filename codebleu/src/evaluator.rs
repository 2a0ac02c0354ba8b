//! One-call evaluation: score a pair, derive the verdict, shape the report.

use serde::{Deserialize, Serialize};

use crate::constants::REPORT_PRECISION;
use crate::language::{KeywordCatalog, Language};
use crate::scoring::{ScoreBundle, ScoringConfig, SimilarityScorer};
use crate::verdict::{QualityTier, Verdict};

/// Errors for requests that cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    /// Generated or reference code is empty after trimming.
    #[error("Both generated and reference code are required")]
    MissingCode,
}

/// Input record accepted by the evaluator (JSON, camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    /// Optional caller-supplied identifier, echoed in batch output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Code under evaluation.
    #[serde(default)]
    pub generated_code: String,
    /// Code to compare against.
    #[serde(default)]
    pub reference_code: String,
    /// Language tag such as `python` or `cpp`.
    #[serde(default)]
    pub language: String,
}

impl EvaluationRequest {
    /// Build a request without an id.
    #[must_use]
    pub fn new(
        generated_code: impl Into<String>,
        reference_code: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            generated_code: generated_code.into(),
            reference_code: reference_code.into(),
            language: language.into(),
        }
    }

    /// Reject requests whose code is blank.
    pub fn validate(&self) -> Result<(), EvaluationError> {
        if self.generated_code.trim().is_empty() || self.reference_code.trim().is_empty() {
            return Err(EvaluationError::MissingCode);
        }
        Ok(())
    }
}

/// Serialized evaluation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    /// Weighted blend of the sub-scores, rounded to four decimals.
    ///
    /// Rounding happens after the tier is chosen, so a raw `0.79996` reads
    /// `0.8` here while `quality` stays `Good`.
    pub composite_score: f64,
    /// N-gram precision.
    pub ngram_match: f64,
    /// Keyword-weighted precision.
    pub weighted_ngram_match: f64,
    /// Structural overlap.
    pub syntax_match: f64,
    /// Identifier overlap.
    pub dataflow_match: f64,
    /// Tier label, e.g. `"Good"`, from the unrounded composite.
    pub quality: QualityTier,
    /// Guidance attached to the tier.
    pub quality_description: String,
    /// Ordered feedback messages.
    pub recommendations: Vec<String>,
    /// Canonical language name the request resolved to.
    pub language: Language,
}

impl EvaluationReport {
    /// Build a report from raw scores; floats are rounded to the report precision.
    ///
    /// The verdict is taken from the unrounded bundle.
    #[must_use]
    pub fn from_bundle(bundle: &ScoreBundle, language: Language) -> Self {
        let verdict = Verdict::from_bundle(bundle);
        let rounded = bundle.rounded(REPORT_PRECISION);
        Self {
            composite_score: rounded.composite,
            ngram_match: rounded.ngram_match,
            weighted_ngram_match: rounded.weighted_ngram_match,
            syntax_match: rounded.syntax_match,
            dataflow_match: rounded.dataflow_match,
            quality: verdict.quality,
            quality_description: verdict.quality.description().to_owned(),
            recommendations: verdict.messages(),
            language,
        }
    }
}

/// Scorer plus verdict, ready to share across threads.
#[derive(Debug, Clone, Default)]
pub struct CodeEvaluator {
    scorer: SimilarityScorer,
}

impl CodeEvaluator {
    /// Evaluator for a scoring configuration and the built-in keywords.
    #[must_use]
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            scorer: SimilarityScorer::new(config),
        }
    }

    /// Evaluator with a custom keyword catalog.
    #[must_use]
    pub fn with_catalog(config: ScoringConfig, catalog: KeywordCatalog) -> Self {
        Self {
            scorer: SimilarityScorer::with_catalog(config, catalog),
        }
    }

    /// Underlying scorer.
    #[must_use]
    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    /// Score `generated` against `reference`.
    ///
    /// Never fails: empty inputs follow the per-metric conventions and unknown
    /// language tags score without keywords.
    #[must_use]
    pub fn evaluate(&self, generated: &str, reference: &str, language: &str) -> EvaluationReport {
        let language = Language::from_tag(language);
        let bundle = self.scorer.score(generated, reference, language);
        EvaluationReport::from_bundle(&bundle, language)
    }

    /// Validate a request, then evaluate it.
    pub fn evaluate_request(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationReport, EvaluationError> {
        request.validate()?;
        Ok(self.evaluate(
            &request.generated_code,
            &request.reference_code,
            &request.language,
        ))
    }
}
