//! Similarity scoring for generated code.
//!
//! Four sub-metrics are computed from the tokenized candidate and reference:
//! - N-gram precision (arithmetic mean or BLEU-4)
//! - Keyword-weighted precision
//! - Syntax overlap (keyword coverage or operator/brace overlap)
//! - Identifier overlap ("dataflow"), additive or as a multiplicative penalty
//!
//! The scorer holds only immutable configuration and is safe to share across threads.

mod config;
pub mod metrics;
mod types;

// Re-exports
pub use config::{
    ConfigError, DataflowFraming, KeywordPolicy, NgramPolicy, Profile, ScoreWeights,
    ScoringConfig, SyntaxPolicy,
};
pub use types::{round_to, ScoreBundle};

use crate::language::{KeywordCatalog, Language};
use std::borrow::Cow;
use crate::tokenizer::{tokenize, TokenSequence};

/// Computes a [`ScoreBundle`] for a candidate/reference pair.
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    config: ScoringConfig,
    catalog: Cow<'static, KeywordCatalog>,
}

impl SimilarityScorer {
    /// Create a scorer that borrows the process-wide built-in keyword catalog.
    #[must_use]
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            catalog: Cow::Borrowed(KeywordCatalog::shared()),
        }
    }

    /// Create with a custom keyword catalog.
    #[must_use]
    pub fn with_catalog(config: ScoringConfig, catalog: KeywordCatalog) -> Self {
        Self {
            config,
            catalog: Cow::Owned(catalog),
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Keyword catalog in use.
    #[must_use]
    pub fn catalog(&self) -> &KeywordCatalog {
        &self.catalog
    }

    /// Tokenize both inputs and score them.
    #[must_use]
    pub fn score(&self, candidate: &str, reference: &str, language: Language) -> ScoreBundle {
        self.score_tokens(&tokenize(candidate), &tokenize(reference), language)
    }

    /// Score already tokenized inputs.
    #[must_use]
    pub fn score_tokens(
        &self,
        candidate: &TokenSequence,
        reference: &TokenSequence,
        language: Language,
    ) -> ScoreBundle {
        let keywords = self.catalog.keywords(language);
        let cfg = &self.config;

        let ngram_match = metrics::ngram_match(candidate, reference, cfg.ngram);
        let weighted_ngram_match = metrics::weighted_ngram_match(
            candidate,
            reference,
            keywords,
            cfg.keyword_policy,
            cfg.keyword_boost,
        );
        let syntax_match = metrics::syntax_match(candidate, reference, keywords, cfg.syntax);
        let dataflow_match = metrics::dataflow_match(candidate, reference, keywords);

        let mut bundle = ScoreBundle {
            ngram_match,
            weighted_ngram_match,
            syntax_match,
            dataflow_match,
            composite: 0.0,
        };
        bundle.composite = self.composite(&bundle);
        bundle
    }

    /// Blend the sub-scores according to the weights and dataflow framing.
    ///
    /// Clamped to `[0, 1]` so that an unvalidated configuration cannot leave the range.
    #[must_use]
    pub fn composite(&self, bundle: &ScoreBundle) -> f64 {
        let w = &self.config.weights;
        let blend = w.ngram * bundle.ngram_match
            + w.weighted_ngram * bundle.weighted_ngram_match
            + w.syntax * bundle.syntax_match;
        let composite = match self.config.dataflow {
            DataflowFraming::Additive => blend + w.dataflow * bundle.dataflow_match,
            DataflowFraming::Multiplicative => blend * bundle.dataflow_match,
        };
        if composite.is_nan() {
            return 0.0;
        }
        composite.clamp(0.0, 1.0)
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "def add(a, b):\n    return a + b";

    #[test]
    fn test_identical_input_scores_one() {
        let scorer = SimilarityScorer::default();
        let bundle = scorer.score(REFERENCE, REFERENCE, Language::Python);
        assert!((bundle.composite - 1.0).abs() < 1e-12);
        for s in bundle.sub_scores() {
            assert!((s - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_strict_identical_input_scores_one() {
        let scorer = SimilarityScorer::new(ScoringConfig::strict());
        let bundle = scorer.score(REFERENCE, REFERENCE, Language::Python);
        assert!((bundle.composite - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_multiplicative_penalty_scales_blend() {
        let scorer = SimilarityScorer::new(ScoringConfig::strict());
        let bundle = ScoreBundle {
            ngram_match: 1.0,
            weighted_ngram_match: 1.0,
            syntax_match: 1.0,
            dataflow_match: 0.5,
            composite: 0.0,
        };
        assert!((scorer.composite(&bundle) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_composite_is_clamped_for_unvalidated_weights() {
        let weights = ScoreWeights::from_slice(&[1.0, 1.0, 1.0, 1.0]).unwrap();
        let scorer = SimilarityScorer::new(ScoringConfig::default().with_weights(weights));
        let bundle = scorer.score(REFERENCE, REFERENCE, Language::Python);
        assert!((bundle.composite - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_scorer_borrows_shared_catalog() {
        let scorer = SimilarityScorer::new(ScoringConfig::strict());
        assert!(std::ptr::eq(scorer.catalog(), KeywordCatalog::shared()));
        assert!(std::ptr::eq(
            SimilarityScorer::default().catalog(),
            KeywordCatalog::shared()
        ));
    }

    #[test]
    fn test_custom_catalog_changes_keyword_weighting() {
        let plain = SimilarityScorer::default();
        let catalog = KeywordCatalog::builtin().with_extra(Language::Python, ["add"]);
        let extended = SimilarityScorer::with_catalog(ScoringConfig::default(), catalog);
        let candidate = "def add(x, y):\n    return x + y";
        let a = plain.score(candidate, REFERENCE, Language::Python);
        let b = extended.score(candidate, REFERENCE, Language::Python);
        assert!(b.weighted_ngram_match > a.weighted_ngram_match);
    }
}
