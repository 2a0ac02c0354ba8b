//! Quality tiers and recommendations derived from a [`ScoreBundle`].

use serde::Serialize;
use std::fmt;

use crate::constants::{PRODUCTION_READY_FLOOR, RECOMMENDATION_FLOOR};
use crate::scoring::ScoreBundle;

/// Five fixed quality tiers, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum QualityTier {
    /// Composite `>= 0.8`.
    Excellent,
    /// Composite `>= 0.6`.
    Good,
    /// Composite `>= 0.4`.
    Fair,
    /// Composite `>= 0.2`.
    Poor,
    /// Everything below `0.2`, and NaN.
    #[serde(rename = "Very Poor")]
    VeryPoor,
}

impl QualityTier {
    /// All tiers, best first.
    pub const ALL: [QualityTier; 5] = [
        QualityTier::Excellent,
        QualityTier::Good,
        QualityTier::Fair,
        QualityTier::Poor,
        QualityTier::VeryPoor,
    ];

    /// Ranks a composite score.
    ///
    /// Excellent: 0.8 - 1.0
    /// Good: 0.6 - 0.8
    /// Fair: 0.4 - 0.6
    /// Poor: 0.2 - 0.4
    /// Very Poor: below 0.2
    ///
    /// Lower bounds are inclusive.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Excellent
        } else if score >= 0.6 {
            Self::Good
        } else if score >= 0.4 {
            Self::Fair
        } else if score >= 0.2 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }

    /// Short tier name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }

    /// Guidance attached to the tier.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Excellent => "Production Ready",
            Self::Good => "Minor Improvements Needed",
            Self::Fair => "Significant Improvements Needed",
            Self::Poor => "Major Revision Required",
            Self::VeryPoor => "Complete Rewrite Recommended",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single piece of feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// Low n-gram overlap.
    TokenSimilarity,
    /// Low keyword-weighted overlap.
    KeywordUsage,
    /// Low structural overlap.
    SyntaxStructure,
    /// Low identifier overlap.
    VariableUsage,
    /// Every sub-score is high.
    ProductionReady,
    /// Nothing else applied.
    GoodOverall,
}

impl Recommendation {
    /// Message shown to the user.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::TokenSimilarity => "Improve token-level similarity with reference code.",
            Self::KeywordUsage => "Keyword usage differs, check control structures.",
            Self::SyntaxStructure => "Review code structure / syntax match.",
            Self::VariableUsage => "Check semantic logic and variable usage consistency.",
            Self::ProductionReady => "Code quality is excellent! Ready for production use.",
            Self::GoodOverall => "Code quality is good overall.",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Recommendations for a bundle, in rule order. Never empty.
#[must_use]
pub fn recommendations(bundle: &ScoreBundle) -> Vec<Recommendation> {
    let checks = [
        (bundle.ngram_match, Recommendation::TokenSimilarity),
        (bundle.weighted_ngram_match, Recommendation::KeywordUsage),
        (bundle.syntax_match, Recommendation::SyntaxStructure),
        (bundle.dataflow_match, Recommendation::VariableUsage),
    ];
    let mut out: Vec<Recommendation> = checks
        .iter()
        .filter(|(score, _)| *score < RECOMMENDATION_FLOOR)
        .map(|(_, rec)| *rec)
        .collect();

    if bundle
        .sub_scores()
        .iter()
        .all(|s| *s >= PRODUCTION_READY_FLOOR)
    {
        out.push(Recommendation::ProductionReady);
    }
    if out.is_empty() {
        out.push(Recommendation::GoodOverall);
    }
    out
}

/// Tier plus recommendations for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Quality tier of the composite score.
    pub quality: QualityTier,
    /// Ordered, non-empty feedback.
    pub recommendations: Vec<Recommendation>,
}

impl Verdict {
    /// Derive the verdict for a bundle.
    #[must_use]
    pub fn from_bundle(bundle: &ScoreBundle) -> Self {
        Self {
            quality: QualityTier::from_score(bundle.composite),
            recommendations: recommendations(bundle),
        }
    }

    /// Recommendation messages as owned strings.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.recommendations
            .iter()
            .map(|r| r.message().to_owned())
            .collect()
    }
}
