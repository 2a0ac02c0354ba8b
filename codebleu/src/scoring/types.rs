//! Core types for similarity scoring.

use serde::Serialize;

/// The four sub-scores and their composite, each in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBundle {
    /// Clipped n-gram precision (arithmetic mean or BLEU-4).
    pub ngram_match: f64,
    /// Keyword-weighted precision.
    pub weighted_ngram_match: f64,
    /// Structural overlap.
    pub syntax_match: f64,
    /// Identifier overlap relative to the reference.
    pub dataflow_match: f64,
    /// Weighted blend of the sub-scores.
    pub composite: f64,
}

impl ScoreBundle {
    /// Sub-scores in `[ngram, weighted, syntax, dataflow]` order.
    #[must_use]
    pub const fn sub_scores(&self) -> [f64; 4] {
        [
            self.ngram_match,
            self.weighted_ngram_match,
            self.syntax_match,
            self.dataflow_match,
        ]
    }

    /// Same bundle with every score rounded to `places` decimals.
    #[must_use]
    pub fn rounded(&self, places: i32) -> Self {
        Self {
            ngram_match: round_to(self.ngram_match, places),
            weighted_ngram_match: round_to(self.weighted_ngram_match, places),
            syntax_match: round_to(self.syntax_match, places),
            dataflow_match: round_to(self.dataflow_match, places),
            composite: round_to(self.composite, places),
        }
    }
}

/// Round half away from zero to `places` decimals.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
