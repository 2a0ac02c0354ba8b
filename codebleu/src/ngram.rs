//! N-gram multisets and clipped matching.

use rustc_hash::FxHashMap;

/// An n-gram: a window borrowed from a token slice.
pub type NGram<'a> = &'a [String];

/// Multiset of n-grams of a single order.
#[derive(Debug, Clone, Default)]
pub struct NGramCounts<'a> {
    counts: FxHashMap<NGram<'a>, usize>,
    total: usize,
}

impl<'a> NGramCounts<'a> {
    /// Count every n-gram of order `n` in `tokens`.
    ///
    /// Returns an empty multiset when `n == 0` or the slice is shorter than `n`.
    #[must_use]
    pub fn from_tokens(tokens: &'a [String], n: usize) -> Self {
        if n == 0 {
            return Self::default();
        }
        let mut counts: FxHashMap<NGram<'a>, usize> = FxHashMap::default();
        for window in tokens.windows(n) {
            *counts.entry(window).or_insert(0) += 1;
        }
        let total = tokens.len().saturating_sub(n - 1);
        Self { counts, total }
    }

    /// Total number of n-grams, duplicates included.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// True when no n-gram of this order exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Occurrences of a given n-gram.
    #[must_use]
    pub fn count(&self, gram: &[String]) -> usize {
        self.counts.get(gram).copied().unwrap_or(0)
    }

    /// Distinct n-grams with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (NGram<'a>, usize)> + '_ {
        self.counts.iter().map(|(gram, count)| (*gram, *count))
    }

    /// Sum over distinct n-grams of `min(self_count, other_count)`.
    #[must_use]
    pub fn clipped_matches(&self, reference: &NGramCounts<'_>) -> usize {
        self.iter()
            .map(|(gram, count)| count.min(reference.count(gram)))
            .sum()
    }
}

/// Clipped n-gram precision of order `n`.
///
/// `None` when the candidate has no n-gram of this order, so callers can choose
/// whether a missing order is skipped or counted as zero.
#[must_use]
pub fn clipped_precision(candidate: &[String], reference: &[String], n: usize) -> Option<f64> {
    let cand = NGramCounts::from_tokens(candidate, n);
    if cand.is_empty() {
        return None;
    }
    let refs = NGramCounts::from_tokens(reference, n);
    Some(cand.clipped_matches(&refs) as f64 / cand.total() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| (*t).to_owned()).collect()
    }

    #[test]
    fn test_counts_and_total() {
        let tokens = owned(&["a", "b", "a", "b"]);
        let bigrams = NGramCounts::from_tokens(&tokens, 2);
        assert_eq!(bigrams.total(), 3);
        assert_eq!(bigrams.count(&owned(&["a", "b"])), 2);
        assert_eq!(bigrams.count(&owned(&["b", "a"])), 1);
    }

    #[test]
    fn test_short_sequence_has_no_ngrams() {
        let tokens = owned(&["a", "b"]);
        assert!(NGramCounts::from_tokens(&tokens, 3).is_empty());
        assert!(NGramCounts::from_tokens(&tokens, 0).is_empty());
    }

    #[test]
    fn test_clipping_limits_repeated_matches() {
        let candidate = owned(&["the", "the", "the", "the"]);
        let reference = owned(&["the", "cat"]);
        let p = clipped_precision(&candidate, &reference, 1).unwrap();
        assert!((p - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_precision_none_for_missing_order() {
        let candidate = owned(&["x"]);
        let reference = owned(&["x", "y"]);
        assert_eq!(clipped_precision(&candidate, &reference, 2), None);
        assert_eq!(clipped_precision(&candidate, &reference, 1), Some(1.0));
    }
}
