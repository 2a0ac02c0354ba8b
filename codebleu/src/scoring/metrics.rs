//! The four sub-metrics.
//!
//! Every function is total: empty inputs produce the documented degenerate
//! value instead of an error. The degenerate values differ per metric.
//! Overlap measures that are "trivially satisfied" by an empty reference
//! (keyword coverage, identifier overlap) return `1.0`; precision style
//! measures return `0.0`.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::constants::{BRACE_SYMBOLS, MAX_NGRAM_ORDER, OPERATOR_SYMBOLS};
use crate::ngram::{clipped_precision, NGramCounts};
use crate::scoring::config::{KeywordPolicy, NgramPolicy, SyntaxPolicy};
use crate::tokenizer::TokenSequence;

/// N-gram precision for orders `1..=4` under the given composition policy.
#[must_use]
pub fn ngram_match(candidate: &TokenSequence, reference: &TokenSequence, policy: NgramPolicy) -> f64 {
    let cand = candidate.as_slice();
    let refs = reference.as_slice();
    let precisions = (1..=MAX_NGRAM_ORDER).map(|n| clipped_precision(cand, refs, n));

    match policy {
        NgramPolicy::Arithmetic => {
            let present: Vec<f64> = precisions.flatten().collect();
            if present.is_empty() {
                0.0
            } else {
                present.iter().sum::<f64>() / present.len() as f64
            }
        }
        NgramPolicy::Geometric => {
            let mut product = 1.0_f64;
            for p in precisions {
                match p {
                    Some(p) if p > 0.0 => product *= p,
                    _ => return 0.0,
                }
            }
            product.powf(1.0 / MAX_NGRAM_ORDER as f64) * brevity_penalty(cand.len(), refs.len())
        }
    }
}

/// BLEU brevity penalty: `1.0` for a longer candidate or an empty reference.
#[must_use]
pub fn brevity_penalty(candidate_len: usize, reference_len: usize) -> f64 {
    if candidate_len > reference_len || reference_len == 0 {
        1.0
    } else {
        candidate_len as f64 / reference_len as f64
    }
}

/// Keyword-weighted precision.
#[must_use]
pub fn weighted_ngram_match(
    candidate: &TokenSequence,
    reference: &TokenSequence,
    keywords: &FxHashSet<String>,
    policy: KeywordPolicy,
    boost: f64,
) -> f64 {
    match policy {
        KeywordPolicy::Ngram => weighted_ngram_precision(candidate, reference, keywords, boost),
        KeywordPolicy::TokenSet => weighted_token_overlap(candidate, reference, keywords, boost),
    }
}

fn weighted_ngram_precision(
    candidate: &TokenSequence,
    reference: &TokenSequence,
    keywords: &FxHashSet<String>,
    boost: f64,
) -> f64 {
    let mut score = 0.0;
    let mut total = 0.0;
    for n in 1..=MAX_NGRAM_ORDER {
        let cand = NGramCounts::from_tokens(candidate.as_slice(), n);
        let refs = NGramCounts::from_tokens(reference.as_slice(), n);
        for (gram, count) in cand.iter() {
            let weight = if gram.iter().any(|tok| keywords.contains(tok)) {
                boost
            } else {
                1.0
            };
            total += weight * count as f64;
            score += weight * count.min(refs.count(gram)) as f64;
        }
    }
    if total > 0.0 {
        score / total
    } else {
        0.0
    }
}

fn weighted_token_overlap(
    candidate: &TokenSequence,
    reference: &TokenSequence,
    keywords: &FxHashSet<String>,
    boost: f64,
) -> f64 {
    let weight = |tok: &str| if keywords.contains(tok) { boost } else { 1.0 };
    let cand = candidate.distinct();

    let mut common = 0.0;
    let mut total = 0.0;
    for tok in &reference.distinct() {
        let w = weight(*tok);
        total += w;
        if cand.contains(*tok) {
            common += w;
        }
    }
    if total > 0.0 {
        common / total
    } else {
        0.0
    }
}

/// Structural similarity under the given policy.
#[must_use]
pub fn syntax_match(
    candidate: &TokenSequence,
    reference: &TokenSequence,
    keywords: &FxHashSet<String>,
    policy: SyntaxPolicy,
) -> f64 {
    match policy {
        SyntaxPolicy::KeywordCoverage => keyword_coverage(candidate, reference, keywords),
        SyntaxPolicy::SymbolOverlap => {
            let ops = multiset_overlap(
                &symbol_counts(candidate, OPERATOR_SYMBOLS()),
                &symbol_counts(reference, OPERATOR_SYMBOLS()),
            );
            let braces = multiset_overlap(
                &symbol_counts(candidate, BRACE_SYMBOLS()),
                &symbol_counts(reference, BRACE_SYMBOLS()),
            );
            0.5 * ops + 0.5 * braces
        }
    }
}

/// Fraction of distinct reference keywords present in the candidate.
fn keyword_coverage(
    candidate: &TokenSequence,
    reference: &TokenSequence,
    keywords: &FxHashSet<String>,
) -> f64 {
    let ref_keywords: FxHashSet<&str> = reference
        .iter()
        .filter(|tok| keywords.contains(*tok))
        .collect();
    if ref_keywords.is_empty() {
        return 1.0;
    }
    let cand = candidate.distinct();
    let covered = ref_keywords.iter().filter(|kw| cand.contains(**kw)).count();
    covered as f64 / ref_keywords.len() as f64
}

fn symbol_counts<'a>(
    tokens: &'a TokenSequence,
    symbols: &FxHashSet<&'static str>,
) -> FxHashMap<&'a str, usize> {
    let mut counts = FxHashMap::default();
    for tok in tokens.iter().filter(|tok| symbols.contains(*tok)) {
        *counts.entry(tok).or_insert(0) += 1;
    }
    counts
}

/// `Σ min / Σ max` over the union of keys; `0.0` when both are empty.
#[must_use]
pub fn multiset_overlap<'a>(a: &FxHashMap<&'a str, usize>, b: &FxHashMap<&'a str, usize>) -> f64 {
    let keys: FxHashSet<&str> = a.keys().chain(b.keys()).copied().collect();
    let mut shared = 0usize;
    let mut union = 0usize;
    for key in keys {
        let x = a.get(key).copied().unwrap_or(0);
        let y = b.get(key).copied().unwrap_or(0);
        shared += x.min(y);
        union += x.max(y);
    }
    if union == 0 {
        0.0
    } else {
        shared as f64 / union as f64
    }
}

/// Share of reference identifiers that also occur in the candidate.
///
/// `1.0` when the reference has no identifiers.
#[must_use]
pub fn dataflow_match(
    candidate: &TokenSequence,
    reference: &TokenSequence,
    keywords: &FxHashSet<String>,
) -> f64 {
    let ref_ids = reference.identifiers(keywords);
    if ref_ids.is_empty() {
        return 1.0;
    }
    let cand_ids = candidate.identifiers(keywords);
    let shared = ref_ids.iter().filter(|id| cand_ids.contains(**id)).count();
    shared as f64 / ref_ids.len() as f64
}
