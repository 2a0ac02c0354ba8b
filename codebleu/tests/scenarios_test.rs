//! End-to-end scoring of small reference/candidate pairs under both profiles.
#![allow(clippy::unwrap_used, clippy::float_cmp)]

use codebleu::evaluator::{CodeEvaluator, EvaluationReport};
use codebleu::scoring::ScoringConfig;
use codebleu::verdict::QualityTier;

const REFERENCE: &str = "def add(a, b):\n return a + b";
const RENAMED: &str = "def add(x, y):\n return x + y";
const MULTIPLY: &str = "def multiply(a, b):\n return a * b";

const TOKEN_MSG: &str = "Improve token-level similarity with reference code.";
const KEYWORD_MSG: &str = "Keyword usage differs, check control structures.";
const SYNTAX_MSG: &str = "Review code structure / syntax match.";
const VARIABLE_MSG: &str = "Check semantic logic and variable usage consistency.";
const READY_MSG: &str = "Code quality is excellent! Ready for production use.";
const GOOD_MSG: &str = "Code quality is good overall.";

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

fn assert_scores(report: &EvaluationReport, expected: [f64; 5]) {
    let actual = [
        report.ngram_match,
        report.weighted_ngram_match,
        report.syntax_match,
        report.dataflow_match,
        report.composite_score,
    ];
    for (a, e) in actual.iter().zip(expected) {
        assert!(close(*a, e), "expected {expected:?}, got {actual:?}");
    }
}

fn strict() -> CodeEvaluator {
    CodeEvaluator::new(ScoringConfig::strict())
}

#[test]
fn test_renamed_parameters_default_profile() {
    let report = CodeEvaluator::default().evaluate(RENAMED, REFERENCE, "python");
    assert_scores(&report, [0.3076, 0.8333, 1.0, 0.3333, 0.5897]);
    assert_eq!(report.quality, QualityTier::Fair);
    assert_eq!(report.quality_description, "Significant Improvements Needed");
    assert_eq!(report.recommendations, vec![TOKEN_MSG, VARIABLE_MSG]);
}

#[test]
fn test_renamed_parameters_strict_profile() {
    let report = strict().evaluate(RENAMED, REFERENCE, "python");
    // No shared 4-gram, so the geometric mean collapses.
    assert_scores(&report, [0.0, 0.3364, 1.0, 0.3333, 0.1115]);
    assert_eq!(report.quality, QualityTier::VeryPoor);
    assert_eq!(
        report.recommendations,
        vec![TOKEN_MSG, KEYWORD_MSG, VARIABLE_MSG]
    );
}

#[test]
fn test_changed_operator_default_profile() {
    let report = CodeEvaluator::default().evaluate(MULTIPLY, REFERENCE, "python");
    assert_scores(&report, [0.6563, 0.8333, 1.0, 0.6667, 0.7625]);
    assert_eq!(report.quality, QualityTier::Good);
    assert_eq!(report.recommendations, vec![GOOD_MSG]);
}

#[test]
fn test_changed_operator_strict_profile() {
    let report = strict().evaluate(MULTIPLY, REFERENCE, "python");
    assert_scores(&report, [0.6484, 0.6636, 0.5, 0.6667, 0.4165]);
    assert_eq!(report.quality, QualityTier::Fair);
    assert_eq!(report.recommendations, vec![GOOD_MSG]);
}

#[test]
fn test_changed_operator_scores_below_renamed_under_strict_syntax() {
    let evaluator = strict();
    let renamed = evaluator.evaluate(RENAMED, REFERENCE, "python");
    let multiply = evaluator.evaluate(MULTIPLY, REFERENCE, "python");
    assert!(multiply.syntax_match < renamed.syntax_match);
}

#[test]
fn test_identical_code() {
    for evaluator in [CodeEvaluator::default(), strict()] {
        let report = evaluator.evaluate(REFERENCE, REFERENCE, "python");
        assert_scores(&report, [1.0, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(report.quality, QualityTier::Excellent);
        assert_eq!(report.recommendations, vec![READY_MSG]);
    }
}

#[test]
fn test_unrelated_text() {
    for evaluator in [CodeEvaluator::default(), strict()] {
        let report = evaluator.evaluate("hello world", REFERENCE, "python");
        assert_scores(&report, [0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(report.quality, QualityTier::VeryPoor);
        assert_eq!(
            report.recommendations,
            vec![TOKEN_MSG, KEYWORD_MSG, SYNTAX_MSG, VARIABLE_MSG]
        );
    }
}

#[test]
fn test_report_serializes_camel_case() {
    let report = CodeEvaluator::default().evaluate(RENAMED, REFERENCE, "python");
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["compositeScore"], 0.5897);
    assert_eq!(json["weightedNgramMatch"], 0.8333);
    assert_eq!(json["quality"], "Fair");
    assert_eq!(json["qualityDescription"], "Significant Improvements Needed");
    assert_eq!(json["language"], "python");
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 2);
}
