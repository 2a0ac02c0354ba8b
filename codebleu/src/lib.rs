//! Core library for the codebleu similarity scoring tool.
//!
//! This library scores a generated code snippet against a reference snippet
//! with a CodeBLEU-style composite of n-gram, keyword, syntax and identifier
//! overlap, and turns the scores into a quality verdict.
//!
//! ```
//! use codebleu::evaluator::CodeEvaluator;
//!
//! let report = CodeEvaluator::default().evaluate("x = a + b", "x = a + b", "python");
//! assert!((report.composite_score - 1.0).abs() < 1e-9);
//! ```

#![allow(
    clippy::similar_names,
    clippy::format_push_string,
    clippy::map_unwrap_or,
    clippy::items_after_statements
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing shared constants and regex patterns.
pub mod constants;

/// Module for language tags and the keyword catalog.
pub mod language;

/// Module for comment stripping and tokenization.
pub mod tokenizer;

/// Module for n-gram multisets and clipped precision.
pub mod ngram;

/// Module containing the similarity metrics and the configurable scorer.
pub mod scoring;

/// Module mapping scores to quality tiers and recommendations.
pub mod verdict;

/// Module combining scorer and verdict into serializable reports.
pub mod evaluator;

/// Module for loading configuration.
pub mod config;

/// Module defining the entry point logic.
pub mod entry_point;

/// Module for rich CLI output formatting with colored text and progress bars.
pub mod output;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;
