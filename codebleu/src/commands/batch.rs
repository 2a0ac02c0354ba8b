//! Batch scoring: many request records, scored in parallel.

use super::utils::{build_evaluator, config_root, load_config, read_source, write_output};
use crate::cli::{OutputOptions, ScoringArgs};
use crate::constants::{DEFAULT_LANGUAGE, REPORT_PRECISION};
use crate::evaluator::{EvaluationReport, EvaluationRequest};
use crate::output::{create_progress_bar, print_batch_rows, print_batch_summary, BatchRow};
use crate::scoring::round_to;
use crate::verdict::QualityTier;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Options for the `batch` command.
#[derive(Debug, Default)]
pub struct BatchOptions {
    /// Request file (path or `-`).
    pub input: String,
    /// Language for requests that leave it empty.
    pub language: Option<String>,
    /// Policy overrides.
    pub scoring: ScoringArgs,
    /// Output format and destination.
    pub output: OutputOptions,
    /// Minimum acceptable mean composite.
    pub fail_under: Option<f64>,
    /// Verbose diagnostics.
    pub verbose: bool,
}

/// Result for one request record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    /// Zero-based position in the input.
    pub index: usize,
    /// Caller-supplied id, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The report, when the request was valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<EvaluationReport>,
    /// Why the request was not scored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate over a batch.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Number of request records.
    pub count: usize,
    /// Records that were scored.
    pub scored: usize,
    /// Records rejected before scoring.
    pub errors: usize,
    /// Mean composite over scored records; `0.0` when none were scored.
    pub mean_composite: f64,
    /// Scored records per quality tier.
    pub tiers: BTreeMap<QualityTier, usize>,
}

impl BatchSummary {
    /// Summarize batch items.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_items(items: &[BatchItem]) -> Self {
        let mut tiers: BTreeMap<QualityTier, usize> =
            QualityTier::ALL.iter().map(|tier| (*tier, 0)).collect();
        let mut total = 0.0;
        let mut scored = 0;
        for report in items.iter().filter_map(|item| item.report.as_ref()) {
            *tiers.entry(report.quality).or_insert(0) += 1;
            total += report.composite_score;
            scored += 1;
        }
        let mean_composite = if scored == 0 {
            0.0
        } else {
            round_to(total / scored as f64, REPORT_PRECISION)
        };
        Self {
            count: items.len(),
            scored,
            errors: items.len() - scored,
            mean_composite,
            tiers,
        }
    }
}

#[derive(Serialize)]
struct BatchOutput<'a> {
    items: &'a [BatchItem],
    summary: &'a BatchSummary,
}

/// Parses a JSON array of requests, or JSON Lines when the text is not an array.
///
/// # Errors
///
/// Returns an error naming the offending line when a record is not valid JSON.
pub fn parse_requests(text: &str) -> Result<Vec<EvaluationRequest>> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text).context("Invalid JSON array of evaluation requests");
    }
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Invalid evaluation request on line {}", idx + 1))
        })
        .collect()
}

/// Scores every request of a batch file.
///
/// Returns the process exit code: `1` when `fail_under` is set and the mean
/// composite falls below it.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, the configuration
/// is invalid, or output fails.
pub fn run_batch<W: Write>(options: BatchOptions, mut writer: W) -> Result<i32> {
    let config = load_config(config_root(&options.input), options.verbose)?;
    let evaluator = build_evaluator(&config, &options.scoring, options.verbose)?;
    let fallback_language = options
        .language
        .clone()
        .or_else(|| config.codebleu.default_language.clone())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned());

    let mut requests = parse_requests(&read_source(&options.input)?)?;
    for request in &mut requests {
        if request.language.trim().is_empty() {
            request.language.clone_from(&fallback_language);
        }
    }

    if options.verbose {
        eprintln!(
            "[VERBOSE] Scoring {} requests on {} threads",
            requests.len(),
            rayon::current_num_threads()
        );
    }

    let pb = create_progress_bar(requests.len() as u64, options.output.json);
    let items: Vec<BatchItem> = requests
        .par_iter()
        .enumerate()
        .map(|(index, request)| {
            let outcome = evaluator.evaluate_request(request);
            pb.inc(1);
            match outcome {
                Ok(report) => BatchItem {
                    index,
                    id: request.id.clone(),
                    report: Some(report),
                    error: None,
                },
                Err(e) => BatchItem {
                    index,
                    id: request.id.clone(),
                    report: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect();
    pb.finish_and_clear();

    let summary = BatchSummary::from_items(&items);

    if options.output.json {
        let out = BatchOutput {
            items: &items,
            summary: &summary,
        };
        write_output(
            &mut writer,
            &serde_json::to_string_pretty(&out)?,
            options.output.output_file,
        )?;
    } else {
        let rows: Vec<BatchRow<'_>> = items
            .iter()
            .map(|item| BatchRow {
                label: item
                    .id
                    .clone()
                    .unwrap_or_else(|| (item.index + 1).to_string()),
                outcome: match (&item.report, &item.error) {
                    (Some(report), _) => Ok(report),
                    (None, error) => Err(error.clone().unwrap_or_default()),
                },
            })
            .collect();
        let tiers: Vec<(QualityTier, usize)> =
            summary.tiers.iter().map(|(t, c)| (*t, *c)).collect();
        let mut buf = Vec::new();
        print_batch_rows(&mut buf, &rows)?;
        print_batch_summary(
            &mut buf,
            summary.scored,
            summary.errors,
            summary.mean_composite,
            &tiers,
        )?;
        write_output(
            &mut writer,
            String::from_utf8_lossy(&buf).trim_end(),
            options.output.output_file,
        )?;
    }

    if let Some(threshold) = options.fail_under {
        if summary.mean_composite < threshold {
            eprintln!(
                "Mean composite {:.4} is below the threshold {threshold:.4}",
                summary.mean_composite
            );
            return Ok(1);
        }
    }
    Ok(0)
}
