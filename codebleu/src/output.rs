use crate::evaluator::EvaluationReport;
use crate::verdict::QualityTier;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Width of the textual score bars.
const BAR_WIDTH: usize = 20;

/// Create a progress bar for a batch of known size.
///
/// In test mode, or when `hidden` is set (JSON output), returns a hidden progress bar.
#[must_use]
pub fn create_progress_bar(total: u64, hidden: bool) -> ProgressBar {
    if cfg!(test) || hidden {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} pairs ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("scoring...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        "╔════════════════════════════════════════╗".cyan()
    )?;
    writeln!(
        writer,
        "{}",
        "║  Code Similarity Evaluation            ║".cyan().bold()
    )?;
    writeln!(
        writer,
        "{}",
        "╚════════════════════════════════════════╝".cyan()
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Helper to create a styled table
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Helper to map a quality tier to a Comfy Table color
fn tier_color(tier: QualityTier) -> Color {
    match tier {
        QualityTier::Excellent | QualityTier::Good => Color::Green,
        QualityTier::Fair => Color::Yellow,
        QualityTier::Poor | QualityTier::VeryPoor => Color::Red,
    }
}

/// Helper to color a sub-score the way recommendations judge it
fn score_color(score: f64) -> Color {
    if score >= crate::constants::PRODUCTION_READY_FLOOR {
        Color::Green
    } else if score >= crate::constants::RECOMMENDATION_FLOOR {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Render a score in `[0, 1]` as a fixed-width bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn score_bar(score: f64) -> String {
    let filled = (score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Print a single evaluation report.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_report(writer: &mut impl Write, report: &EvaluationReport) -> std::io::Result<()> {
    print_header(writer)?;

    let mut table = create_table(vec!["Metric", "Score", ""]);
    let rows = [
        ("N-gram match", report.ngram_match),
        ("Weighted n-gram match", report.weighted_ngram_match),
        ("Syntax match", report.syntax_match),
        ("Dataflow match", report.dataflow_match),
    ];
    for (name, score) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{score:.4}")).set_alignment(CellAlignment::Right),
            Cell::new(score_bar(score)).fg(score_color(score)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Composite").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.4}", report.composite_score))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(score_bar(report.composite_score)).fg(tier_color(report.quality)),
    ]);
    writeln!(writer, "{table}")?;

    let quality = format!("{} - {}", report.quality, report.quality_description);
    let quality = match report.quality {
        QualityTier::Excellent | QualityTier::Good => quality.green().bold(),
        QualityTier::Fair => quality.yellow().bold(),
        QualityTier::Poor | QualityTier::VeryPoor => quality.red().bold(),
    };
    writeln!(
        writer,
        "\n{} {}  {}",
        "Quality:".bold(),
        quality,
        format!("(language: {})", report.language).dimmed()
    )?;

    writeln!(writer, "\n{}", "Recommendations".bold().underline())?;
    for rec in &report.recommendations {
        writeln!(writer, "  • {rec}")?;
    }
    writeln!(writer)?;
    Ok(())
}

/// One printable batch row.
pub struct BatchRow<'a> {
    /// Caller id, or the 1-based position.
    pub label: String,
    /// Result, or the reason the item was not scored.
    pub outcome: Result<&'a EvaluationReport, String>,
}

/// Print per-item batch results.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_batch_rows(writer: &mut impl Write, rows: &[BatchRow<'_>]) -> std::io::Result<()> {
    let mut table = create_table(vec![
        "Item",
        "Language",
        "N-gram",
        "Weighted",
        "Syntax",
        "Dataflow",
        "Composite",
        "Quality",
    ]);
    for row in rows {
        match &row.outcome {
            Ok(report) => {
                table.add_row(vec![
                    Cell::new(&row.label),
                    Cell::new(report.language.name()).add_attribute(Attribute::Dim),
                    Cell::new(format!("{:.4}", report.ngram_match)),
                    Cell::new(format!("{:.4}", report.weighted_ngram_match)),
                    Cell::new(format!("{:.4}", report.syntax_match)),
                    Cell::new(format!("{:.4}", report.dataflow_match)),
                    Cell::new(format!("{:.4}", report.composite_score))
                        .add_attribute(Attribute::Bold),
                    Cell::new(report.quality.label()).fg(tier_color(report.quality)),
                ]);
            }
            Err(message) => {
                table.add_row(vec![
                    Cell::new(&row.label),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new(message).fg(Color::Red),
                ]);
            }
        }
    }
    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print the batch summary line and tier histogram.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_batch_summary(
    writer: &mut impl Write,
    scored: usize,
    errors: usize,
    mean_composite: f64,
    tiers: &[(QualityTier, usize)],
) -> std::io::Result<()> {
    writeln!(
        writer,
        "\n{}",
        format!(
            "Scored {} pairs ({} skipped)",
            scored.to_string().bold(),
            errors.to_string().bold()
        )
        .dimmed()
    )?;
    let mean = format!("{mean_composite:.4}");
    let mean = match QualityTier::from_score(mean_composite) {
        QualityTier::Excellent | QualityTier::Good => mean.green().bold(),
        QualityTier::Fair => mean.yellow().bold(),
        QualityTier::Poor | QualityTier::VeryPoor => mean.red().bold(),
    };
    writeln!(writer, "Mean composite: {mean}")?;

    let pills: Vec<String> = tiers
        .iter()
        .map(|(tier, count)| {
            if *count == 0 {
                format!("{}: {}", tier, count.to_string().dimmed())
            } else {
                format!("{}: {}", tier, count.to_string().bold())
            }
        })
        .collect();
    writeln!(writer, "{}", pills.join("  "))?;
    writeln!(writer)?;
    Ok(())
}

/// Print the language catalog.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_languages(
    writer: &mut impl Write,
    entries: &[(&str, Vec<&str>)],
    show_keywords: bool,
) -> std::io::Result<()> {
    let headers = if show_keywords {
        vec!["Language", "Keywords", "List"]
    } else {
        vec!["Language", "Keywords"]
    };
    let mut table = create_table(headers);
    for (name, keywords) in entries {
        let mut row = vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(keywords.len()).set_alignment(CellAlignment::Right),
        ];
        if show_keywords {
            row.push(Cell::new(keywords.join(", ")).add_attribute(Attribute::Dim));
        }
        table.add_row(row);
    }
    writeln!(writer, "{table}")?;
    Ok(())
}
