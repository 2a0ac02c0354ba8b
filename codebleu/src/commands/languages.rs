//! Keyword catalog listing.

use super::utils::{load_config, write_output};
use crate::language::Language;

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LanguageEntry<'a> {
    language: Language,
    keyword_count: usize,
    keywords: Vec<&'a str>,
}

/// Lists the catalogued languages with their keywords, including configured extras.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or output fails.
pub fn run_languages<W: Write>(
    root: &Path,
    json: bool,
    show_keywords: bool,
    verbose: bool,
    mut writer: W,
) -> Result<()> {
    let config = load_config(root, verbose)?;
    let catalog = config.codebleu.keyword_catalog();

    if json {
        let entries: Vec<LanguageEntry<'_>> = Language::KNOWN
            .iter()
            .map(|lang| {
                let keywords = catalog.sorted_keywords(*lang);
                LanguageEntry {
                    language: *lang,
                    keyword_count: keywords.len(),
                    keywords,
                }
            })
            .collect();
        write_output(&mut writer, &serde_json::to_string_pretty(&entries)?, None)?;
    } else {
        let entries: Vec<(&str, Vec<&str>)> = Language::KNOWN
            .iter()
            .map(|lang| (lang.name(), catalog.sorted_keywords(*lang)))
            .collect();
        crate::output::print_languages(&mut writer, &entries, show_keywords)?;
    }
    Ok(())
}
