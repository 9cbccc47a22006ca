//! Renders validated preference records into the final Markdown document.

use camino::Utf8Path;

use crate::error::PrefdocError;
use crate::model::{DefaultValue, PreferenceRecord};
use crate::walk::WalkOutcome;

/// Characters of a string default shown before truncation.
const DEFAULT_PREVIEW_CHARS: usize = 10;

/// Renders the full document: notice block, preface, one section per panel
/// in declared order, and the hidden-preferences section, with blank-line
/// runs collapsed.
///
/// # Errors
///
/// Returns [`PrefdocError::Unlabelled`] when a panel-assigned target record
/// has no label.
pub fn render(outcome: &WalkOutcome, markup_source: &Utf8Path) -> Result<String, PrefdocError> {
    let mut out = notice(markup_source);
    out.push_str(&outcome.preface);
    out.push_str("\n\n");
    for panel in &outcome.panels {
        out.push_str(&panel_section(panel, &outcome.records)?);
    }
    out.push_str(&hidden_section(&outcome.records));
    let mut collapsed = collapse_blank_lines(&out);
    if !collapsed.ends_with('\n') {
        collapsed.push('\n');
    }
    Ok(collapsed)
}

fn notice(markup_source: &Utf8Path) -> String {
    format!(
        "<!-- DO NOT EDIT THIS FILE.\n\
         This page is generated automatically from comments in\n\
         {markup_source}.\n\
         Any edits made directly in this file will be overwritten the next\n\
         time it is generated.\n\
         -->\n"
    )
}

fn panel_section(panel: &str, records: &[PreferenceRecord]) -> Result<String, PrefdocError> {
    let mut section = format!("\n\n## {panel}\n\n");
    let assigned = records
        .iter()
        .filter(|record| record.is_target && record.panel.as_deref() == Some(panel));
    for record in assigned {
        let label = record
            .label
            .as_deref()
            .filter(|label| !label.is_empty())
            .ok_or_else(|| PrefdocError::Unlabelled(record.name.clone()))?;
        section.push_str(&entry(label, record));
    }
    Ok(section)
}

/// Hidden preferences are rendered under their full name; no label needed.
fn hidden_section(records: &[PreferenceRecord]) -> String {
    let mut section = String::from("\n\n## Hidden preferences\n\n");
    let hidden = records
        .iter()
        .filter(|record| record.is_target && record.panel.is_none());
    for record in hidden {
        section.push_str(&entry(&record.name, record));
    }
    section
}

fn entry(heading: &str, record: &PreferenceRecord) -> String {
    let default = record
        .default
        .as_ref()
        .map(format_default)
        .unwrap_or_default();
    format!(
        "\n\n### {heading}\n*default: {default}*\n\n{}",
        record.doc
    )
}

/// Long string defaults are truncated, the empty string gets an inline-code
/// marker, everything else renders literally.
fn format_default(value: &DefaultValue) -> String {
    match value {
        DefaultValue::Str(text) if text.is_empty() => "`empty`".to_owned(),
        DefaultValue::Str(text) if text.chars().count() > DEFAULT_PREVIEW_CHARS => {
            let preview: String = text.chars().take(DEFAULT_PREVIEW_CHARS).collect();
            format!("{preview}...")
        }
        other => other.to_string(),
    }
}

/// Collapses every run of two-or-more consecutive newlines to exactly two.
/// Idempotent.
#[must_use]
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0_usize;
    for ch in text.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push('\n');
            }
        } else {
            newlines = 0;
            out.push(ch);
        }
    }
    out
}
