//! Cross-references discovered preference records against the defaults
//! mapping.
//!
//! Both directions must match for the target namespace: a markup preference
//! with no default is unsupported, and a default with no markup declaration
//! (or a declaration that never accumulated documentation) is collected into
//! a batch "Undocumented" report.

use tracing::debug;

use crate::defaults::DefaultsMap;
use crate::error::{PrefdocError, UndocumentedReport};
use crate::model::{DefaultValue, Namespace, PreferenceRecord};

/// Validates `records` against `defaults` and attaches default values.
///
/// # Errors
///
/// Returns [`PrefdocError::Unsupported`] for a target record absent from
/// the defaults, or [`PrefdocError::Undocumented`] carrying the batch
/// report when defaults lack declarations or target records lack
/// documentation.
pub fn cross_reference(
    records: &mut [PreferenceRecord],
    defaults: &DefaultsMap,
    ns: &Namespace,
) -> Result<(), PrefdocError> {
    ensure_supported(records, defaults)?;
    attach_defaults(records, defaults, ns)?;
    ensure_documented(records)?;
    debug!(records = records.len(), "cross-reference complete");
    Ok(())
}

/// Every target record must have a defaults entry.
fn ensure_supported(
    records: &[PreferenceRecord],
    defaults: &DefaultsMap,
) -> Result<(), PrefdocError> {
    for record in records.iter().filter(|record| record.is_target) {
        if !defaults.contains_key(&record.name) {
            return Err(PrefdocError::Unsupported(record.name.clone()));
        }
    }
    Ok(())
}

/// Attaches each default to its record; defaults without a record are
/// collected as synthesized declaration lines.
fn attach_defaults(
    records: &mut [PreferenceRecord],
    defaults: &DefaultsMap,
    ns: &Namespace,
) -> Result<(), PrefdocError> {
    let mut missing = Vec::new();
    for (name, default) in defaults {
        match records.iter_mut().find(|record| record.name == *name) {
            Some(record) => record.default = Some(default.clone()),
            None => missing.push(declaration_line(name, default, ns)),
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PrefdocError::Undocumented(UndocumentedReport::new(missing)))
    }
}

/// The declaration line a missing preference would need in the markup.
fn declaration_line(name: &str, default: &DefaultValue, ns: &Namespace) -> String {
    format!(
        "<preference name=\"{name}\" id=\"{}\" type=\"{}\"/>",
        ns.id_for(name),
        default.type_tag()
    )
}

/// Every target record must have accumulated documentation by now.
fn ensure_documented(records: &[PreferenceRecord]) -> Result<(), PrefdocError> {
    let undocumented: Vec<String> = records
        .iter()
        .filter(|record| record.is_target && record.doc.is_empty())
        .map(|record| record.name.clone())
        .collect();
    if undocumented.is_empty() {
        Ok(())
    } else {
        Err(PrefdocError::Undocumented(UndocumentedReport::new(
            undocumented,
        )))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "tests fail loudly on fixture errors")]

    use super::*;

    fn namespace() -> Namespace {
        Namespace {
            name_prefix: "extensions.scribe.outliner.".to_owned(),
            id_prefix: "pref-outliner-".to_owned(),
            disabled_tab: None,
        }
    }

    fn target_record(short: &str, doc: &str) -> PreferenceRecord {
        let mut record = PreferenceRecord::new(
            format!("extensions.scribe.outliner.{short}"),
            format!("pref-outliner-{short}"),
            Some("string".to_owned()),
            true,
        );
        record.doc = doc.to_owned();
        record
    }

    fn defaults_of(entries: &[(&str, DefaultValue)]) -> DefaultsMap {
        entries
            .iter()
            .map(|(short, value)| {
                (
                    format!("extensions.scribe.outliner.{short}"),
                    value.clone(),
                )
            })
            .collect()
    }

    #[test]
    fn attaches_matched_defaults() {
        let mut records = vec![target_record("autosave", "Doc.\n")];
        let defaults = defaults_of(&[("autosave", DefaultValue::Bool(true))]);
        cross_reference(&mut records, &defaults, &namespace()).expect("validation passes");
        assert_eq!(records[0].default, Some(DefaultValue::Bool(true)));
    }

    #[test]
    fn target_record_without_default_is_unsupported() {
        let mut records = vec![target_record("ghost", "Doc.\n")];
        let defaults = DefaultsMap::new();
        assert!(matches!(
            cross_reference(&mut records, &defaults, &namespace()),
            Err(PrefdocError::Unsupported(name))
                if name == "extensions.scribe.outliner.ghost"
        ));
    }

    #[test]
    fn default_without_record_synthesizes_a_declaration() {
        let mut records = vec![];
        let defaults = defaults_of(&[("cache.size", DefaultValue::Int(256))]);
        let Err(PrefdocError::Undocumented(report)) =
            cross_reference(&mut records, &defaults, &namespace())
        else {
            panic!("expected an undocumented report");
        };
        assert_eq!(
            report.entries(),
            ["<preference name=\"extensions.scribe.outliner.cache.size\" \
              id=\"pref-outliner-cache-size\" type=\"int\"/>"]
        );
    }

    #[test]
    fn non_target_records_are_ignored_by_the_support_check() {
        let mut record = PreferenceRecord::new(
            "browser.tabs.warn".to_owned(),
            "pref-browser-warn".to_owned(),
            None,
            false,
        );
        record.doc = String::new();
        let mut records = vec![record];
        let defaults = DefaultsMap::new();
        cross_reference(&mut records, &defaults, &namespace()).expect("validation passes");
    }

    #[test]
    fn empty_doc_on_a_target_record_is_reported() {
        let mut records = vec![target_record("autosave", "")];
        let defaults = defaults_of(&[("autosave", DefaultValue::Bool(true))]);
        let Err(PrefdocError::Undocumented(report)) =
            cross_reference(&mut records, &defaults, &namespace())
        else {
            panic!("expected an undocumented report");
        };
        assert_eq!(
            report.entries(),
            ["extensions.scribe.outliner.autosave"]
        );
    }

    #[test]
    fn report_lists_every_missing_declaration() {
        let mut records = vec![];
        let defaults = defaults_of(&[
            ("alpha", DefaultValue::Bool(false)),
            ("beta", DefaultValue::Str("x".to_owned())),
        ]);
        let Err(PrefdocError::Undocumented(report)) =
            cross_reference(&mut records, &defaults, &namespace())
        else {
            panic!("expected an undocumented report");
        };
        assert_eq!(report.len(), 2);
    }
}
