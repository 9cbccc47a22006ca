//! Loads the YAML defaults mapping.

use std::collections::BTreeMap;

use serde_saphyr::Options;

use crate::error::PrefdocError;
use crate::model::{DefaultValue, Namespace};

/// Fully-qualified preference name → typed default value.
pub type DefaultsMap = BTreeMap<String, DefaultValue>;

/// Parses the defaults mapping and qualifies bare keys with the target
/// namespace prefix.
///
/// Strict boolean semantics apply: unquoted `yes`/`no` remain strings, only
/// `true`/`false` become booleans.
///
/// # Errors
///
/// Returns an error when the YAML is malformed or a value is not an
/// integer, boolean, or string.
pub fn parse_defaults(yaml: &str, ns: &Namespace) -> Result<DefaultsMap, PrefdocError> {
    let raw: BTreeMap<String, DefaultValue> = serde_saphyr::from_str_with_options(
        yaml,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )?;
    tracing::debug!(count = raw.len(), "parsed defaults mapping");
    Ok(raw
        .into_iter()
        .map(|(key, value)| (ns.qualify(&key), value))
        .collect())
}
