//! Core data model: preference records, default values, and namespace
//! prefixes.

use std::fmt;

use serde::Deserialize;

/// Typed default value for a preference, as declared in the defaults
/// mapping.
///
/// Produced directly by the defaults parser; downstream code never inspects
/// runtime shapes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Boolean default.
    Bool(bool),
    /// Integer default.
    Int(i64),
    /// String default.
    Str(String),
}

impl DefaultValue {
    /// Declaration type tag used when synthesizing a missing
    /// `<preference/>` line.
    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Str(_) => "string",
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}

/// One preference discovered in the markup.
///
/// Created when its declaration element is first encountered, then mutated
/// by subsequent binding elements (doc appended, label and panel set) and by
/// the cross-reference pass (default attached). Never deleted; the renderer
/// consumes records read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceRecord {
    /// Fully-qualified preference identifier (key into the defaults
    /// mapping).
    pub name: String,
    /// Short identifier used by binding attributes within the markup.
    pub key: String,
    /// Declared value type tag, when present (`int`, `bool`, `string`).
    pub value_type: Option<String>,
    /// Whether `name` falls under the target namespace prefix. Only target
    /// records are emitted; the rest exist for cross-checking.
    pub is_target: bool,
    /// Accumulated documentation text, in tree-traversal order.
    pub doc: String,
    /// Human-readable label from the first labelling control.
    pub label: Option<String>,
    /// Name of the UI panel the preference belongs to; `None` marks a
    /// hidden preference.
    pub panel: Option<String>,
    /// Default value attached by the cross-reference pass.
    pub default: Option<DefaultValue>,
}

impl PreferenceRecord {
    /// Creates a record from a declaration's identifying attributes.
    #[must_use]
    pub const fn new(
        name: String,
        key: String,
        value_type: Option<String>,
        is_target: bool,
    ) -> Self {
        Self {
            name,
            key,
            value_type,
            is_target,
            doc: String::new(),
            label: None,
            panel: None,
            default: None,
        }
    }
}

/// The fixed identifier prefixes separating component-owned preferences
/// from host-application ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix of fully-qualified preference names in the target namespace.
    pub name_prefix: String,
    /// Prefix of markup declaration ids for target preferences.
    pub id_prefix: String,
    /// Tab id whose panel is excluded from the generated document.
    pub disabled_tab: Option<String>,
}

impl Namespace {
    /// Whether `name` belongs to the target namespace.
    #[must_use]
    pub fn is_target(&self, name: &str) -> bool {
        name.starts_with(&self.name_prefix)
    }

    /// Qualifies a defaults-mapping key lacking the namespace prefix.
    #[must_use]
    pub fn qualify(&self, key: &str) -> String {
        if key.starts_with(&self.name_prefix) {
            key.to_owned()
        } else {
            format!("{}{key}", self.name_prefix)
        }
    }

    /// Rewrites a preference name into its expected markup id: the name
    /// prefix becomes the id prefix and remaining dots become dashes.
    #[must_use]
    pub fn id_for(&self, name: &str) -> String {
        name.strip_prefix(&self.name_prefix).map_or_else(
            || name.replace('.', "-"),
            |rest| format!("{}{}", self.id_prefix, rest.replace('.', "-")),
        )
    }

    /// Whether `id` names the disabled sentinel tab.
    #[must_use]
    pub fn is_disabled_tab(&self, id: Option<&str>) -> bool {
        match (&self.disabled_tab, id) {
            (Some(disabled), Some(actual)) => disabled == actual,
            _ => false,
        }
    }
}
