//! Error types for the `prefdoc` pipeline.

use std::fmt;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `prefdoc` pipeline.
///
/// Structural variants abort the run the moment they are detected; the
/// [`Undocumented`](Self::Undocumented) variant carries the batch-reported
/// validation failures accumulated by the cross-reference pass.
#[derive(Debug, Error)]
pub enum PrefdocError {
    /// Reading an input or writing the output failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The source list contains no file for one of the three input roles.
    #[error("no {role} source (.{extension}) listed in sources")]
    MissingSource {
        /// Role that could not be filled (markup, entities, defaults).
        role: &'static str,
        /// Extension expected for the role.
        extension: &'static str,
    },

    /// The markup failed to parse.
    #[error("malformed markup at byte {position}: {source}")]
    Markup {
        /// Byte offset reported by the reader.
        position: usize,
        /// Underlying parser error.
        #[source]
        source: quick_xml::Error,
    },

    /// An `&` without a closing `;` was found while expanding references.
    #[error("unterminated entity reference near '{context}'")]
    UnterminatedReference {
        /// Leading fragment of the text being expanded.
        context: String,
    },

    /// An entity reference named no declared entity.
    #[error("unknown entity '&{0};'")]
    UnknownEntity(String),

    /// A numeric character reference did not denote a valid character.
    #[error("invalid character reference '&{0};'")]
    InvalidCharacterReference(String),

    /// The defaults mapping failed to parse.
    #[error("failed to parse defaults: {0}")]
    Defaults(#[from] serde_saphyr::Error),

    /// A `preference` element lacks one of its identifying attributes.
    #[error("preference declaration missing '{attribute}' attribute")]
    MalformedDeclaration {
        /// Name of the missing attribute.
        attribute: &'static str,
    },

    /// A target declaration's id does not reduce to its preference name.
    #[error("fix id for {name}: '{key}' does not reduce to the preference name")]
    KeyMismatch {
        /// Fully-qualified preference name.
        name: String,
        /// Markup id that failed the consistency check.
        key: String,
    },

    /// The label pre-pass produced an empty label for a bound control.
    #[error("no label for {0}")]
    MissingLabel(String),

    /// An element binds a preference key that was never declared.
    #[error("{0} not found")]
    UnknownBinding(String),

    /// A target preference in the markup has no entry in the defaults mapping.
    #[error("unsupported preference {0}")]
    Unsupported(String),

    /// A panel-assigned target record reached the renderer without a label.
    #[error("unlabelled preference {0}")]
    Unlabelled(String),

    /// Batch validation failures; reported together on standard output.
    #[error("{} undocumented preference(s)", .0.len())]
    Undocumented(UndocumentedReport),
}

/// Batch-reportable validation failures, accumulated in scan order.
///
/// Covers both failure classes of the cross-reference pass: defaults entries
/// with no markup declaration (each entry is the synthesized declaration
/// line) and target preferences whose documentation is still empty after the
/// walk (each entry is the preference name).
#[derive(Debug, Default)]
pub struct UndocumentedReport {
    entries: Vec<String>,
}

impl UndocumentedReport {
    /// Creates a report from the collected entries.
    #[must_use]
    pub const fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Entries in scan order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of collected entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for UndocumentedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Undocumented:")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}
