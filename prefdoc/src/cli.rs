//! Command-line interface definitions for `prefdoc`.

use camino::Utf8PathBuf;
use clap::Parser;

use crate::error::PrefdocError;
use crate::model::Namespace;

/// Parsed CLI arguments for `prefdoc`.
#[derive(Debug, Parser)]
#[command(name = "prefdoc")]
#[command(about = "Generate Markdown preference documentation from annotated UI markup")]
#[command(version)]
pub struct Args {
    /// Source files; roles are detected by extension (.xul markup, .dtd
    /// entities, .yml/.yaml defaults). Other extensions are ignored.
    #[arg(required = true, value_name = "path")]
    pub sources: Vec<Utf8PathBuf>,
    /// Output path for the generated Markdown document.
    #[arg(short, long, value_name = "path")]
    pub output: Utf8PathBuf,
    /// Preference-name prefix identifying preferences owned by this
    /// component.
    #[arg(long, value_name = "prefix")]
    pub name_prefix: String,
    /// Markup-id prefix stripped when checking declaration ids against
    /// preference names.
    #[arg(long, value_name = "prefix")]
    pub id_prefix: String,
    /// Tab id whose panel is excluded from the generated document.
    #[arg(long, value_name = "id")]
    pub disabled_tab: Option<String>,
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Namespace prefixes assembled from the parsed flags.
    #[must_use]
    pub fn namespace(&self) -> Namespace {
        Namespace {
            name_prefix: self.name_prefix.clone(),
            id_prefix: self.id_prefix.clone(),
            disabled_tab: self.disabled_tab.clone(),
        }
    }
}

/// The three input files, classified by extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    /// Preference-pane markup (`.xul`).
    pub markup: Utf8PathBuf,
    /// Entity-definition table (`.dtd`).
    pub entities: Utf8PathBuf,
    /// Defaults mapping (`.yml`/`.yaml`).
    pub defaults: Utf8PathBuf,
}

impl SourceSet {
    /// Classifies `paths` by extension, taking the first match per role.
    ///
    /// # Errors
    ///
    /// Returns [`PrefdocError::MissingSource`] when a role has no matching
    /// path.
    pub fn from_paths(paths: &[Utf8PathBuf]) -> Result<Self, PrefdocError> {
        Ok(Self {
            markup: find_role(paths, &["xul"], "markup", "xul")?,
            entities: find_role(paths, &["dtd"], "entities", "dtd")?,
            defaults: find_role(paths, &["yml", "yaml"], "defaults", "yml")?,
        })
    }
}

fn find_role(
    paths: &[Utf8PathBuf],
    extensions: &[&str],
    role: &'static str,
    extension: &'static str,
) -> Result<Utf8PathBuf, PrefdocError> {
    paths
        .iter()
        .find(|path| {
            path.extension()
                .is_some_and(|ext| extensions.contains(&ext))
        })
        .cloned()
        .ok_or(PrefdocError::MissingSource { role, extension })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(raw: &[&str]) -> Vec<Utf8PathBuf> {
        raw.iter().map(Utf8PathBuf::from).collect()
    }

    #[test]
    fn classifies_sources_by_extension() {
        let sources = SourceSet::from_paths(&paths(&[
            "Rakefile",
            "defaults/preferences/defaults.yml",
            "content/preferences.xul",
            "locale/en-US/outliner.dtd",
        ]));
        #[allow(clippy::expect_used, reason = "tests fail loudly on fixture errors")]
        let sources = sources.expect("all roles present");
        assert_eq!(sources.markup.as_str(), "content/preferences.xul");
        assert_eq!(sources.entities.as_str(), "locale/en-US/outliner.dtd");
        assert_eq!(
            sources.defaults.as_str(),
            "defaults/preferences/defaults.yml"
        );
    }

    #[test]
    fn yaml_extension_also_matches_defaults() {
        let sources =
            SourceSet::from_paths(&paths(&["a.xul", "b.dtd", "c.yaml"]));
        assert!(sources.is_ok());
    }

    #[test]
    fn missing_role_is_reported() {
        let result = SourceSet::from_paths(&paths(&["a.xul", "b.dtd"]));
        assert!(matches!(
            result,
            Err(PrefdocError::MissingSource {
                role: "defaults",
                ..
            })
        ));
    }
}
