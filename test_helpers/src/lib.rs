//! Shared fixtures for `prefdoc` tests.
//!
//! Provides the canonical markup/DTD/defaults sources used across unit and
//! integration tests, plus a tempdir writer for tests that drive the
//! compiled binary.

use std::error::Error;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

/// Preference-name prefix used by the canonical fixtures.
pub const NAME_PREFIX: &str = "extensions.scribe.outliner.";

/// Markup-id prefix used by the canonical fixtures.
pub const ID_PREFIX: &str = "pref-outliner-";

/// Disabled sentinel tab id used by the canonical fixtures.
pub const DISABLED_TAB: &str = "outliner-prefs-disabled";

/// Canonical entity-definition (DTD) source.
#[must_use]
pub fn sample_dtd() -> String {
    r#"<!ENTITY outliner.general "General">
<!ENTITY outliner.export "Export">
<!ENTITY outliner.autosave.label "Automatically save outlines">
<!ENTITY outliner.format.label "Default export format">
"#
    .to_owned()
}

/// Canonical preference-pane markup source.
///
/// Exercises every correlation path: a pane preface, declarations, two
/// visible panels plus the disabled sentinel, an attribute-labelled
/// checkbox, a pre-pass-labelled textbox, a radiogroup with documented
/// options, and a documentation-only binding that stays hidden.
#[must_use]
pub fn sample_markup() -> String {
    r#"<?xml version="1.0"?>
<!DOCTYPE prefpane SYSTEM "chrome://scribe/locale/outliner.dtd">
<prefpane id="outliner-prefs">
  <!--
    Configuration reference for the Scribe outliner.
  -->
  <preferences>
    <preference name="extensions.scribe.outliner.autosave" id="pref-outliner-autosave" type="bool"/>
    <preference name="extensions.scribe.outliner.autosave-interval" id="pref-outliner-autosave-interval" type="int"/>
    <preference name="extensions.scribe.outliner.export-format" id="pref-outliner-export-format" type="string"/>
    <preference name="extensions.scribe.outliner.scratch-dir" id="pref-outliner-scratch-dir" type="string"/>
  </preferences>
  <tabbox>
    <tabs>
      <tab label="&outliner.general;" id="outliner-tab-general"/>
      <tab label="&outliner.export;" id="outliner-tab-export"/>
      <tab label="Disabled" id="outliner-prefs-disabled"/>
    </tabs>
    <tabpanels>
      <tabpanel id="outliner-panel-general">
        <checkbox preference="pref-outliner-autosave" label="&outliner.autosave.label;"/>
        <!--
          Save the open outline in the background.
        -->
        <label value="Autosave interval (minutes)"/>
        <textbox preference="pref-outliner-autosave-interval"/>
        <!--
          Minutes between background saves.
        -->
      </tabpanel>
      <tabpanel id="outliner-panel-export">
        <radiogroup preference="pref-outliner-export-format" label="&outliner.format.label;">
          <radio value="opml" label="OPML"/>
          <!--
            Outline Processor Markup Language.
          -->
          <radio value="md" label="Markdown"/>
          <!--
            Plain Markdown with nested lists.
          -->
        </radiogroup>
      </tabpanel>
      <tabpanel id="outliner-panel-disabled">
        <description>Nothing to configure while the outliner is disabled.</description>
      </tabpanel>
    </tabpanels>
  </tabbox>
  <vbox docpreference="pref-outliner-scratch-dir"/>
  <!--
    Working directory for export scratch files.
  -->
</prefpane>
"#
    .to_owned()
}

/// Canonical defaults source matching the markup's declarations.
#[must_use]
pub fn sample_defaults() -> String {
    r#"autosave: true
autosave-interval: 10
export-format: opml
scratch-dir: ""
"#
    .to_owned()
}

/// The fixture sources written into a temporary directory.
#[derive(Debug)]
pub struct FixtureDir {
    root: Utf8PathBuf,
    _dir: tempfile::TempDir,
}

impl FixtureDir {
    /// Writes the canonical fixtures into a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or one of the files cannot be
    /// created.
    pub fn create() -> Result<Self, Box<dyn Error>> {
        Self::with_sources(&sample_markup(), &sample_dtd(), &sample_defaults())
    }

    /// Writes the given sources into a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or one of the files cannot be
    /// created.
    pub fn with_sources(markup: &str, dtd: &str, defaults: &str) -> Result<Self, Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| format!("non-UTF-8 tempdir: {}", path.display()))?;
        fs::write(root.join("preferences.xul"), markup)?;
        fs::write(root.join("outliner.dtd"), dtd)?;
        fs::write(root.join("defaults.yml"), defaults)?;
        Ok(Self { root, _dir: dir })
    }

    /// Directory holding the fixture files.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Path to the markup source.
    #[must_use]
    pub fn markup_path(&self) -> Utf8PathBuf {
        self.root.join("preferences.xul")
    }

    /// Path to the entity-definition source.
    #[must_use]
    pub fn dtd_path(&self) -> Utf8PathBuf {
        self.root.join("outliner.dtd")
    }

    /// Path to the defaults source.
    #[must_use]
    pub fn defaults_path(&self) -> Utf8PathBuf {
        self.root.join("defaults.yml")
    }

    /// Path the generated document should be written to.
    #[must_use]
    pub fn out_path(&self) -> Utf8PathBuf {
        self.root.join("Configuration.md")
    }
}
