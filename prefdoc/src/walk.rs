//! Single-pass correlation of the markup tree into preference records.
//!
//! The walk visits every node in document order once, accumulating the
//! declared panels, the document preface, and the preference records with
//! their documentation, labels, and panel assignments. A label pre-pass
//! runs first, copying label text onto bound controls that lack an explicit
//! `label` attribute.

use tracing::debug;

use crate::error::PrefdocError;
use crate::extract::doc_for;
use crate::markup::{Document, NodeId};
use crate::model::{Namespace, PreferenceRecord};

/// Everything the walk accumulates.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Documentation attached to the top-level pane element.
    pub preface: String,
    /// Panel names in declaration order, the disabled sentinel excluded.
    pub panels: Vec<String>,
    /// Preference records in discovery order.
    pub records: Vec<PreferenceRecord>,
}

/// Copies label text onto the bound control following each `label` element.
///
/// For every `label` element whose next element sibling carries a
/// `preference` or `docpreference` attribute but no `label` attribute, the
/// label's `value` attribute (or its inner text when absent) becomes that
/// sibling's `label` attribute. An explicit `label` attribute always wins.
///
/// # Errors
///
/// Returns [`PrefdocError::MissingLabel`] when the copied label is empty.
pub fn propagate_labels(doc: &mut Document) -> Result<(), PrefdocError> {
    let labels: Vec<NodeId> = doc
        .descendants(doc.root())
        .filter(|&id| doc.tag(id) == Some("label"))
        .collect();
    for label in labels {
        let Some(next) = doc.next_element(label) else {
            continue;
        };
        let Some(key) = binding_key(doc, next).map(ToOwned::to_owned) else {
            continue;
        };
        if doc.attr(next, "label").is_some() {
            continue;
        }
        let value = doc
            .attr(label, "value")
            .map_or_else(|| doc.inner_text(label), ToOwned::to_owned);
        if value.is_empty() {
            return Err(PrefdocError::MissingLabel(key));
        }
        doc.set_attr(next, "label", value);
    }
    Ok(())
}

/// Walks the tree once, correlating declarations, panels, and bindings into
/// a [`WalkOutcome`].
///
/// # Errors
///
/// Returns an error for a malformed or inconsistent declaration, or a
/// binding that names no declared preference.
pub fn correlate(doc: &Document, ns: &Namespace) -> Result<WalkOutcome, PrefdocError> {
    let mut walker = Walker {
        doc,
        ns,
        outcome: WalkOutcome::default(),
        panel: None,
    };
    for id in doc.descendants(doc.root()) {
        walker.visit(id)?;
    }
    debug!(
        panels = walker.outcome.panels.len(),
        records = walker.outcome.records.len(),
        "walk complete"
    );
    Ok(walker.outcome)
}

struct Walker<'a> {
    doc: &'a Document,
    ns: &'a Namespace,
    outcome: WalkOutcome,
    /// Running panel index; `None` until the first panel container.
    panel: Option<usize>,
}

impl Walker<'_> {
    fn visit(&mut self, id: NodeId) -> Result<(), PrefdocError> {
        let Some(tag) = self.doc.tag(id) else {
            return Ok(());
        };
        match tag {
            "prefpane" => self.outcome.preface = doc_for(self.doc, id),
            "preference" => {
                let record = self.declare(id)?;
                self.outcome.records.push(record);
            }
            "tab" => self.declare_panel(id),
            "tabpanel" => self.panel = Some(self.panel.map_or(0, |index| index + 1)),
            _ => {}
        }
        self.bind(id, tag)
    }

    /// Creates a record from a `preference` declaration, checking the
    /// key/name consistency invariant for target preferences.
    fn declare(&self, id: NodeId) -> Result<PreferenceRecord, PrefdocError> {
        let name = require_attr(self.doc, id, "name")?;
        let key = require_attr(self.doc, id, "id")?;
        let value_type = self.doc.attr(id, "type").map(ToOwned::to_owned);
        let is_target = self.ns.is_target(&name);
        if is_target {
            let short_name = name.strip_prefix(&self.ns.name_prefix).unwrap_or(&name);
            let short_key = key.strip_prefix(&self.ns.id_prefix).unwrap_or(&key);
            if short_name != short_key {
                return Err(PrefdocError::KeyMismatch { name, key });
            }
        }
        let mut record = PreferenceRecord::new(name, key, value_type, is_target);
        record.doc = doc_for(self.doc, id);
        Ok(record)
    }

    fn declare_panel(&mut self, id: NodeId) {
        if self.ns.is_disabled_tab(self.doc.attr(id, "id")) {
            return;
        }
        let label = self.doc.attr(id, "label").unwrap_or_default().to_owned();
        self.outcome.panels.push(label);
    }

    /// Applies a `preference`/`docpreference` binding to its record: panel
    /// assignment, explicit label, and appended documentation.
    fn bind(&mut self, id: NodeId, tag: &str) -> Result<(), PrefdocError> {
        let Some(key) = binding_key(self.doc, id) else {
            return Ok(());
        };
        let panel = self
            .panel
            .and_then(|index| self.outcome.panels.get(index))
            .cloned();
        let doc_text = doc_for(self.doc, id);
        let bullets = if tag == "radiogroup" {
            radio_bullets(self.doc, id)
        } else {
            String::new()
        };
        let label = self.doc.attr(id, "label").map(ToOwned::to_owned);
        let record = self
            .outcome
            .records
            .iter_mut()
            .find(|record| record.key == key)
            .ok_or_else(|| PrefdocError::UnknownBinding(key.to_owned()))?;
        record.panel = panel;
        if let Some(label) = label {
            record.label = Some(label);
        }
        record.doc.push_str(&doc_text);
        record.doc.push_str(&bullets);
        Ok(())
    }
}

/// Binding attribute value, visible controls first.
fn binding_key<'a>(doc: &'a Document, id: NodeId) -> Option<&'a str> {
    doc.attr(id, "preference")
        .or_else(|| doc.attr(id, "docpreference"))
}

/// One `* **label**: doc` bullet per documented `radio` option.
fn radio_bullets(doc: &Document, group: NodeId) -> String {
    let mut bullets = String::new();
    for option in doc.descendants(group) {
        if doc.tag(option) != Some("radio") {
            continue;
        }
        let text = doc_for(doc, option);
        if text.is_empty() {
            continue;
        }
        let label = doc.attr(option, "label").unwrap_or_default();
        bullets.push_str(&format!("* **{label}**: {text}"));
    }
    bullets
}

fn require_attr(
    doc: &Document,
    id: NodeId,
    attribute: &'static str,
) -> Result<String, PrefdocError> {
    doc.attr(id, attribute)
        .map(ToOwned::to_owned)
        .ok_or(PrefdocError::MalformedDeclaration { attribute })
}
