//! Locates the documentation comment logically attached to a markup node.

use crate::markup::{Document, NodeId, NodeKind};

/// Returns the documentation text attached to `node`, or an empty string.
///
/// A node with children is documented by its first non-text child, and only
/// when that child is a comment; any other first child means the node has no
/// documentation. A childless node is documented by its first non-text
/// following sibling, again only when that sibling is a comment. The comment
/// text is normalized: each line stripped, lines rejoined with `\n`, and a
/// trailing newline appended.
#[must_use]
pub fn doc_for(doc: &Document, node: NodeId) -> String {
    let candidate = if doc.children(node).is_empty() {
        following_candidate(doc, node)
    } else {
        child_candidate(doc, node)
    };
    match candidate.map(|id| doc.kind(id)) {
        Some(NodeKind::Comment(text)) => normalize(text),
        _ => String::new(),
    }
}

/// First non-text child; the caller decides whether it is a comment.
fn child_candidate(doc: &Document, node: NodeId) -> Option<NodeId> {
    doc.children(node)
        .iter()
        .copied()
        .find(|&child| !matches!(doc.kind(child), NodeKind::Text(_)))
}

/// First non-text following sibling.
fn following_candidate(doc: &Document, node: NodeId) -> Option<NodeId> {
    let mut current = doc.next_sibling(node);
    while let Some(id) = current {
        if !matches!(doc.kind(id), NodeKind::Text(_)) {
            return Some(id);
        }
        current = doc.next_sibling(id);
    }
    None
}

fn normalize(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "tests fail loudly on fixture errors")]

    use super::*;
    use crate::entities::EntityTable;

    fn parse(markup: &str) -> Document {
        Document::parse(markup, &EntityTable::default()).expect("fixture markup parses")
    }

    fn find(doc: &Document, tag: &str) -> NodeId {
        doc.descendants(doc.root())
            .find(|&id| doc.tag(id) == Some(tag))
            .expect("tag present in fixture")
    }

    #[test]
    fn first_comment_child_is_the_doc() {
        let doc = parse("<pane>\n  <!-- Pane summary. -->\n  <box/>\n</pane>");
        assert_eq!(doc_for(&doc, find(&doc, "pane")), "Pane summary.\n");
    }

    #[test]
    fn element_first_child_means_no_doc() {
        let doc = parse("<pane><box/><!-- too late --></pane>");
        assert_eq!(doc_for(&doc, find(&doc, "pane")), "");
    }

    #[test]
    fn childless_node_takes_the_following_comment() {
        let doc = parse("<pane><item/>\n<!-- Item doc. --></pane>");
        assert_eq!(doc_for(&doc, find(&doc, "item")), "Item doc.\n");
    }

    #[test]
    fn following_element_blocks_the_doc() {
        let doc = parse("<pane><item/><sep/><!-- unreachable --></pane>");
        assert_eq!(doc_for(&doc, find(&doc, "item")), "");
    }

    #[test]
    fn childless_node_without_any_sibling_has_no_doc() {
        let doc = parse("<pane><item/></pane>");
        assert_eq!(doc_for(&doc, find(&doc, "item")), "");
    }

    #[test]
    fn multi_line_comments_are_stripped_per_line() {
        let doc = parse("<pane><item/>\n<!--\n   Line one.\n   Line two.\n--></pane>");
        assert_eq!(doc_for(&doc, find(&doc, "item")), "\nLine one.\nLine two.\n");
    }
}
