//! Arena document tree for the preference-pane markup.
//!
//! The markup is parsed into a navigable tree of element, text, and comment
//! nodes with child and next-sibling links. Entity references in text and
//! attribute values are resolved against the companion [`EntityTable`]
//! during construction; comment text is kept verbatim.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::entities::EntityTable;
use crate::error::PrefdocError;

const ROOT: NodeId = NodeId(0);

/// Handle to one node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Element with its tag name and attributes in document order.
    Element {
        /// Tag name.
        name: String,
        /// Attribute key/value pairs, entity references resolved.
        attrs: Vec<(String, String)>,
    },
    /// Character data between elements.
    Text(String),
    /// A `<!-- … -->` comment, interior text verbatim.
    Comment(String),
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    children: Vec<NodeId>,
    next_sibling: Option<NodeId>,
}

impl Node {
    fn container() -> Self {
        Self::new(NodeKind::Element {
            name: String::new(),
            attrs: Vec::new(),
        })
    }

    const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            next_sibling: None,
        }
    }
}

/// Parsed markup document.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Parses markup text into a tree, resolving entity references against
    /// `entities`.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed markup or an unresolvable entity
    /// reference.
    pub fn parse(markup: &str, entities: &EntityTable) -> Result<Self, PrefdocError> {
        let mut reader = Reader::from_str(markup);
        let mut doc = Self {
            nodes: vec![Node::container()],
        };
        let mut open: Vec<NodeId> = vec![ROOT];
        let mut buf = Vec::new();
        loop {
            let position = reader.buffer_position();
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|source| PrefdocError::Markup { position, source })?;
            match event {
                Event::Start(ref start) => {
                    let node = element(start, entities, position)?;
                    let id = doc.append(last_open(&open), node);
                    open.push(id);
                }
                Event::Empty(ref start) => {
                    let node = element(start, entities, position)?;
                    doc.append(last_open(&open), node);
                }
                Event::End(_) => {
                    if open.len() > 1 {
                        open.pop();
                    }
                }
                Event::Text(ref text) => {
                    let expanded = entities.expand(&String::from_utf8_lossy(text))?;
                    doc.append(last_open(&open), Node::new(NodeKind::Text(expanded)));
                }
                Event::CData(ref cdata) => {
                    let text = String::from_utf8_lossy(cdata).into_owned();
                    doc.append(last_open(&open), Node::new(NodeKind::Text(text)));
                }
                Event::Comment(ref comment) => {
                    let text = String::from_utf8_lossy(comment).into_owned();
                    doc.append(last_open(&open), Node::new(NodeKind::Comment(text)));
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        tracing::debug!(nodes = doc.nodes.len(), "parsed markup tree");
        Ok(doc)
    }

    /// Synthetic container above the top-level nodes.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        ROOT
    }

    /// Payload of `id`.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// Tag name when `id` is an element.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { name, .. } => Some(name),
            NodeKind::Text(_) | NodeKind::Comment(_) => None,
        }
    }

    /// Attribute value when `id` is an element carrying `name`.
    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeKind::Text(_) | NodeKind::Comment(_) => None,
        }
    }

    /// Sets (or adds) an attribute on an element node.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: String) {
        if let NodeKind::Element { attrs, .. } = &mut self.node_mut(id).kind {
            match attrs.iter_mut().find(|(key, _)| key == name) {
                Some(slot) => slot.1 = value,
                None => attrs.push((name.to_owned(), value)),
            }
        }
    }

    /// Child nodes of `id` in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Following sibling of `id`, if any.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    /// First following sibling of `id` that is an element.
    #[must_use]
    pub fn next_element(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.next_sibling(id);
        while let Some(node) = current {
            if matches!(self.node(node).kind, NodeKind::Element { .. }) {
                return Some(node);
            }
            current = self.next_sibling(node);
        }
        None
    }

    /// Concatenated text of all text nodes beneath `id`.
    #[must_use]
    pub fn inner_text(&self, id: NodeId) -> String {
        let mut text = String::new();
        for node in self.descendants(id) {
            if let NodeKind::Text(chunk) = &self.node(node).kind {
                text.push_str(chunk);
            }
        }
        text
    }

    /// Pre-order iterator over every node beneath `id`, `id` excluded.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        let previous = self.node(parent).children.last().copied();
        if let Some(prev) = previous {
            self.node_mut(prev).next_sibling = Some(id);
        }
        self.node_mut(parent).children.push(id);
        id
    }
}

/// Pre-order document traversal produced by [`Document::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

fn last_open(open: &[NodeId]) -> NodeId {
    open.last().copied().unwrap_or(ROOT)
}

fn element(
    start: &BytesStart<'_>,
    entities: &EntityTable,
    position: usize,
) -> Result<Node, PrefdocError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| PrefdocError::Markup {
            position,
            source: quick_xml::Error::from(err),
        })?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = entities.expand(&String::from_utf8_lossy(&attribute.value))?;
        attrs.push((key, value));
    }
    Ok(Node::new(NodeKind::Element { name, attrs }))
}
