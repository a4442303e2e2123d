//! # Element Tree
//!
//! A small arena-backed element tree that stands in for a browser document.
//! Headings are read from it and the generated table of contents is written
//! back into it.
//!
//! Nodes are addressed by [`NodeId`] handles. A node is never freed while its
//! [`Document`] lives; nodes that were created but never appended are simply
//! unreachable from [`Document::body`].

pub mod html;

use crate::error::TocError;

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// An element: tag name plus the handful of attributes the TOC cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Remaining attributes in insertion order (`href`, `title`, ...).
    pub attributes: Vec<(String, String)>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    body: NodeId,
}

impl Document {
    /// Create an empty document containing only a `<body>` element.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            body: NodeId(0),
        };
        doc.body = doc.create_element("body");
        doc
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.push_node(NodeKind::Element(Element::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push_node(NodeKind::Text(text.into()))
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// The child must be detached, `parent` must be an element, and the
    /// append must not create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TocError> {
        let reject = |reason| TocError::InvalidAppend {
            parent,
            child,
            reason,
        };

        if !self.contains(parent) || !self.contains(child) {
            return Err(reject("node does not belong to this document"));
        }
        if self.element(parent).is_none() {
            return Err(reject("parent is not an element"));
        }
        if self.nodes[child.0].parent.is_some() {
            return Err(reject("child already has a parent"));
        }
        if self.ancestors_inclusive(parent).any(|n| n == child) {
            return Err(reject("child is an ancestor of parent"));
        }

        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Convenience: create a text node and append it to `parent`.
    pub fn append_text(
        &mut self,
        parent: NodeId,
        text: impl Into<String>,
    ) -> Result<NodeId, TocError> {
        let text = self.create_text(text);
        self.append_child(parent, text)?;
        Ok(text)
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.nodes.get(node.0).map(|n| &n.kind)
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match self.kind(node)? {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node.0)?.kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.tag.as_str())
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.element(node).and_then(|el| el.id.as_deref())
    }

    /// Set the id of an element. Text nodes carry no id and are left alone.
    pub fn set_id(&mut self, node: NodeId, id: impl Into<String>) {
        if let Some(el) = self.element_mut(node) {
            el.id = Some(id.into());
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: impl Into<String>) {
        if let Some(el) = self.element_mut(node) {
            let class = class.into();
            if !el.classes.contains(&class) {
                el.classes.push(class);
            }
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    /// Set an attribute, replacing any previous value of the same name.
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        if let Some(el) = self.element_mut(node) {
            let (name, value) = (name.into(), value.into());
            match el.attributes.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => el.attributes.push((name, value)),
            }
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Element children only, skipping text nodes.
    pub fn child_elements(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node)
            .iter()
            .copied()
            .filter(|&c| self.element(c).is_some())
    }

    /// All descendants of `node` in document (pre-)order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(node).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    fn ancestors_inclusive(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(node), move |&n| self.parent(n))
    }

    /// Concatenated text of all descendant text nodes (or the node itself
    /// when it is a text node).
    pub fn text_content(&self, node: NodeId) -> String {
        if let Some(NodeKind::Text(text)) = self.kind(node) {
            return text.clone();
        }
        self.descendants(node)
            .filter_map(|n| match self.kind(n) {
                Some(NodeKind::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order iterator returned by [`Document::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(node).iter().rev().copied());
        Some(node)
    }
}
