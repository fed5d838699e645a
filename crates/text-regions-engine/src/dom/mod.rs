//! # Document Tree
//!
//! An arena-backed element/text tree that regions point into.
//!
//! ## Model
//!
//! - Every node lives in one `Vec` owned by [`Document`] and is addressed by a
//!   copyable [`NodeId`]
//! - Node `0` is the document root: it has no parent, is never detached and
//!   never appears in a covering set
//! - Removing a node only detaches it. The slot stays in the arena, so a
//!   stale [`NodeId`] held by an old region still resolves to *something*
//!   instead of dangling
//! - Text offsets count `char`s, not bytes
//!
//! ## Modules
//!
//! - **`markup`**: [`Markup`], the opening-tag fragment used to create wrappers
//! - **`traverse`**: pre-order walks, tree paths and block ancestry

pub mod markup;
pub mod traverse;

pub use markup::{Markup, MarkupError};

use log::trace;

use crate::options::Options;

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Element {
        /// Lower-cased tag name.
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomError {
    #[error("node {0:?} cannot hold children")]
    NotAnElement(NodeId),
    #[error("node {0:?} is not attached to a parent")]
    Detached(NodeId),
    #[error("node {child:?} is an ancestor of {parent:?}")]
    WouldCycle { parent: NodeId, child: NodeId },
    #[error("nodes to wrap do not share a parent")]
    NotSiblings,
    #[error("nodes to wrap are not adjacent siblings")]
    NotContiguous,
    #[error("no nodes to wrap")]
    EmptyRun,
}

/// A mutable document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    options: Options,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
            options,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    // --- node creation ---

    /// Create a detached element. The tag is lower-cased.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        })
    }

    /// Create a detached element described by `markup`.
    pub fn create_element_with(&mut self, markup: &Markup) -> NodeId {
        self.push(NodeKind::Element {
            tag: markup.tag().to_string(),
            attributes: markup.attributes().to_vec(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create an element and append it as the last child of `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Result<NodeId, DomError> {
        let id = self.create_element(tag);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Create a text node and append it as the last child of `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DomError> {
        let id = self.create_text(text);
        self.append_child(parent, id)?;
        Ok(id)
    }

    // --- inspection ---

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Text(_))
    }

    /// Tag name of an element, `None` for text and the root.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Own content of a text node; empty for anything else.
    pub fn text_of(&self, id: NodeId) -> &str {
        match self.kind(id) {
            NodeKind::Text(text) => text,
            _ => "",
        }
    }

    /// Length of a text node in chars.
    pub fn text_len(&self, id: NodeId) -> usize {
        self.text_of(id).chars().count()
    }

    /// Concatenated text of `id` and all its descendants.
    pub fn collect_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text_into(id, &mut out);
        out
    }

    fn collect_text_into(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Text(text) => out.push_str(text),
            _ => {
                for child in self.children(id) {
                    self.collect_text_into(*child, out);
                }
            }
        }
    }

    pub fn sibling_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.sibling_index(id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// True when `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// True when `id` is the root or can reach it through its parents.
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root() || self.is_ancestor(self.root(), id)
    }

    // --- mutation ---

    /// Append `child` as the last child of `parent`, moving it if it is
    /// already attached elsewhere.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Insert `child` immediately before `reference`.
    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_at_offset(reference, child, 0)
    }

    /// Insert `child` immediately after `reference`.
    pub fn insert_after(&mut self, reference: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_at_offset(reference, child, 1)
    }

    fn insert_at_offset(
        &mut self,
        reference: NodeId,
        child: NodeId,
        offset: usize,
    ) -> Result<(), DomError> {
        let parent = self.parent(reference).ok_or(DomError::Detached(reference))?;
        if child == reference {
            return Ok(());
        }
        self.check_insert(parent, child)?;
        self.detach(child);
        // Detaching `child` may have shifted `reference` when they were siblings.
        let index = self
            .sibling_index(reference)
            .ok_or(DomError::Detached(reference))?;
        self.nodes[parent.0].children.insert(index + offset, child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.is_text(parent) {
            return Err(DomError::NotAnElement(parent));
        }
        if child == parent || self.is_ancestor(child, parent) || child == self.root() {
            return Err(DomError::WouldCycle { parent, child });
        }
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    /// Detach `id` and its subtree from the tree.
    ///
    /// No-op for the root and for nodes that are already detached.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root() {
            return;
        }
        trace!("removing node {id:?}");
        self.detach(id);
    }

    /// Split a text node at `offset` chars.
    ///
    /// The node keeps the head; the tail becomes a new text node inserted as
    /// its next sibling and is returned. Nothing is split (and `None` is
    /// returned) at offset 0, at or past the end, or for non-text nodes.
    pub fn split_text(&mut self, id: NodeId, offset: usize) -> Option<NodeId> {
        let len = self.text_len(id);
        if !self.is_text(id) || offset == 0 || offset >= len {
            return None;
        }
        let tail = match &mut self.nodes[id.0].kind {
            NodeKind::Text(text) => {
                let at = byte_offset(text, offset);
                text.split_off(at)
            }
            _ => return None,
        };
        let tail_id = self.create_text(&tail);
        match self.parent(id) {
            Some(parent) => {
                let index = self.sibling_index(id)?;
                self.nodes[parent.0].children.insert(index + 1, tail_id);
                self.nodes[tail_id.0].parent = Some(parent);
            }
            None => trace!("split detached text node {id:?}; tail left detached"),
        }
        trace!("split text node {id:?} at {offset}, tail {tail_id:?}");
        Some(tail_id)
    }

    /// Move a run of adjacent siblings into a new wrapper element built from
    /// `markup`. The wrapper takes the run's place and is returned.
    pub fn wrap_nodes(&mut self, nodes: &[NodeId], markup: &Markup) -> Result<NodeId, DomError> {
        let first = *nodes.first().ok_or(DomError::EmptyRun)?;
        let parent = self.parent(first).ok_or(DomError::Detached(first))?;
        let mut indices = Vec::with_capacity(nodes.len());
        for node in nodes {
            if self.parent(*node) != Some(parent) {
                return Err(DomError::NotSiblings);
            }
            indices.push(self.sibling_index(*node).ok_or(DomError::Detached(*node))?);
        }
        if indices.windows(2).any(|w| w[1] != w[0] + 1) {
            return Err(DomError::NotContiguous);
        }

        let wrapper = self.create_element_with(markup);
        self.insert_before(first, wrapper)?;
        for node in nodes {
            self.append_child(wrapper, *node)?;
        }
        trace!("wrapped {} node(s) in <{}>", nodes.len(), markup.tag());
        Ok(wrapper)
    }
}

/// Byte index of the `chars`-th char in `text`, clamped to its length.
pub(crate) fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(index, _)| index)
}

/// Slice `text` by char offsets, clamping both ends.
pub(crate) fn char_slice(text: &str, from: usize, to: usize) -> &str {
    let start = byte_offset(text, from);
    let end = byte_offset(text, to).max(start);
    &text[start..end]
}
