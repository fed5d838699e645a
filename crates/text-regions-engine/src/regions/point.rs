use std::cmp::Ordering;

use crate::dom::{Document, NodeId};

/// A position in a document: a text node plus a char offset into it.
///
/// Points are plain values. They go stale as soon as the text node they
/// name is split past `offset`, moved or removed; nothing tracks that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub node: NodeId,
    pub offset: usize,
}

/// Sort key giving the total document order of [`Point`]s.
///
/// Compares the node's tree path first, then the offset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    path: Vec<usize>,
    offset: usize,
}

impl Point {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }

    pub fn position(&self, doc: &Document) -> Position {
        Position {
            path: doc.path(self.node),
            offset: self.offset,
        }
    }

    /// True when the point names an attached text node and an offset inside it.
    pub fn is_valid(&self, doc: &Document) -> bool {
        doc.is_text(self.node) && doc.is_attached(self.node) && self.offset <= doc.text_len(self.node)
    }
}

impl Document {
    /// Document order of two points.
    pub fn compare_points(&self, a: &Point, b: &Point) -> Ordering {
        if a.node == b.node {
            return a.offset.cmp(&b.offset);
        }
        self.compare_nodes(a.node, b.node)
    }
}
