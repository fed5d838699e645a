//! Document-order walks over a [`Document`].

use std::cmp::Ordering;

use super::{Document, NodeId, NodeKind};

impl Document {
    /// The node after `id` in depth-first pre-order, or `None` once the walk
    /// leaves the tree `id` belongs to.
    pub fn next_in_preorder(&self, id: NodeId) -> Option<NodeId> {
        if let Some(first) = self.children(id).first() {
            return Some(*first);
        }
        let mut current = id;
        loop {
            if let Some(next) = self.next_sibling(current) {
                return Some(next);
            }
            current = self.parent(current)?;
        }
    }

    /// The first text node strictly after `id` in pre-order.
    pub fn next_text(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.next_in_preorder(id)?;
        loop {
            if self.is_text(current) {
                return Some(current);
            }
            current = self.next_in_preorder(current)?;
        }
    }

    /// All descendants of `scope` in pre-order, `scope` itself excluded.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Text nodes from `from` through `to` inclusive, in pre-order.
    ///
    /// Stops early if the walk runs off the tree before reaching `to`.
    pub fn text_nodes_between(&self, from: NodeId, to: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = Some(from);
        while let Some(node) = current {
            if self.is_text(node) {
                out.push(node);
            }
            if node == to {
                break;
            }
            current = self.next_in_preorder(node);
        }
        out
    }

    /// Child indices leading from the top of `id`'s tree down to `id`.
    ///
    /// For attached nodes the top is the root, so comparing paths
    /// lexicographically compares document position.
    pub fn path(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(index) = self.sibling_index(current) {
            path.push(index);
            match self.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Order two nodes by document position.
    pub fn compare_nodes(&self, a: NodeId, b: NodeId) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        self.path(a).cmp(&self.path(b))
    }

    /// Nearest strict ancestor of `a` that is `b` or contains `b`, or the
    /// root when the two share no other ancestor.
    ///
    /// For two text nodes this is the innermost element holding both.
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> NodeId {
        let mut current = self.parent(a);
        while let Some(node) = current {
            if node == b || self.is_ancestor(node, b) {
                return node;
            }
            current = self.parent(node);
        }
        self.root()
    }

    /// Nearest ancestor element whose tag is a block tag, or the root.
    pub fn block_ancestor(&self, id: NodeId) -> NodeId {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if self.is_block(node) {
                return node;
            }
            current = self.parent(node);
        }
        self.root()
    }

    pub fn is_block(&self, id: NodeId) -> bool {
        match self.kind(id) {
            NodeKind::Element { tag, .. } => self.options().is_block_tag(tag),
            _ => false,
        }
    }
}
