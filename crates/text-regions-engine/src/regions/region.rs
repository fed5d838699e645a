use std::cmp::Ordering;
use std::collections::BTreeSet;

use log::trace;

use super::coalesce::coalesce;
use super::point::Point;
use crate::dom::{DomError, Document, Markup, MarkupError, NodeId, char_slice};

/// A span of text between two [`Point`]s, `start <= end` in document order.
///
/// Regions are immutable values; editing acts on the tree. Any edit that
/// restructures a text node a region points into makes the region stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    start: Point,
    end: Point,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegionError {
    #[error("point {0:?} does not name an offset inside an attached text node")]
    InvalidPoint(Point),
    #[error("region start {start:?} is after its end {end:?}")]
    Reversed { start: Point, end: Point },
    #[error(transparent)]
    Markup(#[from] MarkupError),
    #[error(transparent)]
    Dom(#[from] DomError),
}

impl Region {
    /// Build a region, checking both points against `doc`.
    pub fn new(doc: &Document, start: Point, end: Point) -> Result<Self, RegionError> {
        for point in [start, end] {
            if !point.is_valid(doc) {
                return Err(RegionError::InvalidPoint(point));
            }
        }
        if doc.compare_points(&start, &end) == Ordering::Greater {
            return Err(RegionError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a region without looking at the document.
    pub fn new_unchecked(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Ascending-by-start comparator.
    pub fn cmp_by_start(&self, other: &Region, doc: &Document) -> Ordering {
        doc.compare_points(&self.start, &other.start)
    }

    /// Ascending-by-end comparator.
    pub fn cmp_by_end(&self, other: &Region, doc: &Document) -> Ordering {
        doc.compare_points(&self.end, &other.end)
    }

    /// The characters covered by this region.
    pub fn text(&self, doc: &Document) -> String {
        self.pieces(doc)
            .iter()
            .map(|p| char_slice(doc.text_of(p.start.node), p.start.offset, p.end.offset))
            .collect()
    }

    /// One single-node region per covered text node, empty pieces dropped.
    fn pieces(&self, doc: &Document) -> Vec<Region> {
        doc.text_nodes_between(self.start.node, self.end.node)
            .into_iter()
            .filter_map(|node| {
                let from = if node == self.start.node { self.start.offset } else { 0 };
                let to = if node == self.end.node {
                    self.end.offset
                } else {
                    doc.text_len(node)
                };
                (from < to).then(|| Region::new_unchecked(Point::new(node, from), Point::new(node, to)))
            })
            .collect()
    }

    /// The minimal set of nodes whose content is exactly this region, in
    /// document order.
    ///
    /// Splits the boundary text nodes so the region starts and ends on node
    /// boundaries, collects every leaf from the first covered text node to
    /// the last, then replaces full sibling runs with their parent. Points
    /// of other regions inside the split nodes after this region's start go
    /// stale.
    pub fn parents(&self, doc: &mut Document) -> Vec<NodeId> {
        let root = doc.root();
        self.covering(doc, root)
    }

    /// [`Region::parents`] with promotion limited to strict descendants of
    /// `ceiling`.
    fn covering(&self, doc: &mut Document, ceiling: NodeId) -> Vec<NodeId> {
        if self.is_empty() {
            return Vec::new();
        }

        // End first: the start node keeps its head, so the start offset stays valid.
        doc.split_text(self.end.node, self.end.offset);
        let mut last = self.end.node;
        let first = if self.start.offset == 0 {
            Some(self.start.node)
        } else {
            match doc.split_text(self.start.node, self.start.offset) {
                Some(tail) => {
                    if self.start.node == self.end.node {
                        last = tail;
                    }
                    Some(tail)
                }
                None => doc.next_text(self.start.node),
            }
        };
        let include_last = self.end.offset > 0;

        let mut covering = BTreeSet::new();
        let mut current = first;
        while let Some(node) = current {
            if node == last {
                if include_last {
                    covering.insert(node);
                }
                break;
            }
            if doc.children(node).is_empty() {
                covering.insert(node);
            }
            current = doc.next_in_preorder(node);
        }
        trace!("region {self:?} seeds {} leaf node(s)", covering.len());

        let promotion = doc.options().promotion;
        coalesce(doc, &mut covering, promotion, ceiling);

        let mut nodes: Vec<NodeId> = covering.into_iter().collect();
        nodes.sort_by_cached_key(|n| doc.path(*n));
        nodes
    }

    /// Wrap this region in a new element described by `markup`.
    ///
    /// The wrapper always goes inside the innermost element holding both
    /// ends of the region: covering every child of that element wraps the
    /// children, not the element. The covering nodes below it must be
    /// adjacent siblings, so a region crossing element boundaries usually
    /// needs [`Region::split_by_elements`] first. Returns `None` for an
    /// empty region.
    pub fn wrap(&self, doc: &mut Document, markup: &str) -> Result<Option<NodeId>, RegionError> {
        let markup = Markup::parse(markup)?;
        self.wrap_with(doc, &markup)
    }

    /// Like [`Region::wrap`] with already parsed markup.
    pub fn wrap_with(&self, doc: &mut Document, markup: &Markup) -> Result<Option<NodeId>, RegionError> {
        let ceiling = doc.common_ancestor(self.start.node, self.end.node);
        let nodes = self.covering(doc, ceiling);
        if nodes.is_empty() {
            return Ok(None);
        }
        Ok(Some(doc.wrap_nodes(&nodes, markup)?))
    }

    /// Split into regions that each lie within a run of adjacent text
    /// siblings, i.e. inside a single element.
    pub fn split_by_elements(&self, doc: &Document) -> Vec<Region> {
        self.split_where(doc, |doc, prev, next| doc.next_sibling(prev) == Some(next))
    }

    /// Split into regions that each lie within a single block element.
    pub fn split_by_block_elements(&self, doc: &Document) -> Vec<Region> {
        self.split_where(doc, |doc, prev, next| {
            doc.block_ancestor(prev) == doc.block_ancestor(next)
        })
    }

    fn split_where<F>(&self, doc: &Document, joins: F) -> Vec<Region>
    where
        F: Fn(&Document, NodeId, NodeId) -> bool,
    {
        let pieces = self.pieces(doc);
        if pieces.is_empty() {
            return vec![*self];
        }

        let mut out: Vec<Region> = Vec::new();
        for piece in pieces {
            match out.last_mut() {
                Some(last) if joins(doc, last.end.node, piece.start.node) => last.end = piece.end,
                _ => out.push(piece),
            }
        }
        out
    }
}
