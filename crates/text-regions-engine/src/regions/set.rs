use std::collections::BTreeSet;
use std::ops::{Deref, DerefMut};

use log::debug;

use super::coalesce::coalesce;
use super::point::Position;
use super::region::{Region, RegionError};
use crate::dom::{Document, Markup, NodeId};

/// An ordered list of [`Region`]s with aggregate edit operations.
///
/// Stored order is whatever the caller built; nothing here sorts it except
/// [`Regions::safely_modifiable`]. Duplicates and overlaps are allowed.
///
/// ## Ordering is the caller's job
///
/// [`Regions::wrap`] runs over the stored order as is. Wrapping one region
/// can restructure text nodes that a later region still points into. When
/// regions may overlap, or are not already last-in-document first, call
/// [`Regions::safely_modifiable`] and edit the result instead:
///
/// ```
/// use text_regions_engine::{Document, Point, Region, Regions};
///
/// let mut doc = Document::new();
/// let p = doc.append_element(doc.root(), "p").unwrap();
/// let text = doc.append_text(p, "Partly").unwrap();
///
/// let mut regions = Regions::new();
/// regions.push(Region::new(&doc, Point::new(text, 1), Point::new(text, 4)).unwrap());
/// regions.push(Region::new(&doc, Point::new(text, 3), Point::new(text, 6)).unwrap());
///
/// let safe = regions.safely_modifiable(&doc);
/// assert_eq!(safe.len(), 1);
/// assert_eq!(safe.first().unwrap().text(&doc), "artly");
///
/// safe.wrap(&mut doc, "<em>").unwrap();
/// assert_eq!(doc.collect_text(p), "Partly");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Regions(Vec<Region>);

impl Regions {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn into_inner(self) -> Vec<Region> {
        self.0
    }

    /// The region at index 0.
    ///
    /// After [`Regions::safely_modifiable`] this is the region closest to
    /// the end of the document.
    pub fn first(&self) -> Option<&Region> {
        self.0.first()
    }

    /// The region at the final index.
    ///
    /// After [`Regions::safely_modifiable`] this is the region closest to
    /// the start of the document.
    pub fn last(&self) -> Option<&Region> {
        self.0.last()
    }

    /// Each region's text, in stored order.
    pub fn texts(&self, doc: &Document) -> Vec<String> {
        self.0.iter().map(|r| r.text(doc)).collect()
    }

    /// The nodes spanning all of these regions and nothing else.
    ///
    /// This is not just the union of each [`Region::parents`]: wherever every
    /// child of a node ends up covered, possibly by different regions, the
    /// node replaces its children. The result therefore need not be a set of
    /// siblings. Text nodes at region boundaries are split; boundaries are
    /// isolated in [safe order](Regions::safely_modifiable) so no region's
    /// split invalidates another region's points.
    pub fn parents(&self, doc: &mut Document) -> BTreeSet<NodeId> {
        let mut covering = BTreeSet::new();
        for region in self.safely_modifiable(doc).iter() {
            covering.extend(region.parents(doc));
        }
        let seeded = covering.len();

        let promotion = doc.options().promotion;
        let root = doc.root();
        let rounds = coalesce(doc, &mut covering, promotion, root);
        debug!(
            "{} region(s) seeded {seeded} node(s); {rounds} promotion round(s) left {}",
            self.0.len(),
            covering.len()
        );
        covering
    }

    /// Remove every node returned by [`Regions::parents`] from the document.
    ///
    /// Like `parents`, this splits region boundaries in
    /// [safe order](Regions::safely_modifiable) internally rather than in
    /// stored order. The stored regions are left as they are, and the set of
    /// removed text does not depend on their order. Points inside removed
    /// subtrees are stale afterwards.
    pub fn remove(&self, doc: &mut Document) {
        let nodes = self.parents(doc);
        debug!("removing {} node(s)", nodes.len());
        for node in nodes {
            doc.remove(node);
        }
    }

    /// Wrap each region, in stored order, in its own copy of `markup`.
    ///
    /// Adjacent regions get two wrappers, not one. Nothing is reordered or
    /// merged first. The first failure is returned and wraps already made
    /// stay in place.
    pub fn wrap(&self, doc: &mut Document, markup: &str) -> Result<Vec<NodeId>, RegionError> {
        let markup = Markup::parse(markup)?;
        let mut wrappers = Vec::with_capacity(self.0.len());
        for region in &self.0 {
            if let Some(wrapper) = region.wrap_with(doc, &markup)? {
                wrappers.push(wrapper);
            }
        }
        debug!("wrapped {} region(s) in <{}>", wrappers.len(), markup.tag());
        Ok(wrappers)
    }

    /// Split every region so each piece lies inside a single element.
    ///
    /// Handy for eliding a span: replace the first piece with an ellipsis and
    /// drop the rest.
    pub fn split_by_elements(&self, doc: &Document) -> Regions {
        self.0.iter().flat_map(|r| r.split_by_elements(doc)).collect()
    }

    /// Split every region so each piece lies inside a single block element.
    ///
    /// Handy before wrapping in an inline element such as `<a>` or `<b>`.
    pub fn split_by_block_elements(&self, doc: &Document) -> Regions {
        self.0
            .iter()
            .flat_map(|r| r.split_by_block_elements(doc))
            .collect()
    }

    /// A version of these regions that can be edited one after another.
    ///
    /// Overlapping and touching regions are merged, and the result is sorted
    /// by descending start, so processing it from index 0 never disturbs a
    /// region that has not been processed yet.
    pub fn safely_modifiable(&self, doc: &Document) -> Regions {
        let mut sorted: Vec<(Position, Position, &Region)> = self
            .0
            .iter()
            .map(|r| (r.start().position(doc), r.end().position(doc), r))
            .collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        // reach[j]: index of the furthest-reaching end among sorted[..=j].
        let mut reach: Vec<usize> = Vec::with_capacity(sorted.len());
        for (j, entry) in sorted.iter().enumerate() {
            let furthest = match reach.last() {
                Some(&k) if sorted[k].1 >= entry.1 => k,
                _ => j,
            };
            reach.push(furthest);
        }

        let mut result = Regions::new();
        let mut i = sorted.len();
        while i > 0 {
            i -= 1;
            let high = i;
            while i > 0 && sorted[reach[i - 1]].1 >= sorted[i].0 {
                i -= 1;
            }
            if i == high {
                result.push(*sorted[i].2);
            } else {
                let end = sorted[i..=high]
                    .iter()
                    .max_by(|a, b| a.1.cmp(&b.1))
                    .map_or(sorted[i].2.end(), |e| e.2.end());
                result.push(Region::new_unchecked(sorted[i].2.start(), end));
            }
        }

        debug!(
            "safely_modifiable: {} region(s) merged into {}",
            self.0.len(),
            result.len()
        );
        result
    }
}

impl Deref for Regions {
    type Target = Vec<Region>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Regions {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Region>> for Regions {
    fn from(regions: Vec<Region>) -> Self {
        Self(regions)
    }
}

impl FromIterator<Region> for Regions {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Region> for Regions {
    fn extend<I: IntoIterator<Item = Region>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Regions {
    type Item = Region;
    type IntoIter = std::vec::IntoIter<Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Regions {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
