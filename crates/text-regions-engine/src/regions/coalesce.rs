use std::collections::BTreeSet;

use log::trace;

use crate::dom::{Document, NodeId};
use crate::options::Promotion;

/// Replace full sibling runs in `nodes` by their parent until nothing changes.
///
/// A parent qualifies when every one of its children is in the set, even if
/// the children were contributed by different regions. Only strict
/// descendants of `ceiling` are promoted into; pass the root for no limit.
/// Returns the number of passes that promoted something.
pub(crate) fn coalesce(
    doc: &Document,
    nodes: &mut BTreeSet<NodeId>,
    promotion: Promotion,
    ceiling: NodeId,
) -> usize {
    let mut rounds = 0;
    loop {
        let candidates: BTreeSet<NodeId> = nodes
            .iter()
            .filter_map(|n| doc.parent(*n))
            .filter(|p| *p != ceiling && doc.is_ancestor(ceiling, *p))
            .collect();

        let mut progress = false;
        for candidate in candidates {
            let children = doc.children(candidate);
            if children.iter().all(|c| nodes.contains(c)) {
                for child in children {
                    nodes.remove(child);
                }
                nodes.insert(candidate);
                trace!("promoted {} children to {candidate:?}", children.len());
                progress = true;
                if promotion == Promotion::SinglePerRound {
                    break;
                }
            }
        }

        if !progress {
            return rounds;
        }
        rounds += 1;
    }
}
