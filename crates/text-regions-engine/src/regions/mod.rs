/*!
 * # Text Regions
 *
 * Spans of text that may cross element boundaries, and sets of them.
 *
 * ## Building Blocks
 *
 * - **[`Point`]**: a text node plus a char offset, totally ordered in document
 *   order via [`Position`] / [`Document::compare_points`](crate::dom::Document::compare_points)
 * - **[`Region`]**: a `(start, end)` pair of points with single-span primitives:
 *   `text`, `parents` (covering nodes), `wrap`, `split_by_elements`,
 *   `split_by_block_elements`
 * - **[`Regions`]**: an ordered list of regions with the aggregate operations
 *
 * ## The Two Aggregate Algorithms
 *
 * ### Ancestor coalescing (`Regions::parents`)
 *
 * The union of every region's covering nodes, with any parent whose children
 * are *all* covered substituted for those children, repeated until nothing
 * changes. This is what lets `remove()` cut `word blah` across two regions as
 * one piece instead of leaving empty wrappers behind.
 *
 * ### Safe ordering (`Regions::safely_modifiable`)
 *
 * Sort by start, then walk from the end growing each group leftwards while
 * anything earlier reaches the group's start. Each group becomes one region
 * running from its smallest start to its largest end. The output is
 * disjoint, never touching, and descending by start: editing index 0 first
 * only ever restructures text *after* every remaining region.
 *
 * ## Unsafe By Default
 *
 * `Regions::wrap` takes the stored order at face value. Call
 * `safely_modifiable()` first when regions may overlap or are not already in
 * reverse document order. `Regions::remove` and `Regions::parents` split
 * boundaries in safe order internally and leave the stored order alone.
 */

mod coalesce;
pub mod point;
pub mod region;
pub mod set;

pub use point::{Point, Position};
pub use region::{Region, RegionError};
pub use set::Regions;
