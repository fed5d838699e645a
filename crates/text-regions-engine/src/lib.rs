pub mod dom;
pub mod options;
pub mod regions;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use dom::{DomError, Document, Markup, MarkupError, NodeId, NodeKind};
pub use options::{DEFAULT_BLOCK_TAGS, Options, Promotion};
pub use regions::{Point, Position, Region, RegionError, Regions};
