use std::collections::BTreeSet;

/// Element names treated as block-level by [`Document::block_ancestor`].
///
/// [`Document::block_ancestor`]: crate::dom::Document::block_ancestor
pub const DEFAULT_BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "dd",
    "details",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "html",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

/// How ancestor coalescing applies promotions within one pass.
///
/// A promotion replaces every child of a parent with the parent itself once
/// all of those children are in the covering set. Both policies reach the
/// same fixed point; they differ only in how many passes that takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Promotion {
    /// Stop scanning candidates after the first promotion of a pass.
    #[default]
    SinglePerRound,
    /// Apply every eligible promotion found in a pass.
    AllPerRound,
}

/// Tunables for a [`Document`](crate::dom::Document).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Lower-cased element names that count as block boundaries.
    pub block_tags: BTreeSet<String>,
    /// Promotion policy used by covering-set computation.
    pub promotion: Promotion,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            block_tags: DEFAULT_BLOCK_TAGS.iter().map(|t| t.to_string()).collect(),
            promotion: Promotion::default(),
        }
    }
}

impl Options {
    /// Replace the block element set. Names are lower-cased.
    pub fn with_block_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.block_tags = tags
            .into_iter()
            .map(|t| t.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    pub fn with_promotion(mut self, promotion: Promotion) -> Self {
        self.promotion = promotion;
        self
    }

    pub fn is_block_tag(&self, tag: &str) -> bool {
        self.block_tags.contains(tag)
    }
}
