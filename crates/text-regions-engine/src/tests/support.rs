//! Test-only helpers: tree building from tag soup, text search and markup
//! rendering. None of this is library API.

use crate::dom::{Document, Markup, NodeId, NodeKind};
use crate::options::Options;
use crate::regions::{Point, Region, Regions};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a document from well-formed tag soup. Unclosed elements are closed
/// at the end of input; there are no entities, comments or implied tags.
pub fn parse(html: &str) -> Document {
    parse_with(Options::default(), html)
}

pub fn parse_with(options: Options, html: &str) -> Document {
    init_logging();
    let mut doc = Document::with_options(options);
    let mut stack = vec![doc.root()];
    let mut rest = html;
    while !rest.is_empty() {
        let top = *stack.last().expect("stack always holds the root");
        if let Some(after) = rest.strip_prefix("</") {
            let close = after.find('>').expect("unterminated closing tag");
            let name = after[..close].trim().to_ascii_lowercase();
            if let Some(open) = stack
                .iter()
                .rposition(|n| doc.tag(*n) == Some(name.as_str()))
            {
                stack.truncate(open);
            }
            rest = &after[close + 1..];
        } else if rest.starts_with('<') {
            let close = rest.find('>').expect("unterminated tag");
            let tag = &rest[..=close];
            let markup = Markup::parse(tag).expect("test markup must parse");
            let element = doc.create_element_with(&markup);
            doc.append_child(top, element).unwrap();
            if !tag.ends_with("/>") {
                stack.push(element);
            }
            rest = &rest[close + 1..];
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            doc.append_text(top, &rest[..end]).unwrap();
            rest = &rest[end..];
        }
    }
    doc
}

/// First element with `tag` in document order.
pub fn select(doc: &Document, tag: &str) -> NodeId {
    doc.descendants(doc.root())
        .into_iter()
        .find(|n| doc.tag(*n) == Some(tag))
        .unwrap_or_else(|| panic!("no <{tag}> in document"))
}

pub fn outer_html(doc: &Document, id: NodeId) -> String {
    match doc.kind(id) {
        NodeKind::Root => inner_html(doc, id),
        NodeKind::Text(text) => html_escape::encode_text(text).into_owned(),
        NodeKind::Element { tag, attributes } => {
            let mut out = format!("<{tag}");
            for (name, value) in attributes {
                out.push_str(&format!(
                    " {name}=\"{}\"",
                    html_escape::encode_double_quoted_attribute(value)
                ));
            }
            out.push('>');
            out.push_str(&inner_html(doc, id));
            out.push_str(&format!("</{tag}>"));
            out
        }
    }
}

pub fn inner_html(doc: &Document, id: NodeId) -> String {
    doc.children(id)
        .iter()
        .map(|c| outer_html(doc, *c))
        .collect()
}

/// Text nodes under `scope` with their flat `[start, end)` char ranges.
fn text_spans(doc: &Document, scope: NodeId) -> Vec<(NodeId, usize, usize)> {
    let mut pos = 0;
    doc.descendants(scope)
        .into_iter()
        .filter(|n| doc.is_text(*n))
        .map(|n| {
            let len = doc.text_len(n);
            let span = (n, pos, pos + len);
            pos += len;
            span
        })
        .collect()
}

/// Concatenated text under `scope`. Block boundaries add no characters.
pub fn flat_text(doc: &Document, scope: NodeId) -> String {
    doc.collect_text(scope)
}

/// Region over flat char offsets `[from, to)` of the text under `scope`.
///
/// A start on a node boundary lands at offset 0 of the following node; an
/// end on a boundary lands at the end of the preceding node.
pub fn region_at(doc: &Document, scope: NodeId, from: usize, to: usize) -> Region {
    let spans = text_spans(doc, scope);
    let start = spans
        .iter()
        .find(|(_, s, e)| *s <= from && from < *e)
        .map(|(n, s, _)| Point::new(*n, from - s))
        .or_else(|| spans.last().map(|(n, s, e)| Point::new(*n, e - s)))
        .expect("scope has text");
    let end = spans
        .iter()
        .find(|(_, s, e)| *s < to && to <= *e)
        .map(|(n, s, _)| Point::new(*n, to - s))
        .or_else(|| spans.first().map(|(n, _, _)| Point::new(*n, 0)))
        .expect("scope has text");
    Region::new(doc, start, end).expect("flat offsets map to a valid region")
}

/// Flat char offset of `point` within the text under `scope`.
pub fn flat_offset(doc: &Document, scope: NodeId, point: Point) -> usize {
    text_spans(doc, scope)
        .iter()
        .find(|(n, _, _)| *n == point.node)
        .map(|(_, s, _)| s + point.offset)
        .expect("point inside scope")
}

/// Every non-overlapping occurrence of `needle` in the text under `scope`.
pub fn find(doc: &Document, scope: NodeId, needle: &str) -> Regions {
    let flat = flat_text(doc, scope);
    flat.match_indices(needle)
        .map(|(byte, m)| {
            let from = flat[..byte].chars().count();
            region_at(doc, scope, from, from + m.chars().count())
        })
        .collect()
}
