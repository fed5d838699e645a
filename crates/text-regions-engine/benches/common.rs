// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use text_regions_engine::{Document, NodeId, Point, Region, Regions};

/// `paragraphs` x `<p>Some plain text <b>with bold</b> and <i>italic</i> runs.</p>`
/// under one `<div>`, returning the text nodes in document order.
#[allow(dead_code)]
pub fn generate_document(paragraphs: usize) -> (Document, Vec<NodeId>) {
    let mut doc = Document::new();
    let div = doc.append_element(doc.root(), "div").unwrap();
    let mut texts = Vec::new();
    for _ in 0..paragraphs {
        let p = doc.append_element(div, "p").unwrap();
        texts.push(doc.append_text(p, "Some plain text ").unwrap());
        let b = doc.append_element(p, "b").unwrap();
        texts.push(doc.append_text(b, "with bold").unwrap());
        texts.push(doc.append_text(p, " and ").unwrap());
        let i = doc.append_element(p, "i").unwrap();
        texts.push(doc.append_text(i, "italic").unwrap());
        texts.push(doc.append_text(p, " runs.").unwrap());
    }
    (doc, texts)
}

/// One region per text node from its second char to its end.
#[allow(dead_code)]
pub fn word_tails(doc: &Document, texts: &[NodeId]) -> Regions {
    texts
        .iter()
        .map(|t| Region::new(doc, Point::new(*t, 1), Point::new(*t, doc.text_len(*t))).unwrap())
        .collect()
}

/// Regions that each start in one text node and end `span` nodes later,
/// so neighbours overlap heavily.
#[allow(dead_code)]
pub fn overlapping_spans(doc: &Document, texts: &[NodeId], span: usize) -> Regions {
    texts
        .windows(span + 1)
        .map(|w| Region::new(doc, Point::new(w[0], 2), Point::new(w[span], 2)).unwrap())
        .collect()
}
