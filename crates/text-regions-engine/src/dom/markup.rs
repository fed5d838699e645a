use std::sync::OnceLock;

use regex::Regex;

/// A wrapper element description parsed from an opening-tag fragment.
///
/// Accepts `<i>`, `<a href="x" class='y'>`, `<br/>` and `<b></b>`. Text
/// content, nested elements and anything else are rejected: this is only
/// enough markup to name a wrapper, not an HTML parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    tag: String,
    attributes: Vec<(String, String)>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MarkupError {
    #[error("wrapper markup is empty")]
    Empty,
    #[error("malformed wrapper markup: {0:?}")]
    Malformed(String),
    #[error("closing tag </{found}> does not match <{expected}>")]
    MismatchedClose { expected: String, found: String },
}

fn open_tag_regex() -> &'static Regex {
    static OPEN: OnceLock<Regex> = OnceLock::new();
    OPEN.get_or_init(|| {
        Regex::new(
            r#"^<([A-Za-z][A-Za-z0-9-]*)((?:\s+[A-Za-z_:][-A-Za-z0-9_:.]*(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'=<>`/]+))?)*)\s*(/?)>"#,
        )
        .expect("Invalid open tag regex")
    })
}

fn attribute_regex() -> &'static Regex {
    static ATTR: OnceLock<Regex> = OnceLock::new();
    ATTR.get_or_init(|| {
        Regex::new(
            r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`/]+)))?"#,
        )
        .expect("Invalid attribute regex")
    })
}

fn close_tag_regex() -> &'static Regex {
    static CLOSE: OnceLock<Regex> = OnceLock::new();
    CLOSE.get_or_init(|| {
        Regex::new(r"^</([A-Za-z][A-Za-z0-9-]*)\s*>$").expect("Invalid close tag regex")
    })
}

impl Markup {
    pub fn parse(input: &str) -> Result<Self, MarkupError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(MarkupError::Empty);
        }

        let open = open_tag_regex()
            .captures(input)
            .ok_or_else(|| MarkupError::Malformed(input.to_string()))?;
        let whole = open.get(0).map_or(0, |m| m.end());
        let tag = open
            .get(1)
            .map(|m| m.as_str().to_ascii_lowercase())
            .ok_or_else(|| MarkupError::Malformed(input.to_string()))?;
        let self_closing = open.get(3).is_some_and(|m| !m.as_str().is_empty());

        let attributes = open
            .get(2)
            .map(|m| {
                attribute_regex()
                    .captures_iter(m.as_str())
                    .filter_map(|c| {
                        let name = c.get(1)?.as_str().to_ascii_lowercase();
                        let value = c
                            .get(2)
                            .or_else(|| c.get(3))
                            .or_else(|| c.get(4))
                            .map_or("", |v| v.as_str());
                        Some((name, value.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let rest = input[whole..].trim();
        if !rest.is_empty() {
            if self_closing {
                return Err(MarkupError::Malformed(input.to_string()));
            }
            let close = close_tag_regex()
                .captures(rest)
                .ok_or_else(|| MarkupError::Malformed(input.to_string()))?;
            let found = close.get(1).map_or("", |m| m.as_str());
            if !found.eq_ignore_ascii_case(&tag) {
                return Err(MarkupError::MismatchedClose {
                    expected: tag,
                    found: found.to_string(),
                });
            }
        }

        Ok(Self { tag, attributes })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }
}

impl std::str::FromStr for Markup {
    type Err = MarkupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("<i>", "i")]
    #[case("  <EM>  ", "em")]
    #[case("<br/>", "br")]
    #[case("<b></b>", "b")]
    #[case("<my-tag ></MY-TAG>", "my-tag")]
    fn parses_bare_tags(#[case] input: &str, #[case] tag: &str) {
        let markup = Markup::parse(input).unwrap();
        assert_eq!(markup.tag(), tag);
        assert!(markup.attributes().is_empty());
    }

    #[test]
    fn parses_attributes_in_every_quoting_style() {
        let markup: Markup = r#"<a href="/x y" class='hit' data-n=3 hidden>"#.parse().unwrap();
        assert_eq!(markup.tag(), "a");
        assert_eq!(
            markup.attributes(),
            &[
                ("href".to_string(), "/x y".to_string()),
                ("class".to_string(), "hit".to_string()),
                ("data-n".to_string(), "3".to_string()),
                ("hidden".to_string(), String::new()),
            ]
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_empty(#[case] input: &str) {
        assert_eq!(Markup::parse(input), Err(MarkupError::Empty));
    }

    #[rstest]
    #[case("i")]
    #[case("<i")]
    #[case("<i>text</i>")]
    #[case("<i><b>")]
    #[case("<br/></br>")]
    #[case("< i>")]
    fn rejects_malformed(#[case] input: &str) {
        assert!(matches!(
            Markup::parse(input),
            Err(MarkupError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_mismatched_close() {
        assert_eq!(
            Markup::parse("<i></b>"),
            Err(MarkupError::MismatchedClose {
                expected: "i".to_string(),
                found: "b".to_string(),
            })
        );
    }
}
