use crate::error::{ConfigError, Error, Result};
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use scraper::{Html, Selector};

/// Removes every element matching a list of CSS selectors from a document.
#[derive(Debug, Clone)]
pub struct ElementStripper {
    selectors: Vec<(String, Selector)>,
}

impl ElementStripper {
    /// Parse the selectors. Blank entries are skipped.
    pub fn new(selectors: &[String]) -> Result<Self> {
        let mut parsed = Vec::with_capacity(selectors.len());

        for source in selectors {
            let source = source.trim();

            if source.is_empty() {
                continue;
            }

            match Selector::parse(source) {
                Ok(selector) => parsed.push((source.to_string(), selector)),
                Err(e) => {
                    return Err(ConfigError::InvalidSelector {
                        selector: source.into(),
                        reason: e.to_string(),
                    }
                    .into())
                }
            }
        }

        Ok(Self { selectors: parsed })
    }

    /// Parse `html`, strip it and serialize it back.
    pub fn strip(&self, html: &[u8]) -> Result<Vec<u8>> {
        let mut document = parse_document(html)?;
        self.strip_document(&mut document);
        serialize_document(&document)
    }

    /// Detach every matching subtree, one selector at a time in list order.
    /// Returns the number of matched elements that were still in the document.
    pub fn strip_document(&self, document: &mut Html) -> usize {
        let root = document.tree.root().id();
        let mut removed = 0;

        for (source, selector) in &self.selectors {
            // select walks the whole arena, detached subtrees included
            let ids = document
                .select(selector)
                .filter(|el| el.ancestors().last().map(|a| a.id()) == Some(root))
                .map(|el| el.id())
                .collect::<Vec<_>>();

            for id in ids.iter() {
                if let Some(mut node) = document.tree.get_mut(*id) {
                    node.detach();
                }
            }

            log::debug!("removed {} element(s) matching '{}'", ids.len(), source);
            removed += ids.len();
        }

        removed
    }
}

/// Build the document tree. The input has to be UTF-8.
pub fn parse_document(html: &[u8]) -> Result<Html> {
    let html = std::str::from_utf8(html).map_err(|e| Error::Parse(e.to_string()))?;
    let document = Html::parse_document(html);

    if !document.errors.is_empty() {
        log::trace!("html parser reported {} recoverable error(s)", document.errors.len());
    }

    Ok(document)
}

/// Write the document tree back to HTML.
///
/// The parser runs with scripting enabled, so `noscript` content is raw text
/// and has to be written back unescaped.
pub fn serialize_document(document: &Html) -> Result<Vec<u8>> {
    let opts = SerializeOpts {
        scripting_enabled: true,
        traversal_scope: TraversalScope::IncludeNode,
        create_missing_parent: false,
    };
    let mut buf = Vec::new();

    serialize(&mut buf, document, opts).map_err(Error::Serialize)?;

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::parse_selector_list;

    fn stripper(list: &str) -> ElementStripper {
        ElementStripper::new(&parse_selector_list(list)).unwrap()
    }

    fn strip(list: &str, html: &str) -> String {
        String::from_utf8(stripper(list).strip(html.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn test_strip_scripts() {
        let out = strip(
            "script,noscript",
            "<html><head><script src=\"a.js\"></script></head><body><noscript>no</noscript><p>x</p><script>alert(1)</script></body></html>",
        );

        assert_eq!(out, "<html><head></head><body><p>x</p></body></html>");
    }

    #[test]
    fn test_strip_attribute_selector() {
        let out = strip(
            r#"link[rel="preload"][as="style"]"#,
            r#"<html><head><link rel="preload" as="style" href="a.css"><link rel="stylesheet" href="b.css"></head><body></body></html>"#,
        );

        assert!(!out.contains("a.css"));
        assert!(out.contains(r#"<link rel="stylesheet" href="b.css">"#));
    }

    #[test]
    fn test_strip_removes_descendants() {
        let out = strip(
            "div.ad",
            "<body><div class=\"ad\"><p>buy <b>now</b></p><!-- note --></div><p>keep</p></body>",
        );

        assert!(!out.contains("buy"));
        assert!(!out.contains("note"));
        assert!(out.contains("<p>keep</p>"));
    }

    #[test]
    fn test_strip_nested_matches() {
        let mut document = Html::parse_document("<div><div><div>x</div></div></div><p>y</p>");
        let removed = stripper("div").strip_document(&mut document);

        assert_eq!(removed, 3);
        assert_eq!(
            String::from_utf8(serialize_document(&document).unwrap()).unwrap(),
            "<html><head></head><body><p>y</p></body></html>"
        );
    }

    #[test]
    fn test_strip_skips_already_detached_matches() {
        let mut document = Html::parse_document("<div><p>inner</p></div><p>outer</p>");
        let removed = stripper("div,p").strip_document(&mut document);

        assert_eq!(removed, 2);
        assert_eq!(
            String::from_utf8(serialize_document(&document).unwrap()).unwrap(),
            "<html><head></head><body></body></html>"
        );
    }

    #[test]
    fn test_attribute_order_is_kept() {
        let html = r#"<body><a title="t" href="/x" class="c" id="i" data-z="1" data-a="2">x</a></body>"#;

        for _ in 0..8 {
            assert!(strip("script", html).contains(
                r#"<a title="t" href="/x" class="c" id="i" data-z="1" data-a="2">x</a>"#
            ));
        }
    }

    #[test]
    fn test_kept_raw_text_elements_are_not_escaped() {
        let out = strip(
            "script",
            r#"<head><style>a > b { color: red }</style></head><body><noscript><img src="x.png"></noscript><iframe><p>&</p></iframe></body>"#,
        );

        assert!(out.contains("<style>a > b { color: red }</style>"));
        assert!(out.contains(r#"<noscript><img src="x.png"></noscript>"#));
        assert!(out.contains("<iframe><p>&</p></iframe>"));
    }

    #[test]
    fn test_strip_keeps_comments() {
        let out = strip("script", "<p><!-- ___HTML_STRIP_0___ eyUgeCAlfQ== --></p>");
        assert!(out.contains("<p><!-- ___HTML_STRIP_0___ eyUgeCAlfQ== --></p>"));
    }

    #[test]
    fn test_empty_selector_list() {
        let html = r#"<!DOCTYPE html><html><head><link rel="stylesheet" href="/a.css" media="all"></head><body><p class="x" id="y">a &amp; b</p><noscript><b>no</b></noscript></body></html>"#;
        assert_eq!(strip("", html), html);
    }

    #[test]
    fn test_invalid_selector() {
        match ElementStripper::new(&["p[".to_string()]) {
            Err(Error::Config(ConfigError::InvalidSelector { selector, .. })) => {
                assert_eq!(selector, "p[")
            }
            other => panic!("expected an invalid selector, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        assert!(matches!(
            parse_document(&[b'<', b'p', b'>', 0xff]),
            Err(Error::Parse(_))
        ));
    }
}
