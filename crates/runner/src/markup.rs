//! Element lookups over HTML responses
//!
//! The element check is informational: it reports which expected elements a
//! page contains and never decides the status of a case.

use scraper::{Html, Selector};
use tracing::debug;

use crate::config::MarkupMode;

/// Answers which expected elements are present in a page
pub trait MarkupInspector: Send + Sync {
    /// Entries of `expected` present in `html`, in `expected` order
    fn find_elements(&self, html: &str, expected: &[String]) -> Vec<String>;
}

/// Parses the page and treats each expected entry as a CSS selector.
///
/// Entries that do not parse as selectors are matched as literal text. Bare
/// words such as `status` are valid type selectors, so they only match
/// elements of that name and are never looked up as text.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectorInspector;

impl MarkupInspector for SelectorInspector {
    fn find_elements(&self, html: &str, expected: &[String]) -> Vec<String> {
        let document = Html::parse_document(html);

        expected
            .iter()
            .filter(|entry| match Selector::parse(entry.as_str()) {
                Ok(selector) => document.select(&selector).next().is_some(),
                Err(e) => {
                    debug!("'{}' is not a selector ({:?}), using text match", entry, e);
                    html.contains(entry.as_str())
                }
            })
            .cloned()
            .collect()
    }
}

/// Literal substring containment over the raw body
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstringInspector;

impl MarkupInspector for SubstringInspector {
    fn find_elements(&self, html: &str, expected: &[String]) -> Vec<String> {
        expected
            .iter()
            .filter(|entry| html.contains(entry.as_str()))
            .cloned()
            .collect()
    }
}

impl MarkupMode {
    pub fn inspector(self) -> Box<dyn MarkupInspector> {
        match self {
            MarkupMode::Selector => Box::new(SelectorInspector),
            MarkupMode::Substring => Box::new(SubstringInspector),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_PAGE: &str = r#"<!doctype html>
<html>
  <body>
    <h1>Entrar</h1>
    <form>
      <input type="email" name="email">
      <button>Continuar</button>
    </form>
  </body>
</html>"#;

    fn expected(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_selector_matches_attributes() {
        let found = SelectorInspector.find_elements(
            LOGIN_PAGE,
            &expected(&["form", "input[type='email']", "input[type='password']", "button"]),
        );
        assert_eq!(found, expected(&["form", "input[type='email']", "button"]));
    }

    #[test]
    fn test_selector_ignores_text_mentions() {
        // "table" appears only as text, not as an element
        let html = "<html><body><p>No table here</p></body></html>";
        let found = SelectorInspector.find_elements(html, &expected(&["table", "p"]));
        assert_eq!(found, expected(&["p"]));
    }

    #[test]
    fn test_invalid_selector_falls_back_to_text() {
        let html = "<div>status: ok</div><p>a[</p>";
        let found = SelectorInspector.find_elements(html, &expected(&["status: ok", "a[", "b["]));
        assert_eq!(found, expected(&["status: ok", "a["]));
    }

    #[test]
    fn test_bare_word_is_a_type_selector() {
        // "status" parses as a selector for <status> elements, not as text
        let html = "<div>status: ok</div>";
        let found = SelectorInspector.find_elements(html, &expected(&["status", "div"]));
        assert_eq!(found, expected(&["div"]));
    }

    #[test]
    fn test_substring_keeps_raw_behavior() {
        let html = "<html><body><p>No table here</p></body></html>";
        let found = SubstringInspector.find_elements(html, &expected(&["table", "h1", "body"]));
        assert_eq!(found, expected(&["table", "body"]));
    }

    #[test]
    fn test_empty_page_finds_nothing() {
        assert!(SelectorInspector.find_elements("", &expected(&["h1"])).is_empty());
        assert!(MarkupMode::Substring
            .inspector()
            .find_elements("", &expected(&["h1"]))
            .is_empty());
    }
}
