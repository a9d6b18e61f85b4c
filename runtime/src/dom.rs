//! Queryable HTML document built on `scraper`.
//!
//! Lookups walk the element tree directly instead of compiling CSS
//! selectors, so arbitrary tag and attribute names never fail to parse.

use scraper::{ElementRef, Html};

/// A parsed HTML page.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full HTML document. Malformed markup is recovered, never rejected.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// Every element in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.root_element().descendants().filter_map(ElementRef::wrap)
    }

    /// First element named `tag`.
    pub fn find(&self, tag: &str) -> Option<ElementRef<'_>> {
        self.elements().find(|el| el.value().name() == tag)
    }

    /// All elements named `tag`, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.elements().filter(move |el| el.value().name() == tag)
    }

    /// All elements named `tag` that carry attribute `attr`, whatever its value.
    pub fn find_all_with_attr<'a>(
        &'a self,
        tag: &'a str,
        attr: &'a str,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.find_all(tag)
            .filter(move |el| el.value().attr(attr).is_some())
    }

    /// Whether any element of any name carries attribute `attr`.
    pub fn has_attr_anywhere(&self, attr: &str) -> bool {
        self.elements().any(|el| el.value().attr(attr).is_some())
    }

    /// First `tag` element whose `attr` equals `value` exactly.
    pub fn find_by_attr_value(&self, tag: &str, attr: &str, value: &str) -> Option<ElementRef<'_>> {
        self.elements()
            .find(|el| el.value().name() == tag && el.value().attr(attr) == Some(value))
    }

    /// First `tag` element whose whitespace-separated `attr` list contains `token`,
    /// as with `rel="canonical alternate"`.
    pub fn find_by_attr_token(&self, tag: &str, attr: &str, token: &str) -> Option<ElementRef<'_>> {
        self.elements().find(|el| {
            el.value().name() == tag
                && el
                    .value()
                    .attr(attr)
                    .is_some_and(|v| v.split_whitespace().any(|t| t == token))
        })
    }

    /// All text of the document, tags stripped, text nodes joined by a space.
    pub fn text(&self) -> String {
        self.html.root_element().text().collect::<Vec<_>>().join(" ")
    }
}

/// Text content of `el`, tags stripped.
pub fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

/// Whether `el` has a descendant element named `tag`.
pub fn contains_tag(el: &ElementRef<'_>, tag: &str) -> bool {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|child| child.value().name() == tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head>
<title> Shop </title>
<meta name="description" content="d">
<link rel="canonical stylesheet" href="/c">
</head><body>
<h1>Welcome</h1>
<div itemtype="https://schema.org/Product"><a href="/a">A</a><a>no href</a></div>
<form><label>x</label><input name="q"></form>
</body></html>"#;

    #[test]
    fn test_find_and_text() {
        let doc = Document::parse(PAGE);
        let title = doc.find("title").unwrap();
        assert_eq!(element_text(&title).trim(), "Shop");
        assert!(doc.find("h2").is_none());
        let text = doc.text();
        assert!(text.contains("Welcome"));
        assert!(text.contains("no href"));
    }

    #[test]
    fn test_attribute_queries() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.find_all("a").count(), 2);
        assert_eq!(doc.find_all_with_attr("a", "href").count(), 1);
        assert!(doc.has_attr_anywhere("itemtype"));
        assert!(!doc.has_attr_anywhere("itemprop"));
        assert!(doc.find_by_attr_value("meta", "name", "description").is_some());
        assert!(doc.find_by_attr_value("meta", "name", "Description").is_none());
        assert!(doc.find_by_attr_token("link", "rel", "canonical").is_some());
        assert!(doc.find_by_attr_value("link", "rel", "canonical").is_none());
    }

    #[test]
    fn test_contains_tag() {
        let doc = Document::parse(PAGE);
        let form = doc.find("form").unwrap();
        assert!(contains_tag(&form, "input"));
        assert!(!contains_tag(&form, "select"));
        let input = doc.find("input").unwrap();
        assert!(!contains_tag(&input, "input"));
    }

    #[test]
    fn test_garbage_input_parses() {
        let doc = Document::parse("<<<not html");
        assert!(doc.find("title").is_none());
        assert_eq!(doc.find_all("img").count(), 0);
    }
}
