//! Thin query layer over `scraper::Html`.
//!
//! Resolvers only ever see [`Page`] and [`Element`], so every heuristic can be
//! exercised against an HTML string without network access. A `Page` is not
//! `Send`; parse, query and drop it without crossing an `.await`.

use scraper::{ElementRef, Html, Selector};

pub struct Page {
    html: Html,
}

impl Page {
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// All elements matching `css`, in document order. An unparseable
    /// selector matches nothing.
    #[must_use]
    pub fn select(&self, css: &str) -> Vec<Element<'_>> {
        let Some(selector) = parse_selector(css) else {
            return Vec::new();
        };
        self.html.select(&selector).map(Element).collect()
    }

    #[must_use]
    pub fn first(&self, css: &str) -> Option<Element<'_>> {
        let selector = parse_selector(css)?;
        self.html.select(&selector).next().map(Element)
    }

    /// Trimmed, non-empty `content` of the first `<meta>` whose `property` or
    /// `name` equals `key`.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<String> {
        self.select("meta").into_iter().find_map(|el| {
            let matches = el.attr("property") == Some(key) || el.attr("name") == Some(key);
            if matches {
                el.attr("content").map(str::to_owned)
            } else {
                None
            }
        })
    }

    /// Text of the document `<title>`, whitespace-collapsed.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.first("title")
            .map(|el| el.text())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Element<'a>(ElementRef<'a>);

impl<'a> Element<'a> {
    /// Tag name, lowercase.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.0.value().name()
    }

    /// Trimmed attribute value; empty values are treated as absent.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0
            .value()
            .attr(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Descendant text with runs of whitespace collapsed to single spaces.
    #[must_use]
    pub fn text(&self) -> String {
        let joined: String = self.0.text().collect();
        joined.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[must_use]
    pub fn select(&self, css: &str) -> Vec<Element<'a>> {
        let Some(selector) = parse_selector(css) else {
            return Vec::new();
        };
        self.0.select(&selector).map(Element).collect()
    }

    #[must_use]
    pub fn first(&self, css: &str) -> Option<Element<'a>> {
        let selector = parse_selector(css)?;
        self.0.select(&selector).next().map(Element)
    }
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!(selector = css, error = ?e, "ignoring unparseable CSS selector");
            None
        }
    }
}
