//! Ordered, named extraction strategies.
//!
//! Each field is resolved by walking a fixed list of pure functions over the
//! parsed page; the first `Some` wins. Keeping the order in data rather than
//! in nested `or_else` chains makes every fallback individually testable.

use brandkit_core::PipelineSettings;
use reqwest::Url;

use crate::dom::Page;

/// Everything a strategy may consult besides the DOM.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Final (post-redirect) page URL.
    pub page_url: &'a Url,
    /// Page host without a leading `www.`.
    pub domain: &'a str,
    /// Resolved brand name; empty until the brand resolver has run.
    pub brand_name: &'a str,
    /// Unparsed page source.
    pub raw_html: &'a str,
    pub settings: &'a PipelineSettings,
}

pub type StrategyFn<T> = fn(&Page, &PageContext<'_>) -> Option<T>;

pub struct Strategy<T> {
    pub name: &'static str,
    pub run: StrategyFn<T>,
}

impl<T> Strategy<T> {
    pub const fn new(name: &'static str, run: StrategyFn<T>) -> Self {
        Self { name, run }
    }
}

/// Runs `strategies` in order and returns the first value produced.
pub fn first_match<T>(
    field: &'static str,
    strategies: &[Strategy<T>],
    page: &Page,
    ctx: &PageContext<'_>,
) -> Option<T> {
    for strategy in strategies {
        if let Some(value) = (strategy.run)(page, ctx) {
            tracing::debug!(field, strategy = strategy.name, "field resolved");
            return Some(value);
        }
    }
    tracing::debug!(field, "no strategy matched");
    None
}

/// Runs every strategy and keeps each value produced, in strategy order.
pub fn all_matches<T>(
    field: &'static str,
    strategies: &[Strategy<T>],
    page: &Page,
    ctx: &PageContext<'_>,
) -> Vec<T> {
    strategies
        .iter()
        .filter_map(|strategy| {
            let value = (strategy.run)(page, ctx)?;
            tracing::debug!(field, strategy = strategy.name, "strategy matched");
            Some(value)
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Owns what a [`PageContext`] borrows, for resolver unit tests.
    pub(crate) struct Fixture {
        pub page: Page,
        pub url: Url,
        pub domain: String,
        pub brand_name: String,
        pub html: String,
        pub settings: PipelineSettings,
    }

    impl Fixture {
        pub(crate) fn new(url: &str, html: &str) -> Self {
            let url = Url::parse(url).expect("fixture URL");
            Self {
                page: Page::parse(html),
                domain: crate::urls::brand_domain(&url),
                url,
                brand_name: String::new(),
                html: html.to_owned(),
                settings: PipelineSettings::default(),
            }
        }

        pub(crate) fn with_brand(mut self, brand: &str) -> Self {
            self.brand_name = brand.to_owned();
            self
        }

        pub(crate) fn ctx(&self) -> PageContext<'_> {
            PageContext {
                page_url: &self.url,
                domain: &self.domain,
                brand_name: &self.brand_name,
                raw_html: &self.html,
                settings: &self.settings,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::Fixture;
    use super::*;

    fn never(_: &Page, _: &PageContext<'_>) -> Option<u8> {
        None
    }

    fn one(_: &Page, _: &PageContext<'_>) -> Option<u8> {
        Some(1)
    }

    fn two(_: &Page, _: &PageContext<'_>) -> Option<u8> {
        Some(2)
    }

    const ORDERED: &[Strategy<u8>] = &[
        Strategy::new("never", never),
        Strategy::new("one", one),
        Strategy::new("two", two),
    ];

    #[test]
    fn first_match_respects_order() {
        let fx = Fixture::new("https://example.com", "<html></html>");
        assert_eq!(first_match("n", ORDERED, &fx.page, &fx.ctx()), Some(1));
    }

    #[test]
    fn first_match_empty_list_is_none() {
        let fx = Fixture::new("https://example.com", "<html></html>");
        assert_eq!(first_match::<u8>("n", &[], &fx.page, &fx.ctx()), None);
    }

    #[test]
    fn all_matches_keeps_every_hit_in_order() {
        let fx = Fixture::new("https://example.com", "<html></html>");
        assert_eq!(all_matches("n", ORDERED, &fx.page, &fx.ctx()), vec![1, 2]);
    }
}
