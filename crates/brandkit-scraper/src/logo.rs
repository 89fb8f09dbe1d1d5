//! Logo resolution.
//!
//! Candidate ranking: an image that mentions the brand (in its URL or alt
//! text) beats any other logo-ish image, which beats the external logo
//! service.

use crate::dom::Page;
use crate::strategy::{first_match, PageContext, Strategy};
use crate::urls::{absolutize, image_source};

#[derive(Debug, Clone, Copy)]
enum LogoQuery {
    /// Any `<img>` whose attribute contains "logo", case-insensitive.
    AttrContains(&'static str),
    Css(&'static str),
}

const LOGO_QUERIES: [LogoQuery; 10] = [
    LogoQuery::AttrContains("class"),
    LogoQuery::AttrContains("id"),
    LogoQuery::AttrContains("alt"),
    LogoQuery::Css(".logo img"),
    LogoQuery::Css(r#"header img[src*="logo"]"#),
    LogoQuery::AttrContains("src"),
    LogoQuery::Css(r#"a[href="/"] img"#),
    LogoQuery::Css("header a img"),
    LogoQuery::Css(".header img"),
    LogoQuery::Css(".navbar-brand img"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoCandidate {
    pub url: String,
    pub alt: String,
}

pub const LOGO_STRATEGIES: &[Strategy<String>] = &[
    Strategy::new("brand-matched image", brand_matched),
    Strategy::new("first logo image", first_candidate),
    Strategy::new("logo service", logo_service),
];

#[must_use]
pub fn resolve_logo_url(page: &Page, ctx: &PageContext<'_>) -> String {
    first_match("logo_url", LOGO_STRATEGIES, page, ctx).unwrap_or_default()
}

/// Logo-like images in query order, absolutized and deduplicated by URL.
#[must_use]
pub fn collect_candidates(page: &Page, ctx: &PageContext<'_>) -> Vec<LogoCandidate> {
    let mut candidates: Vec<LogoCandidate> = Vec::new();

    for query in LOGO_QUERIES {
        let elements = match query {
            LogoQuery::AttrContains(attr) => page
                .select("img")
                .into_iter()
                .filter(|img| {
                    img.attr(attr)
                        .is_some_and(|v| v.to_ascii_lowercase().contains("logo"))
                })
                .collect(),
            LogoQuery::Css(css) => page.select(css),
        };

        for img in elements {
            let Some(raw) = image_source(&img) else {
                continue;
            };
            let url = absolutize(ctx.page_url, raw);
            if url.is_empty() || candidates.iter().any(|c| c.url == url) {
                continue;
            }
            candidates.push(LogoCandidate {
                url,
                alt: img.attr("alt").unwrap_or_default().to_owned(),
            });
        }
    }

    candidates
}

fn brand_matched(page: &Page, ctx: &PageContext<'_>) -> Option<String> {
    let brand = ctx.brand_name.to_lowercase();
    let domain = ctx.domain.to_lowercase();
    let needles: Vec<&str> = [brand.as_str(), domain.as_str()]
        .into_iter()
        .filter(|n| !n.is_empty())
        .collect();
    if needles.is_empty() {
        return None;
    }

    collect_candidates(page, ctx)
        .into_iter()
        .find(|c| {
            let url = c.url.to_lowercase();
            let alt = c.alt.to_lowercase();
            needles.iter().any(|n| url.contains(n) || alt.contains(n))
        })
        .map(|c| c.url)
}

fn first_candidate(page: &Page, ctx: &PageContext<'_>) -> Option<String> {
    collect_candidates(page, ctx).into_iter().next().map(|c| c.url)
}

fn logo_service(_: &Page, ctx: &PageContext<'_>) -> Option<String> {
    if ctx.domain.is_empty() {
        return None;
    }
    Some(ctx.settings.logo_service_for(ctx.domain))
}
