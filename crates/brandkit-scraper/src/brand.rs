//! Brand name resolution.

use crate::dom::Page;
use crate::strategy::{first_match, PageContext, Strategy};

/// Title segments are cut at the first of these, when it stands alone
/// between whitespace.
const TITLE_SEPARATORS: [&str; 4] = ["|", "-", "\u{2013}", "\u{2014}"];

pub const BRAND_STRATEGIES: &[Strategy<String>] = &[
    Strategy::new("og:site_name", |page, _| meta_brand(page, "og:site_name")),
    Strategy::new("application-name", |page, _| {
        meta_brand(page, "application-name")
    }),
    Strategy::new("twitter:site", |page, _| meta_brand(page, "twitter:site")),
    Strategy::new("title", title_brand),
    Strategy::new("domain", domain_brand),
];

/// Resolves the display brand name. Never empty for a URL with a host.
#[must_use]
pub fn resolve_brand_name(page: &Page, ctx: &PageContext<'_>) -> String {
    first_match("brand_name", BRAND_STRATEGIES, page, ctx).unwrap_or_default()
}

fn meta_brand(page: &Page, key: &str) -> Option<String> {
    page.meta(key).and_then(|raw| normalize_brand(&raw))
}

fn title_brand(page: &Page, _: &PageContext<'_>) -> Option<String> {
    let title = page.title()?;
    normalize_brand(&title_segment(&title))
}

fn domain_brand(_: &Page, ctx: &PageContext<'_>) -> Option<String> {
    ctx.domain.split('.').next().and_then(normalize_brand)
}

/// Tokens of `title` up to the first standalone separator.
fn title_segment(title: &str) -> String {
    title
        .split_whitespace()
        .take_while(|token| !TITLE_SEPARATORS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strips `@` and leading dots, then title-cases each token. `None` when
/// nothing is left.
#[must_use]
pub fn normalize_brand(raw: &str) -> Option<String> {
    let stripped: String = raw.chars().filter(|&c| c != '@').collect();
    let stripped = stripped.trim().trim_start_matches('.').trim();
    if stripped.is_empty() {
        return None;
    }

    let cased = stripped
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");
    Some(cased)
}

/// Uppercases the first word character and lowercases the rest of the token.
/// Leading punctuation is kept as is.
fn title_case(token: &str) -> String {
    let Some(start) = token.find(|c: char| c.is_alphanumeric() || c == '_') else {
        return token.to_owned();
    };
    let (lead, word) = token.split_at(start);
    let mut chars = word.chars();
    let mut out = lead.to_owned();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(&chars.as_str().to_lowercase());
    }
    out
}
