use std::sync::LazyLock;

use regex::Regex;

use crate::dom::Page;
use crate::strategy::{first_match, PageContext, Strategy};

static FONT_FAMILY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)font-family:\s*([^;"}]+)"#).expect("valid font-family regex")
});

pub const FONT_STRATEGIES: &[Strategy<String>] = &[
    Strategy::new("font-family declaration", font_family_declaration),
    Strategy::new("default", |_, ctx| Some(ctx.settings.fallback_font.clone())),
];

/// First `font-family` declared anywhere in the page source.
#[must_use]
pub fn resolve_primary_font(page: &Page, ctx: &PageContext<'_>) -> String {
    first_match("primary_font", FONT_STRATEGIES, page, ctx).unwrap_or_default()
}

fn font_family_declaration(_: &Page, ctx: &PageContext<'_>) -> Option<String> {
    let caps = FONT_FAMILY_RE.captures(ctx.raw_html)?;
    let family: String = caps[1].chars().filter(|&c| c != '\'' && c != '"').collect();
    let family = family.trim();
    (!family.is_empty()).then(|| family.to_owned())
}
