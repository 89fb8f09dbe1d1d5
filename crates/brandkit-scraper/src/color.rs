//! Swatch assembly: page-declared colors, then image palette colors, then the
//! configured fallback palette.

use std::sync::LazyLock;

use brandkit_core::{normalize_hex, parse_rgb, PipelineSettings, Rgb};
use regex::Regex;

use crate::dom::Page;
use crate::strategy::{all_matches, PageContext, Strategy};

static HEADER_BACKGROUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)header\s*\{[^}]*background(?:-color)?\s*:\s*(#[0-9a-f]{3,6})")
        .expect("valid header background regex")
});

/// Channel mean below which a color is considered too dark for a card
/// background.
const DARK_CHANNEL_MEAN: f64 = 40.0;
const LIGHTEN_FACTOR: f64 = 1.3;
/// Luminance above which dark text reads better.
const LIGHT_BACKGROUND_LUMINANCE: f64 = 128.0;

const TEXT_ON_LIGHT: [&str; 5] = ["#000000", "#333333", "#4B5563", "#FFFFFF", "#F3F4F6"];
const TEXT_ON_DARK: [&str; 5] = ["#FFFFFF", "#F3F4F6", "#E5E7EB", "#000000", "#333333"];

pub const PAGE_COLOR_STRATEGIES: &[Strategy<String>] = &[
    Strategy::new("theme-color", |page, _| {
        page.meta("theme-color").and_then(|raw| normalize_hex(&raw))
    }),
    Strategy::new("header style", header_background),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    pub color_swatches: Vec<String>,
    pub active_color: String,
    pub text_color_options: Vec<String>,
}

/// Colors declared in the page itself, in priority order.
#[must_use]
pub fn page_colors(page: &Page, ctx: &PageContext<'_>) -> Vec<String> {
    all_matches("page_colors", PAGE_COLOR_STRATEGIES, page, ctx)
}

fn header_background(page: &Page, _: &PageContext<'_>) -> Option<String> {
    page.select("style").into_iter().find_map(|style| {
        let css = style.text();
        let caps = HEADER_BACKGROUND_RE.captures(&css)?;
        normalize_hex(&caps[1])
    })
}

/// Brightens colors whose channel mean is below 40 by 30% per channel.
/// Other colors are returned unchanged.
///
/// ```
/// use brandkit_scraper::color::lighten_if_dark;
/// assert_eq!(lighten_if_dark("#141414"), "#1A1A1A");
/// assert_eq!(lighten_if_dark("#ff8800"), "#ff8800");
/// ```
#[must_use]
pub fn lighten_if_dark(hex: &str) -> String {
    match parse_rgb(hex) {
        Some(rgb) if rgb.channel_mean() < DARK_CHANNEL_MEAN => {
            Rgb::new(lift(rgb.r), lift(rgb.g), lift(rgb.b)).to_hex()
        }
        _ => hex.to_owned(),
    }
}

// Result is clamped to 0..=255 before the cast.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lift(channel: u8) -> u8 {
    (f64::from(channel) * LIGHTEN_FACTOR).round().min(255.0) as u8
}

/// Readable text colors for `active`, best first, plus its complement.
#[must_use]
pub fn text_color_options(active: &str) -> Vec<String> {
    let Some(rgb) = parse_rgb(active) else {
        return TEXT_ON_DARK.iter().map(|&c| c.to_owned()).collect();
    };

    let base = if rgb.luminance() > LIGHT_BACKGROUND_LUMINANCE {
        TEXT_ON_LIGHT
    } else {
        TEXT_ON_DARK
    };
    let mut options: Vec<String> = base.iter().map(|&c| c.to_owned()).collect();

    let complement = rgb.complement().to_hex();
    if !options.iter().any(|c| c.eq_ignore_ascii_case(&complement)) {
        options.push(complement);
    }
    options
}

/// Merges page colors and image palette colors into the final scheme.
///
/// Every swatch is darkness-corrected and exact duplicates are dropped. The
/// fallback palette is used only when both sources are empty.
#[must_use]
pub fn assemble_palette(
    page_colors: &[String],
    image_colors: &[String],
    settings: &PipelineSettings,
) -> ColorScheme {
    let mut swatches: Vec<String> = Vec::new();
    for color in page_colors.iter().chain(image_colors) {
        let corrected = lighten_if_dark(color);
        if !swatches.contains(&corrected) {
            swatches.push(corrected);
        }
    }

    if swatches.is_empty() {
        tracing::debug!("no page or image colors, using fallback palette");
        swatches.push(settings.fallback_color.clone());
        for color in &settings.secondary_palette {
            if !swatches.contains(color) {
                swatches.push(color.clone());
            }
        }
    }

    let active_color = swatches
        .first()
        .cloned()
        .unwrap_or_else(|| settings.fallback_color.clone());
    let text_color_options = text_color_options(&active_color);

    ColorScheme {
        color_swatches: swatches,
        active_color,
        text_color_options,
    }
}
