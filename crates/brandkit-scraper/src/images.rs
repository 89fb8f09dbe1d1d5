//! Image gallery: up to five prominent, non-decorative images from the page.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::dom::{Element, Page};
use crate::strategy::PageContext;
use crate::urls::{absolutize, image_source};

const MAX_GALLERY_IMAGES: usize = 5;

/// Smallest declared width/height kept; tracking pixels and icons fall below.
const MIN_DECLARED_SIZE: u32 = 100;

const GALLERY_SELECTORS: [&str; 17] = [
    "img.product-image",
    "img.featured-image",
    "img.hero-image",
    "img.banner-image",
    ".product-gallery img",
    ".slideshow img",
    ".carousel img",
    ".hero img",
    ".banner img",
    "img[width][height]",
    r#"img[src*="product"]"#,
    r#"img[alt*="product"]"#,
    r#"img[class*="product" i]"#,
    r#"img[src*="hero"]"#,
    r#"img[class*="hero"]"#,
    r#"img[class*="banner"]"#,
    "img",
];

const IGNORED_SOURCE_MARKERS: [&str; 7] = [
    "base64",
    ".svg",
    "placeholder",
    "blank",
    "transparent",
    "icon",
    "logo",
];

/// Gallery URLs with `og:image` first, or a single placeholder carrying the
/// brand name when the page has no usable images.
#[must_use]
pub fn resolve_images(page: &Page, ctx: &PageContext<'_>) -> Vec<String> {
    let mut images: Vec<String> = Vec::new();

    'selectors: for css in GALLERY_SELECTORS {
        for img in page.select(css) {
            if images.len() >= MAX_GALLERY_IMAGES {
                break 'selectors;
            }
            let Some(url) = gallery_source(&img, ctx) else {
                continue;
            };
            if !images.contains(&url) {
                images.push(url);
            }
        }
    }

    if let Some(og) = page.meta("og:image").map(|raw| absolutize(ctx.page_url, &raw)) {
        if !og.is_empty() && !images.contains(&og) {
            images.insert(0, og);
        }
    }

    if images.is_empty() {
        tracing::debug!(domain = ctx.domain, "no gallery images, using placeholder");
        images.push(placeholder_image(ctx));
    }
    images
}

fn gallery_source(img: &Element<'_>, ctx: &PageContext<'_>) -> Option<String> {
    if is_too_small(img) {
        return None;
    }
    let raw = image_source(img)?;
    let lowered = raw.to_ascii_lowercase();
    if IGNORED_SOURCE_MARKERS.iter().any(|m| lowered.contains(m)) {
        return None;
    }
    let url = absolutize(ctx.page_url, raw);
    (!url.is_empty()).then_some(url)
}

fn is_too_small(img: &Element<'_>) -> bool {
    ["width", "height"].iter().any(|attr| {
        img.attr(attr)
            .and_then(|v| v.parse::<u32>().ok())
            .is_some_and(|size| size > 0 && size < MIN_DECLARED_SIZE)
    })
}

fn placeholder_image(ctx: &PageContext<'_>) -> String {
    let text = utf8_percent_encode(ctx.brand_name, NON_ALPHANUMERIC);
    format!("{}?text={text}", ctx.settings.placeholder_image_url)
}
