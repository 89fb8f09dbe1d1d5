//! Product resolution: one "active" product from product-page markup, then
//! any number of product cards from listing markup.

use std::sync::LazyLock;

use brandkit_core::Product;
use regex::Regex;

use crate::dom::{Element, Page};
use crate::strategy::{all_matches, first_match, PageContext, Strategy};
use crate::urls::{absolutize, image_source};

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*\d[\d,]*(?:\.\d+)?").expect("valid price regex"));

const SINGLE_PRICE_SELECTORS: [&str; 4] = [
    ".product-price",
    ".product__price",
    r#"[itemprop="price"]"#,
    ".price",
];

const SINGLE_IMAGE_SELECTORS: [&str; 2] = ["#main-product-image", ".product__image"];

const CARD_SELECTORS: [&str; 8] = [
    ".product-card",
    ".product-item",
    ".bestseller",
    ".featured-product",
    r#"[class*="product"]"#,
    r#"[id*="product"]"#,
    ".item",
    "article",
];

const CARD_NAME_SELECTORS: [&str; 6] = [
    "h2",
    "h3",
    ".product-title",
    ".product-name",
    r#"[class*="title"]"#,
    r#"[class*="name"]"#,
];

const CARD_PRICE_SELECTORS: [&str; 2] = [r#"[class*="price"]"#, ".money"];

pub const PRODUCT_STRATEGIES: &[Strategy<Vec<Product>>] = &[
    Strategy::new("single product page", |page, ctx| {
        single_product(page, ctx).map(|p| vec![p])
    }),
    Strategy::new("product cards", |page, ctx| {
        let cards = product_cards(page, ctx);
        (!cards.is_empty()).then_some(cards)
    }),
];

/// The single product (when present) followed by card products, deduplicated
/// and capped at `max_products`.
#[must_use]
pub fn resolve_products(page: &Page, ctx: &PageContext<'_>) -> Vec<Product> {
    let mut products: Vec<Product> = Vec::new();
    for product in all_matches("products", PRODUCT_STRATEGIES, page, ctx)
        .into_iter()
        .flatten()
    {
        if products.len() >= ctx.settings.max_products {
            break;
        }
        if !products.iter().any(|p| p.duplicates(&product)) {
            products.push(product);
        }
    }
    products
}

/// Last `$`-prefixed amount in `text`, or `""`.
#[must_use]
pub fn parse_price(text: &str) -> String {
    PRICE_RE
        .find_iter(text)
        .last()
        .map(|m| m.as_str().to_owned())
        .unwrap_or_default()
}

const SINGLE_NAME: &[Strategy<String>] = &[
    Strategy::new("h1.product-title", |page, _| {
        page.first("h1.product-title")
            .map(|el| el.text())
            .filter(|t| !t.is_empty())
    }),
    Strategy::new("og:title", |page, _| page.meta("og:title")),
];

const SINGLE_IMAGE: &[Strategy<String>] = &[
    Strategy::new("product image element", |page, ctx| {
        SINGLE_IMAGE_SELECTORS.iter().find_map(|css| {
            let el = page.first(css)?;
            let img = if el.name() == "img" { el } else { el.first("img")? };
            image_source(&img).map(|raw| absolutize(ctx.page_url, raw))
        })
    }),
    Strategy::new("og:image", |page, ctx| {
        page.meta("og:image").map(|raw| absolutize(ctx.page_url, &raw))
    }),
];

fn single_product(page: &Page, ctx: &PageContext<'_>) -> Option<Product> {
    let name = first_match("product_name", SINGLE_NAME, page, ctx).unwrap_or_default();
    let image = first_match("product_image_url", SINGLE_IMAGE, page, ctx).unwrap_or_default();
    if name.is_empty() && image.is_empty() {
        return None;
    }

    let price = SINGLE_PRICE_SELECTORS
        .iter()
        .filter_map(|css| page.first(css))
        .map(|el| price_of(&el))
        .find(|p| !p.is_empty())
        .unwrap_or_default();

    Some(Product {
        product_name: name,
        product_price: price,
        product_image_url: image,
    })
}

fn product_cards(page: &Page, ctx: &PageContext<'_>) -> Vec<Product> {
    let mut cards: Vec<Product> = Vec::new();
    for css in CARD_SELECTORS {
        for card in page.select(css) {
            let Some(product) = card_product(&card, ctx) else {
                continue;
            };
            if !cards.iter().any(|p| p.duplicates(&product)) {
                cards.push(product);
            }
        }
    }
    cards
}

fn card_product(card: &Element<'_>, ctx: &PageContext<'_>) -> Option<Product> {
    let name = CARD_NAME_SELECTORS
        .iter()
        .filter_map(|css| card.first(css))
        .map(|el| el.text())
        .find(|t| !t.is_empty())
        .unwrap_or_default();
    let image = card
        .first("img")
        .and_then(|img| image_source(&img))
        .map(|raw| absolutize(ctx.page_url, raw))
        .unwrap_or_default();
    if name.is_empty() && image.is_empty() {
        return None;
    }

    let price = CARD_PRICE_SELECTORS
        .iter()
        .filter_map(|css| card.first(css))
        .map(|el| price_of(&el))
        .find(|p| !p.is_empty())
        .unwrap_or_default();

    Some(Product {
        product_name: name,
        product_price: price,
        product_image_url: image,
    })
}

fn price_of(el: &Element<'_>) -> String {
    parse_price(&el.text())
}
