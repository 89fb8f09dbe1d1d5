//! Orchestration: fetch → parse and resolve → sample palette → assemble.
//!
//! DOM work happens inside [`extract_page`], which is synchronous; the parsed
//! document is dropped before any image is fetched.

use brandkit_core::result::normalize_request_url;
use brandkit_core::{PipelineSettings, Product, ScrapeResult};
use reqwest::Url;

use crate::brand::resolve_brand_name;
use crate::color::{assemble_palette, page_colors};
use crate::dom::Page;
use crate::error::ScraperError;
use crate::fetch::PageFetcher;
use crate::font::resolve_primary_font;
use crate::images::resolve_images;
use crate::logo::resolve_logo_url;
use crate::palette::extract_palette;
use crate::product::resolve_products;
use crate::strategy::PageContext;
use crate::urls::brand_domain;

/// Everything resolved from the page markup alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    pub brand_name: String,
    pub brand_domain: String,
    pub logo_url: String,
    pub primary_font: String,
    pub products: Vec<Product>,
    pub images: Vec<String>,
    /// Colors declared by the page (`theme-color`, header styles), before
    /// darkness correction.
    pub page_colors: Vec<String>,
}

impl PageExtraction {
    /// Images worth sampling for a palette, in priority order: the active
    /// product image, the logo, the first gallery image. The gallery
    /// placeholder is never sampled.
    #[must_use]
    pub fn palette_sources(&self, settings: &PipelineSettings) -> Vec<String> {
        let product_image = self.products.first().map(|p| p.product_image_url.as_str());
        let gallery = self
            .images
            .first()
            .map(String::as_str)
            .filter(|u| !u.starts_with(&settings.placeholder_image_url));

        let mut sources: Vec<String> = Vec::new();
        for url in [product_image, Some(self.logo_url.as_str()), gallery]
            .into_iter()
            .flatten()
        {
            if !url.is_empty() && !sources.iter().any(|s| s == url) {
                sources.push(url.to_owned());
            }
        }
        sources
    }
}

/// Parses `html` and runs every markup resolver against it.
#[must_use]
pub fn extract_page(html: &str, final_url: &Url, settings: &PipelineSettings) -> PageExtraction {
    let page = Page::parse(html);
    let domain = brand_domain(final_url);

    let mut ctx = PageContext {
        page_url: final_url,
        domain: &domain,
        brand_name: "",
        raw_html: html,
        settings,
    };
    let brand_name = resolve_brand_name(&page, &ctx);
    ctx.brand_name = &brand_name;

    let extraction = PageExtraction {
        logo_url: resolve_logo_url(&page, &ctx),
        primary_font: resolve_primary_font(&page, &ctx),
        products: resolve_products(&page, &ctx),
        images: resolve_images(&page, &ctx),
        page_colors: page_colors(&page, &ctx),
        brand_domain: domain.clone(),
        brand_name: brand_name.clone(),
    };
    tracing::debug!(
        brand = %extraction.brand_name,
        products = extraction.products.len(),
        images = extraction.images.len(),
        "page extracted"
    );
    extraction
}

/// Scrapes one storefront page per call. Holds no per-request state, so a
/// single instance can be shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct BrandScraper {
    fetcher: PageFetcher,
    settings: PipelineSettings,
}

impl BrandScraper {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn new(settings: PipelineSettings) -> Result<Self, ScraperError> {
        let fetcher = PageFetcher::new(&settings)?;
        Ok(Self { fetcher, settings })
    }

    /// Fetches `url` (scheme optional) and returns its branding metadata.
    ///
    /// Only the page fetch can fail; every extraction miss falls back to a
    /// default and image failures are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] when the URL is blank or invalid, or the page
    /// fetch fails.
    pub async fn scrape(&self, url: &str) -> Result<ScrapeResult, ScraperError> {
        let url = normalize_request_url(url).ok_or_else(|| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: "URL is empty".to_owned(),
        })?;

        let fetched = self.fetcher.fetch_page(&url).await?;
        let extraction = extract_page(&fetched.html, &fetched.final_url, &self.settings);
        let image_colors = self
            .sample_palette(&extraction.palette_sources(&self.settings))
            .await;

        let scheme = assemble_palette(&extraction.page_colors, &image_colors, &self.settings);
        let mut result = ScrapeResult {
            brand_name: extraction.brand_name,
            brand_domain: extraction.brand_domain,
            logo_url: extraction.logo_url,
            primary_font: extraction.primary_font,
            images: extraction.images,
            color_swatches: scheme.color_swatches,
            active_color: scheme.active_color,
            text_color_options: scheme.text_color_options,
            ..ScrapeResult::default()
        };
        result.set_products(extraction.products);

        tracing::info!(
            url = %fetched.final_url,
            brand = %result.brand_name,
            products = result.products.len(),
            swatches = result.color_swatches.len(),
            "scrape complete"
        );
        Ok(result)
    }

    /// Palette colors of the first source that downloads, decodes and yields
    /// at least one swatch. Empty when none does.
    pub async fn sample_palette(&self, sources: &[String]) -> Vec<String> {
        for source in sources {
            let bytes = match self.fetcher.fetch_image(source).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(url = %source, error = %e, "image fetch failed, trying next source");
                    continue;
                }
            };
            let decoded = tokio::task::spawn_blocking(move || extract_palette(&bytes))
                .await
                .map_err(ScraperError::from)
                .and_then(|palette| palette);
            match decoded {
                Ok(palette) if !palette.is_empty() => {
                    tracing::debug!(url = %source, "palette sampled");
                    return palette.ordered();
                }
                Ok(_) => tracing::debug!(url = %source, "image has no usable colors"),
                Err(e) => tracing::warn!(url = %source, error = %e, "image decode failed"),
            }
        }
        Vec::new()
    }
}
