//! Best-effort branding and product extraction from a single storefront page.
//!
//! The pipeline fetches one page, resolves each field through an ordered list
//! of [`strategy::Strategy`] functions over a parsed [`dom::Page`], samples a
//! palette from one image, and assembles a [`brandkit_core::ScrapeResult`].

pub mod brand;
pub mod color;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod font;
pub mod images;
pub mod logo;
pub mod palette;
pub mod pipeline;
pub mod product;
pub mod strategy;
pub mod urls;

pub use error::ScraperError;
pub use fetch::{FetchedPage, PageFetcher};
pub use palette::{extract_palette, Palette, SwatchKind};
pub use pipeline::{extract_page, BrandScraper, PageExtraction};
