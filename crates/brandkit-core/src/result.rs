use serde::{Deserialize, Serialize};

/// Body of a scrape request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl ScrapeRequest {
    /// Returns the trimmed URL with `https://` prepended when it carries no
    /// `http://` or `https://` scheme, or `None` when the URL is missing or
    /// blank.
    #[must_use]
    pub fn normalized_url(&self) -> Option<String> {
        self.url.as_deref().and_then(normalize_request_url)
    }
}

/// Trims `raw` and prefixes `https://` when no HTTP scheme is present.
///
/// ```
/// use brandkit_core::result::normalize_request_url;
/// assert_eq!(normalize_request_url("shop.example.com").as_deref(), Some("https://shop.example.com"));
/// assert_eq!(normalize_request_url("http://a.b").as_deref(), Some("http://a.b"));
/// assert_eq!(normalize_request_url("   "), None);
/// ```
#[must_use]
pub fn normalize_request_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_owned())
    } else {
        Some(format!("https://{trimmed}"))
    }
}

/// One product listing found on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_name: String,
    /// Last `$` amount found in the price text, verbatim (e.g. `"$40.99"`).
    pub product_price: String,
    pub product_image_url: String,
}

impl Product {
    /// `true` when `other` has the same non-empty name or the same non-empty
    /// image URL.
    #[must_use]
    pub fn duplicates(&self, other: &Product) -> bool {
        (!self.product_name.is_empty() && self.product_name == other.product_name)
            || (!self.product_image_url.is_empty()
                && self.product_image_url == other.product_image_url)
    }
}

/// Branding and product metadata for one page.
///
/// `product_name`, `product_price` and `product_image_url` mirror the first
/// entry of `products` (the active product), or are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub brand_name: String,
    pub brand_domain: String,
    pub logo_url: String,
    pub primary_font: String,
    pub products: Vec<Product>,
    pub product_name: String,
    pub product_price: String,
    pub product_image_url: String,
    pub images: Vec<String>,
    pub color_swatches: Vec<String>,
    pub active_color: String,
    pub text_color_options: Vec<String>,
}

impl ScrapeResult {
    /// Sets `products` and copies the first one into the top-level product fields.
    pub fn set_products(&mut self, products: Vec<Product>) {
        let active = products.first().cloned().unwrap_or_default();
        self.product_name = active.product_name;
        self.product_price = active.product_price;
        self.product_image_url = active.product_image_url;
        self.products = products;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_gets_https_prefix() {
        let req = ScrapeRequest {
            url: Some("  shop.example.com/x ".into()),
        };
        assert_eq!(
            req.normalized_url().as_deref(),
            Some("https://shop.example.com/x")
        );
    }

    #[test]
    fn request_url_keeps_existing_scheme() {
        let req = ScrapeRequest {
            url: Some("http://shop.example.com".into()),
        };
        assert_eq!(
            req.normalized_url().as_deref(),
            Some("http://shop.example.com")
        );
    }

    #[test]
    fn missing_or_blank_url_is_none() {
        assert!(ScrapeRequest { url: None }.normalized_url().is_none());
        assert!(ScrapeRequest {
            url: Some(String::new())
        }
        .normalized_url()
        .is_none());
    }

    #[test]
    fn request_deserializes_without_url() {
        let req: ScrapeRequest = serde_json::from_str("{}").expect("parse");
        assert!(req.url.is_none());
    }

    #[test]
    fn duplicates_by_image_regardless_of_name() {
        let a = Product {
            product_name: "A".into(),
            product_price: String::new(),
            product_image_url: "https://x/img.png".into(),
        };
        let b = Product {
            product_name: "B".into(),
            ..a.clone()
        };
        assert!(a.duplicates(&b));
    }

    #[test]
    fn empty_fields_never_duplicate() {
        let a = Product {
            product_name: "A".into(),
            ..Product::default()
        };
        let b = Product {
            product_name: "B".into(),
            ..Product::default()
        };
        assert!(!a.duplicates(&b));
    }

    #[test]
    fn result_serializes_camel_case_with_active_product() {
        let mut result = ScrapeResult::default();
        result.set_products(vec![Product {
            product_name: "Tee".into(),
            product_price: "$10.00".into(),
            product_image_url: "https://x/tee.png".into(),
        }]);
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["productName"], "Tee");
        assert_eq!(json["productPrice"], "$10.00");
        assert_eq!(json["products"][0]["productImageUrl"], "https://x/tee.png");
        assert!(json.get("colorSwatches").is_some());
        assert!(json.get("textColorOptions").is_some());
    }
}
