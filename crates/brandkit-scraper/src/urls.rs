//! URL helpers: absolutizing scraped links and reading image sources.

use reqwest::Url;

use crate::dom::Element;

/// Attributes consulted, in order, for an image's source URL.
const IMAGE_SOURCE_ATTRS: [&str; 3] = ["src", "data-src", "data-lazy-src"];
const IMAGE_SRCSET_ATTRS: [&str; 2] = ["srcset", "data-srcset"];

/// Resolves a scraped link against the final page URL.
///
/// - `//cdn/x.png` takes the page's scheme.
/// - `/x.png` is joined to the page origin.
/// - `x.png` is joined to the page origin with a `/` separator (not to the
///   page's directory).
/// - `http(s)://` and `data:` URLs are returned unchanged.
#[must_use]
pub fn absolutize(base: &Url, raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if raw.starts_with("//") {
        return format!("{}:{raw}", base.scheme());
    }
    if raw.starts_with("http://") || raw.starts_with("https://") || raw.starts_with("data:") {
        return raw.to_owned();
    }

    let origin = base.origin().ascii_serialization();
    if raw.starts_with('/') {
        format!("{origin}{raw}")
    } else {
        format!("{origin}/{raw}")
    }
}

/// The page's host with a leading `www.` removed.
#[must_use]
pub fn brand_domain(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    host.strip_prefix("www.").map(str::to_owned).unwrap_or(host)
}

/// First URL in a `srcset` list (`"a.png 1x, b.png 2x"` → `"a.png"`).
#[must_use]
pub fn first_srcset_url(srcset: &str) -> Option<&str> {
    srcset
        .split(',')
        .next()
        .and_then(|entry| entry.split_whitespace().next())
        .filter(|u| !u.is_empty())
}

/// Raw (not yet absolutized) source of an `<img>`: `src`, lazy-load data
/// attributes, then the first `srcset` entry.
#[must_use]
pub fn image_source<'a>(img: &Element<'a>) -> Option<&'a str> {
    IMAGE_SOURCE_ATTRS
        .iter()
        .find_map(|attr| img.attr(attr))
        .or_else(|| {
            IMAGE_SRCSET_ATTRS
                .iter()
                .find_map(|attr| img.attr(attr).and_then(first_srcset_url))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Page;

    fn base() -> Url {
        Url::parse("https://shop.example.com/x").unwrap()
    }

    #[test]
    fn protocol_relative_takes_page_scheme() {
        assert_eq!(
            absolutize(&base(), "//cdn.example.com/img.png"),
            "https://cdn.example.com/img.png"
        );
    }

    #[test]
    fn root_relative_joins_origin() {
        assert_eq!(
            absolutize(&base(), "/img.png"),
            "https://shop.example.com/img.png"
        );
    }

    #[test]
    fn bare_path_joins_origin_root() {
        assert_eq!(
            absolutize(&base(), "img.png"),
            "https://shop.example.com/img.png"
        );
    }

    #[test]
    fn absolute_is_unchanged() {
        assert_eq!(
            absolutize(&base(), "http://other.example.com/a.png"),
            "http://other.example.com/a.png"
        );
        assert_eq!(absolutize(&base(), "data:image/png;base64,AAAA"), "data:image/png;base64,AAAA");
    }

    #[test]
    fn origin_keeps_non_default_port() {
        let base = Url::parse("http://127.0.0.1:8080/shop/").unwrap();
        assert_eq!(absolutize(&base, "/a.png"), "http://127.0.0.1:8080/a.png");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(absolutize(&base(), "  "), "");
    }

    #[test]
    fn brand_domain_strips_www() {
        let url = Url::parse("https://www.Coolbrand.com/products").unwrap();
        assert_eq!(brand_domain(&url), "coolbrand.com");
        let url = Url::parse("https://shop.coolbrand.com").unwrap();
        assert_eq!(brand_domain(&url), "shop.coolbrand.com");
    }

    #[test]
    fn srcset_first_entry() {
        assert_eq!(first_srcset_url("/a.png 1x, /b.png 2x"), Some("/a.png"));
        assert_eq!(first_srcset_url(" /c.jpg 480w"), Some("/c.jpg"));
        assert_eq!(first_srcset_url(""), None);
    }

    #[test]
    fn image_source_fallback_order() {
        let page = Page::parse(
            r#"<img id="a" src="/src.png" data-src="/data.png">
               <img id="b" data-src="/data.png">
               <img id="c" data-srcset="/set.png 1x, /set2.png 2x">
               <img id="d">"#,
        );
        let src = |id: &str| page.first(&format!("#{id}")).and_then(|el| image_source(&el));
        assert_eq!(src("a"), Some("/src.png"));
        assert_eq!(src("b"), Some("/data.png"));
        assert_eq!(src("c"), Some("/set.png"));
        assert_eq!(src("d"), None);
    }
}
