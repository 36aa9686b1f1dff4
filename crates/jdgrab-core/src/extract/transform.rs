//! URL rewrites applied to scraped media URLs.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Thumbnail path segment on the image CDN.
const THUMBNAIL_SEGMENT: &str = "/n5/";
/// Full-size path segment on the image CDN.
const ZONE_SEGMENT: &str = "/imgzone/";
const ZONE_MARKER: &str = "imgzone/";

static CSS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^url\(['"](.+)['"]\)$"#).unwrap_or_else(|e| panic!("css url pattern: {e}"))
});

/// Rewrites the first thumbnail segment to the full-size zone.
pub fn to_zone(url: &str) -> String {
    url.replacen(THUMBNAIL_SEGMENT, ZONE_SEGMENT, 1)
}

/// Builds the full-size URL of a main gallery image.
///
/// The thumbnail segment is moved to the zone, then everything after the first
/// `imgzone/` is replaced by the `data-url` path. Without a usable `data-url`
/// the zone-rewritten `src` is returned as is.
pub fn main_image_url(src: &str, data_url: Option<&str>) -> String {
    let zoned = to_zone(src);
    let data_url = match data_url.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => d,
        None => return zoned,
    };
    match zoned.find(ZONE_MARKER) {
        Some(pos) => format!("{}{}{}", &zoned[..pos], ZONE_MARKER, data_url),
        None => zoned,
    }
}

/// Strips a computed `url("...")` wrapper. Values that do not match are returned unchanged.
pub fn strip_css_url(value: &str) -> String {
    match CSS_URL.captures(value) {
        Some(caps) => caps[1].to_string(),
        None => value.to_string(),
    }
}

/// Resolves an attribute URL against the page URL, as a browser does for `img.src`.
///
/// Empty or whitespace-only values resolve to an empty string.
pub fn resolve(base: &Url, raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    match base.join(raw) {
        Ok(u) => u.to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_zone_rewrites_first_thumbnail_segment() {
        assert_eq!(
            to_zone("https://img10.360buyimg.com/n5/jfs/t1/a.jpg"),
            "https://img10.360buyimg.com/imgzone/jfs/t1/a.jpg"
        );
        assert_eq!(
            to_zone("https://img10.360buyimg.com/n5/x/n5/a.jpg"),
            "https://img10.360buyimg.com/imgzone/x/n5/a.jpg"
        );
        assert_eq!(to_zone("https://img.example.com/a.jpg"), "https://img.example.com/a.jpg");
    }

    #[test]
    fn main_image_url_uses_data_url() {
        assert_eq!(
            main_image_url(
                "https://img10.360buyimg.com/n5/s54x54_jfs/t1/thumb.jpg",
                Some("jfs/t1/123/full.jpg")
            ),
            "https://img10.360buyimg.com/imgzone/jfs/t1/123/full.jpg"
        );
    }

    #[test]
    fn main_image_url_without_data_url_keeps_zone_src() {
        assert_eq!(
            main_image_url("https://img10.360buyimg.com/n5/jfs/t1/thumb.jpg", None),
            "https://img10.360buyimg.com/imgzone/jfs/t1/thumb.jpg"
        );
        assert_eq!(
            main_image_url("https://img10.360buyimg.com/n5/jfs/t1/thumb.jpg", Some("  ")),
            "https://img10.360buyimg.com/imgzone/jfs/t1/thumb.jpg"
        );
    }

    #[test]
    fn main_image_url_without_zone_ignores_data_url() {
        assert_eq!(
            main_image_url("https://img.example.com/n1/a.jpg", Some("jfs/b.jpg")),
            "https://img.example.com/n1/a.jpg"
        );
    }

    #[test]
    fn strip_css_url_forms() {
        assert_eq!(
            strip_css_url(r#"url("https://img.example.com/d.jpg")"#),
            "https://img.example.com/d.jpg"
        );
        assert_eq!(
            strip_css_url("url('https://img.example.com/d.jpg')"),
            "https://img.example.com/d.jpg"
        );
        assert_eq!(strip_css_url("none"), "none");
    }

    #[test]
    fn resolve_protocol_relative_and_empty() {
        let base = Url::parse("https://item.jd.com/100012043978.html").unwrap();
        assert_eq!(
            resolve(&base, "//img10.360buyimg.com/n5/a.jpg"),
            "https://img10.360buyimg.com/n5/a.jpg"
        );
        assert_eq!(resolve(&base, "a.jpg"), "https://item.jd.com/a.jpg");
        assert_eq!(resolve(&base, ""), "");
    }
}
