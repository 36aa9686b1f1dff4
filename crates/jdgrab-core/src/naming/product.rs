//! Product page recognition and product id parsing.

use regex::Regex;
use url::Url;

/// Fallback id when the page URL carries no numeric product id.
pub const UNKNOWN_PRODUCT: &str = "unknown";

/// Host serving product pages for `site` (e.g. `item.jd.com`).
pub fn product_host(site: &str) -> String {
    format!("item.{}", site.trim_start_matches('.').to_ascii_lowercase())
}

/// True if `url` is served from the product page host of `site`.
pub fn is_product_page(url: &str, site: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    parsed.host_str() == Some(product_host(site).as_str())
}

/// Numeric id from `item.<site>/<digits>.html`, or `unknown`.
pub fn product_id(url: &str, site: &str) -> String {
    let pattern = format!(r"{}/(\d+)\.html", regex::escape(&product_host(site)));
    let Ok(re) = Regex::new(&pattern) else {
        return UNKNOWN_PRODUCT.to_string();
    };
    re.captures(url)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string())
}
