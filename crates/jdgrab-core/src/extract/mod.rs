//! Media extraction from a parsed product page.
//!
//! Pure, read-only queries over the document: calling any extractor twice on
//! the same document yields the same result.

mod selectors;
mod style;
mod transform;

pub use style::StyleSheet;
pub use transform::{main_image_url, resolve, strip_css_url, to_zone};

use scraper::{ElementRef, Html};
use std::collections::HashSet;
use url::Url;

use crate::media::{MediaOptions, MediaResult};

/// Placeholder image used by the SKU selectors for unloaded swatches.
const PLACEHOLDER_MARKER: &str = "blank.gif";
const NO_BACKGROUND: &str = "none";

/// Extracts categorized media URLs from one product page.
pub struct Extractor<'a> {
    document: &'a Html,
    page_url: &'a Url,
    styles: StyleSheet,
}

impl<'a> Extractor<'a> {
    pub fn new(document: &'a Html, page_url: &'a Url) -> Self {
        Self {
            document,
            page_url,
            styles: StyleSheet::from_document(document),
        }
    }

    /// Rendered `src` of an element: the attribute resolved against the page URL.
    fn src(&self, element: ElementRef<'_>) -> String {
        resolve(self.page_url, element.value().attr("src").unwrap_or(""))
    }

    /// Full-size main gallery images in document order. Duplicates are kept.
    pub fn extract_main_images(&self) -> Vec<String> {
        self.document
            .select(&selectors::MAIN_IMAGES)
            .map(|img| main_image_url(&self.src(img), img.value().attr("data-url")))
            .filter(|url| !url.is_empty())
            .collect()
    }

    /// Activity header images followed by detail module backgrounds. No dedup.
    pub fn extract_detail_images(&self) -> Vec<String> {
        let header = self
            .document
            .select(&selectors::ACTIVITY_HEADER_IMAGES)
            .map(|img| self.src(img))
            .filter(|url| !url.is_empty());

        let modules = self
            .document
            .select(&selectors::DETAIL_MODULES)
            .map(|div| {
                let background = self.styles.computed_background_image(div, self.page_url);
                strip_css_url(&background)
            })
            .filter(|url| url != NO_BACKGROUND);

        header.chain(modules).collect()
    }

    /// Variant swatch images, deduplicated, placeholders removed.
    ///
    /// Output is in first-seen order, but callers should treat it as unordered.
    pub fn extract_sku_images(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for group in selectors::SKU_GROUPS.iter() {
            for img in self.document.select(group) {
                let url = match img.value().attr("data-url").filter(|d| !d.is_empty()) {
                    Some(data_url) => data_url.to_string(),
                    None => self.src(img),
                };
                if url.is_empty() {
                    continue;
                }
                let url = to_zone(&url);
                if seen.insert(url.clone()) {
                    out.push(url);
                }
            }
        }
        out.retain(|url| !url.contains(PLACEHOLDER_MARKER));
        out
    }

    /// Sources of the embedded players; at most two, no duplicates.
    pub fn extract_videos(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(2);
        for player in selectors::VIDEO_PLAYERS.iter() {
            if let Some(el) = self.document.select(player).next() {
                let src = self.src(el);
                if !src.is_empty() && !out.contains(&src) {
                    out.push(src);
                }
            }
        }
        out
    }

    /// Runs the extractors selected by `options`; unselected categories stay `None`.
    pub fn get_all_media(&self, options: &MediaOptions) -> MediaResult {
        MediaResult {
            main: options.main_images.then(|| self.extract_main_images()),
            detail: options.detail_images.then(|| self.extract_detail_images()),
            sku: options.sku_images.then(|| self.extract_sku_images()),
            videos: options.videos.then(|| self.extract_videos()),
        }
    }
}
