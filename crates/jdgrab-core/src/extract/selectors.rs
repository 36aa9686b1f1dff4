//! CSS selectors for JD product page markup.
//!
//! Update this file when the product page layout changes.

use scraper::Selector;
use std::sync::LazyLock;

fn parse(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e}"))
}

/// Thumbnails of the main product gallery.
pub static MAIN_IMAGES: LazyLock<Selector> = LazyLock::new(|| parse("#spec-list img"));

/// Banner images above the detail section.
pub static ACTIVITY_HEADER_IMAGES: LazyLock<Selector> =
    LazyLock::new(|| parse("#activity_header img"));

/// Detail modules whose background-image carries the detail picture.
pub static DETAIL_MODULES: LazyLock<Selector> = LazyLock::new(|| parse("#detail .ssd-module"));

/// SKU selector groups: color/style, version/size, then any other attribute list.
pub static SKU_GROUPS: LazyLock<[Selector; 3]> = LazyLock::new(|| {
    [
        parse("#choose-attr-1 img, .color-list img"),
        parse("#choose-attr-2 img, .size-list img"),
        parse(".choose-attr img, .item-selected img"),
    ]
});

/// Embedded player elements (main gallery video, detail video).
pub static VIDEO_PLAYERS: LazyLock<[Selector; 2]> = LazyLock::new(|| {
    [
        parse("#video-player_html5_api"),
        parse("#detail-video-player_html5_api"),
    ]
});

pub static STYLE_ELEMENTS: LazyLock<Selector> = LazyLock::new(|| parse("style"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_selectors_parse() {
        LazyLock::force(&MAIN_IMAGES);
        LazyLock::force(&ACTIVITY_HEADER_IMAGES);
        LazyLock::force(&DETAIL_MODULES);
        LazyLock::force(&SKU_GROUPS);
        LazyLock::force(&VIDEO_PLAYERS);
        LazyLock::force(&STYLE_ELEMENTS);
    }
}
