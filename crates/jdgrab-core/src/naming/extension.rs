//! File extension guessing from media URLs.

use regex::Regex;
use std::sync::LazyLock;

static MEDIA_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|gif|mp4|webm|webp)(?:$|\?)")
        .unwrap_or_else(|e| panic!("media extension pattern: {e}"))
});

const VIDEO_HINT: &str = "video";
const VIDEO_DEFAULT: &str = ".mp4";
const IMAGE_DEFAULT: &str = ".jpg";

/// Dot-prefixed lowercase extension for `url`.
///
/// A recognized media extension at the end of the path (optionally followed by a
/// query) wins; otherwise `.mp4` when the URL mentions `video`, else `.jpg`.
pub fn file_extension(url: &str) -> String {
    if let Some(caps) = MEDIA_EXTENSION.captures(url) {
        return format!(".{}", caps[1].to_ascii_lowercase());
    }
    if url.contains(VIDEO_HINT) {
        return VIDEO_DEFAULT.to_string();
    }
    IMAGE_DEFAULT.to_string()
}
