//! Media categories, extraction options and extraction results.

use serde::{Deserialize, Serialize};

/// Which media categories to extract. Persisted as the user's preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaOptions {
    pub main_images: bool,
    pub detail_images: bool,
    pub sku_images: bool,
    pub videos: bool,
}

impl Default for MediaOptions {
    fn default() -> Self {
        Self {
            main_images: true,
            detail_images: true,
            sku_images: true,
            videos: true,
        }
    }
}

impl MediaOptions {
    pub fn is_enabled(&self, category: MediaCategory) -> bool {
        match category {
            MediaCategory::Main => self.main_images,
            MediaCategory::Detail => self.detail_images,
            MediaCategory::Sku => self.sku_images,
            MediaCategory::Videos => self.videos,
        }
    }

    pub fn set(&mut self, category: MediaCategory, enabled: bool) {
        match category {
            MediaCategory::Main => self.main_images = enabled,
            MediaCategory::Detail => self.detail_images = enabled,
            MediaCategory::Sku => self.sku_images = enabled,
            MediaCategory::Videos => self.videos = enabled,
        }
    }
}

/// One of the four media categories, in download order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaCategory {
    Main,
    Detail,
    Sku,
    Videos,
}

impl MediaCategory {
    /// Fixed processing order; determines task order and therefore filenames.
    pub const ALL: [MediaCategory; 4] = [
        MediaCategory::Main,
        MediaCategory::Detail,
        MediaCategory::Sku,
        MediaCategory::Videos,
    ];

    /// Subfolder under the run folder.
    pub fn dir_name(self) -> &'static str {
        match self {
            MediaCategory::Main => "main_images",
            MediaCategory::Detail => "detail_images",
            MediaCategory::Sku => "sku_images",
            MediaCategory::Videos => "videos",
        }
    }

    /// Filename prefix before the 1-based index.
    pub fn file_prefix(self) -> &'static str {
        match self {
            MediaCategory::Main => "main",
            MediaCategory::Detail => "detail",
            MediaCategory::Sku => "sku",
            MediaCategory::Videos => "video",
        }
    }

    /// Name accepted on the command line (`prefs set <category> ...`).
    pub fn as_str(self) -> &'static str {
        match self {
            MediaCategory::Main => "main",
            MediaCategory::Detail => "detail",
            MediaCategory::Sku => "sku",
            MediaCategory::Videos => "videos",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "main-images" => Some(MediaCategory::Main),
            "detail" | "detail-images" => Some(MediaCategory::Detail),
            "sku" | "sku-images" => Some(MediaCategory::Sku),
            "video" | "videos" => Some(MediaCategory::Videos),
            _ => None,
        }
    }
}

/// Categorized media URLs extracted from one product page.
///
/// A field is `None` when its category was not requested; serialization omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<String>>,
}

impl MediaResult {
    /// URLs for one category; empty when the category was not requested.
    pub fn urls(&self, category: MediaCategory) -> &[String] {
        let list = match category {
            MediaCategory::Main => &self.main,
            MediaCategory::Detail => &self.detail,
            MediaCategory::Sku => &self.sku,
            MediaCategory::Videos => &self.videos,
        };
        list.as_deref().unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        MediaCategory::ALL.iter().map(|c| self.urls(*c).len()).sum()
    }
}
