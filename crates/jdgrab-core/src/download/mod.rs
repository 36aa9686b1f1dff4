//! Download subsystem: turns `{url, filename, conflictAction}` requests into
//! files under a download root.

mod single;
mod target;

pub use single::CurlDownloader;
pub use target::{resolve_target, temp_path, uniquify, TEMP_SUFFIX};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What to do when the target file already exists. Runs never overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictAction {
    /// Save as `name (1).ext`, `name (2).ext`, ...
    #[default]
    Uniquify,
}

/// One file submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub url: String,
    /// Relative path (`/`-separated) under the download root.
    pub filename: String,
    pub conflict_action: ConflictAction,
}

impl DownloadRequest {
    pub fn uniquify(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            conflict_action: ConflictAction::Uniquify,
        }
    }
}

/// Anything that can save a URL to a relative filename. Blocking.
pub trait DownloadSubsystem: Send + Sync {
    /// Downloads one file and returns the path it was saved to.
    fn download(&self, request: &DownloadRequest) -> anyhow::Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_shape() {
        let req = DownloadRequest::uniquify(
            "https://img.example.com/a.jpg",
            "JD_Product_2024_01_01_00_00_1/main_images/main_1.jpg",
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["url"], "https://img.example.com/a.jpg");
        assert_eq!(
            json["filename"],
            "JD_Product_2024_01_01_00_00_1/main_images/main_1.jpg"
        );
        assert_eq!(json["conflictAction"], "uniquify");
    }
}
