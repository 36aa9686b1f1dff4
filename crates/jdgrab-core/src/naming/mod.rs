//! Run folder naming and per-file target names.
//!
//! Every run saves into `JD_Product_{YYYY}_{MM}_{DD}_{HH}_{mm}_{productId}`;
//! files are named `{category_dir}/{prefix}_{n}{ext}` with `n` starting at 1.

mod extension;
mod product;
mod sanitize;

pub use extension::file_extension;
pub use product::{is_product_page, product_host, product_id, UNKNOWN_PRODUCT};
pub use sanitize::{sanitize_component, sanitize_relative_path};

use chrono::NaiveDateTime;

use crate::media::{MediaCategory, MediaResult};

const FOLDER_PREFIX: &str = "JD_Product";

/// One file to fetch: source URL and target path relative to the download root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub url: String,
    pub filename: String,
}

/// Run folder name, unique per product to the minute.
pub fn folder_name(timestamp: NaiveDateTime, product_id: &str) -> String {
    format!(
        "{}_{}_{}",
        FOLDER_PREFIX,
        timestamp.format("%Y_%m_%d_%H_%M"),
        product_id
    )
}

/// Builds download tasks in category order (main, detail, sku, videos),
/// keeping each category's list order.
pub fn derive_tasks(folder: &str, media: &MediaResult) -> Vec<DownloadTask> {
    let mut tasks = Vec::with_capacity(media.total());
    for category in MediaCategory::ALL {
        for (index, url) in media.urls(category).iter().enumerate() {
            tasks.push(DownloadTask {
                url: url.clone(),
                filename: format!(
                    "{}/{}/{}_{}{}",
                    folder,
                    category.dir_name(),
                    category.file_prefix(),
                    index + 1,
                    file_extension(url)
                ),
            });
        }
    }
    tasks
}
