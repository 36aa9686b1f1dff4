//! CLI command handlers, one file per command.

mod download;
mod extract;
mod prefs;

pub use download::run_download;
pub use extract::run_extract;
pub use prefs::{run_prefs_reset, run_prefs_set, run_prefs_show};

use jdgrab_core::config::JdgrabConfig;
use jdgrab_core::http::HttpOptions;
use jdgrab_core::media::{MediaCategory, MediaOptions};
use jdgrab_core::naming::product_host;
use jdgrab_core::page::PageSource;
use jdgrab_core::prefs::PreferenceStore;
use std::path::PathBuf;

/// Saved file when given, otherwise fetch the page with the site as referer.
fn page_source(cfg: &JdgrabConfig, html: Option<PathBuf>) -> PageSource {
    match html {
        Some(path) => PageSource::File(path),
        None => PageSource::Fetch(
            HttpOptions::from_config(cfg)
                .with_referer(format!("https://{}/", product_host(&cfg.site_domain))),
        ),
    }
}

/// Stored preferences, or exactly the `only` categories when given.
fn media_options(only: &[MediaCategory]) -> MediaOptions {
    options_from(PreferenceStore::open_default(), only)
}

/// An unusable preference location falls back to defaults.
fn options_from(store: anyhow::Result<PreferenceStore>, only: &[MediaCategory]) -> MediaOptions {
    if only.is_empty() {
        return match store {
            Ok(store) => store.load(),
            Err(e) => {
                tracing::warn!("preferences unavailable, using defaults: {:#}", e);
                MediaOptions::default()
            }
        };
    }
    let mut options = MediaOptions::default();
    for category in MediaCategory::ALL {
        options.set(category, only.contains(&category));
    }
    options
}
