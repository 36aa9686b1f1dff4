//! Single-stream HTTP GET downloader backed by libcurl.
//!
//! Streams the body into `<target>.part` and renames it into place once the
//! transfer finished with a 2xx status.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::target::{resolve_target, temp_path};
use super::{DownloadRequest, DownloadSubsystem};
use crate::http::{absolute_url, ensure_success, HttpOptions};

/// Saves requests under `root` using curl.
pub struct CurlDownloader {
    root: PathBuf,
    http: HttpOptions,
}

impl CurlDownloader {
    pub fn new(root: impl Into<PathBuf>, http: HttpOptions) -> Self {
        Self {
            root: root.into(),
            http,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// GETs `url` into `temp`. Returns the number of bytes written.
    fn fetch_to(&self, url: &str, temp: &Path) -> Result<u64> {
        let mut file = File::create(temp)
            .with_context(|| format!("failed to create temp file: {}", temp.display()))?;
        let mut written = 0u64;
        let mut write_error: Option<io::Error> = None;

        let mut easy = self.http.easy(url)?;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_error = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_error {
            return Err(e).with_context(|| format!("write {}", temp.display()));
        }
        performed.context("GET request failed")?;
        ensure_success(&mut easy, url)?;
        file.sync_all().context("sync downloaded file")?;
        Ok(written)
    }
}

impl DownloadSubsystem for CurlDownloader {
    fn download(&self, request: &DownloadRequest) -> Result<PathBuf> {
        let url = absolute_url(&request.url);
        let target = resolve_target(&self.root, &request.filename, request.conflict_action)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }

        let temp = temp_path(&target);
        match self.fetch_to(&url, &temp) {
            Ok(bytes) => {
                fs::rename(&temp, &target).with_context(|| {
                    format!("failed to rename {} to {}", temp.display(), target.display())
                })?;
                tracing::debug!(url = %url, path = %target.display(), bytes, "saved");
                Ok(target)
            }
            Err(e) => {
                let _ = fs::remove_file(&temp);
                Err(e)
            }
        }
    }
}
