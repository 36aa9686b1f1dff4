//! `jdgrab extract` – print the extracted media URLs as JSON.

use anyhow::Result;
use jdgrab_core::config::JdgrabConfig;
use jdgrab_core::orchestrator::Orchestrator;
use std::path::PathBuf;

use super::{media_options, page_source};

pub async fn run_extract(cfg: &JdgrabConfig, url: &str, html: Option<PathBuf>) -> Result<()> {
    let options = media_options(&[]);
    let orchestrator = Orchestrator::extract_only(cfg.clone());
    let media = orchestrator
        .extract(url, page_source(cfg, html), options)
        .await?;
    println!("{}", serde_json::to_string_pretty(&media)?);
    tracing::info!(total = media.total(), "extract finished");
    Ok(())
}
