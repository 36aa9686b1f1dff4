//! `jdgrab download` – extract and download the media of one product page.

use anyhow::{Context, Result};
use jdgrab_core::config::JdgrabConfig;
use jdgrab_core::download::CurlDownloader;
use jdgrab_core::http::HttpOptions;
use jdgrab_core::media::MediaCategory;
use jdgrab_core::orchestrator::{Orchestrator, RunEvent, RunProgress};
use std::path::PathBuf;
use std::sync::Arc;

use super::{media_options, page_source};

pub async fn run_download(
    cfg: &JdgrabConfig,
    url: &str,
    html: Option<PathBuf>,
    dir: Option<PathBuf>,
    only: &[MediaCategory],
) -> Result<()> {
    let root = match dir.or_else(|| cfg.download_dir.clone()) {
        Some(root) => root,
        None => std::env::current_dir().context("current directory")?,
    };
    let options = media_options(only);
    tracing::debug!(?options, root = %root.display(), "starting download run");

    let downloader = CurlDownloader::new(&root, HttpOptions::from_config(cfg).with_referer(url));
    let (events_tx, mut events_rx) = tokio::sync::mpsc::channel::<RunEvent>(64);
    let printer = tokio::spawn(async move {
        let mut progress: Option<RunProgress> = None;
        while let Some(event) = events_rx.recv().await {
            match event {
                RunEvent::Progress(p) => progress = Some(p),
                RunEvent::Status(line) => match progress.take() {
                    Some(p) => println!("{}  ({:.0}%)", line, p.percent()),
                    None => println!("{}", line),
                },
                RunEvent::Phase(_) => {}
            }
        }
    });

    let orchestrator = Orchestrator::new(cfg.clone(), Arc::new(downloader)).with_events(events_tx);
    let result = orchestrator
        .run(url, page_source(cfg, html), options)
        .await;
    // Closes the event channel so the printer drains and exits.
    drop(orchestrator);
    let _ = printer.await;

    let report = result?;
    if report.attempted > 0 {
        println!("Saved under {}", root.join(&report.folder).display());
    }
    if report.failed > 0 {
        println!(
            "{} of {} downloads failed; see the log for details.",
            report.failed, report.attempted
        );
    }
    Ok(())
}
