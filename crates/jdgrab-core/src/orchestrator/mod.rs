//! Download run orchestration: validate the page, extract media through the
//! page context, name the files and submit them one at a time.
//!
//! Validation and extraction failures abort the run. A failed download is
//! logged and skipped; the queue keeps going.

mod error;
mod phase;
mod progress;

pub use error::{RunError, WRONG_PAGE_MESSAGE};
pub use phase::{RunEvent, RunPhase};
pub use progress::{RunProgress, RunReport};

use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;

use crate::config::JdgrabConfig;
use crate::download::{DownloadRequest, DownloadSubsystem};
use crate::media::{MediaCategory, MediaOptions, MediaResult};
use crate::naming::{self, DownloadTask};
use crate::page::{PageAgent, PageError, PageHandle, PageSource};

pub const EXTRACTING_MESSAGE: &str = "Extracting media...";
pub const NO_MEDIA_MESSAGE: &str = "No media found to download.";

struct NoDownloads;

impl DownloadSubsystem for NoDownloads {
    fn download(&self, request: &DownloadRequest) -> anyhow::Result<PathBuf> {
        anyhow::bail!("downloads are disabled: {}", request.filename)
    }
}

pub struct Orchestrator {
    config: JdgrabConfig,
    downloads: Arc<dyn DownloadSubsystem>,
    events: Option<mpsc::Sender<RunEvent>>,
}

impl Orchestrator {
    pub fn new(config: JdgrabConfig, downloads: Arc<dyn DownloadSubsystem>) -> Self {
        Self {
            config,
            downloads,
            events: None,
        }
    }

    /// An orchestrator for [`Orchestrator::extract`]; any download attempt fails.
    pub fn extract_only(config: JdgrabConfig) -> Self {
        Self::new(config, Arc::new(NoDownloads))
    }

    /// Publish phases, status lines and progress on `events`.
    pub fn with_events(mut self, events: mpsc::Sender<RunEvent>) -> Self {
        self.events = Some(events);
        self
    }

    fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.config.message_timeout_secs)
    }

    async fn emit(&self, event: RunEvent) {
        if let Some(tx) = &self.events {
            // A closed consumer must not stop the run.
            let _ = tx.send(event).await;
        }
    }

    async fn phase(&self, phase: RunPhase) {
        tracing::debug!(%phase, "run phase");
        self.emit(RunEvent::Phase(phase)).await;
    }

    async fn status(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{}", message);
        self.emit(RunEvent::Status(message)).await;
    }

    /// Fetches (or reads) the page, then runs the full download flow.
    /// The page is only loaded once the URL passed validation.
    pub async fn run(
        &self,
        page_url: &str,
        source: PageSource,
        options: MediaOptions,
    ) -> Result<RunReport, RunError> {
        self.run_at(page_url, source, options, Local::now().naive_local())
            .await
    }

    /// Like [`Orchestrator::run`] with an explicit folder timestamp.
    pub async fn run_at(
        &self,
        page_url: &str,
        source: PageSource,
        options: MediaOptions,
        timestamp: NaiveDateTime,
    ) -> Result<RunReport, RunError> {
        let result = async {
            self.validate(page_url).await?;
            self.phase(RunPhase::Extracting).await;
            self.status(EXTRACTING_MESSAGE).await;
            let page = self.open_page(page_url, source).await?;
            let media = self.request_media(&page, options).await?;
            self.derive_and_download(page_url, &media, timestamp).await
        }
        .await;
        self.finish(result).await
    }

    /// Validates, loads and extracts without downloading anything.
    pub async fn extract(
        &self,
        page_url: &str,
        source: PageSource,
        options: MediaOptions,
    ) -> Result<MediaResult, RunError> {
        let result = async {
            self.validate(page_url).await?;
            self.phase(RunPhase::Extracting).await;
            self.status(EXTRACTING_MESSAGE).await;
            let page = self.open_page(page_url, source).await?;
            self.request_media(&page, options).await
        }
        .await;
        match result {
            Ok(media) => {
                self.phase(RunPhase::Done).await;
                Ok(media)
            }
            Err(e) => {
                self.abort(&e).await;
                Err(e)
            }
        }
    }

    /// Runs the download flow against an already open page context.
    pub async fn run_on_page(
        &self,
        page: &PageHandle,
        options: MediaOptions,
        timestamp: NaiveDateTime,
    ) -> Result<RunReport, RunError> {
        let page_url = page.page_url().as_str();
        let result = async {
            self.validate(page_url).await?;
            self.phase(RunPhase::Extracting).await;
            self.status(EXTRACTING_MESSAGE).await;
            let media = self.request_media(page, options).await?;
            self.derive_and_download(page_url, &media, timestamp).await
        }
        .await;
        self.finish(result).await
    }

    async fn finish(&self, result: Result<RunReport, RunError>) -> Result<RunReport, RunError> {
        if let Err(e) = &result {
            self.abort(e).await;
        }
        result
    }

    async fn abort(&self, e: &RunError) {
        tracing::error!("run aborted: {}", e);
        self.status(e.status_message()).await;
        self.phase(RunPhase::Aborted(e.to_string())).await;
    }

    async fn validate(&self, page_url: &str) -> Result<(), RunError> {
        self.phase(RunPhase::Validating).await;
        if naming::is_product_page(page_url, &self.config.site_domain) {
            Ok(())
        } else {
            Err(RunError::WrongPage(page_url.to_string()))
        }
    }

    async fn open_page(&self, page_url: &str, source: PageSource) -> Result<PageHandle, RunError> {
        let url = Url::parse(page_url).map_err(|e| RunError::PageLoad(e.into()))?;
        let owned_url = page_url.to_string();
        let html = tokio::task::spawn_blocking(move || source.load(&owned_url))
            .await
            .map_err(|e| RunError::PageLoad(anyhow::anyhow!("page loader failed: {}", e)))?
            .map_err(RunError::PageLoad)?;
        PageAgent::spawn(html, url).map_err(|e| RunError::PageLoad(e.into()))
    }

    /// Installs the extractor in `page` unless the probe says it is already there.
    pub async fn ensure_extractor(&self, page: &PageHandle) -> Result<(), PageError> {
        let timeout = self.message_timeout();
        if page.probe(timeout).await? {
            return Ok(());
        }
        page.inject(timeout).await?;
        tokio::time::sleep(Duration::from_millis(self.config.inject_settle_ms)).await;
        Ok(())
    }

    /// One extraction request for the enabled categories.
    pub async fn request_media(
        &self,
        page: &PageHandle,
        options: MediaOptions,
    ) -> Result<MediaResult, RunError> {
        self.ensure_extractor(page).await?;
        let media = page.extract_media(options, self.message_timeout()).await?;
        tracing::debug!(
            main = media.urls(MediaCategory::Main).len(),
            detail = media.urls(MediaCategory::Detail).len(),
            sku = media.urls(MediaCategory::Sku).len(),
            videos = media.urls(MediaCategory::Videos).len(),
            "media extracted"
        );
        Ok(media)
    }

    async fn derive_and_download(
        &self,
        page_url: &str,
        media: &MediaResult,
        timestamp: NaiveDateTime,
    ) -> Result<RunReport, RunError> {
        self.phase(RunPhase::Deriving).await;
        let product_id = naming::product_id(page_url, &self.config.site_domain);
        let folder = naming::folder_name(timestamp, &product_id);
        let tasks = naming::derive_tasks(&folder, media);

        if tasks.is_empty() {
            self.status(NO_MEDIA_MESSAGE).await;
            self.phase(RunPhase::Done).await;
            return Ok(RunReport {
                folder,
                ..Default::default()
            });
        }

        let report = self.download_all(folder, tasks).await;
        self.status(format!(
            "Download complete! Saved {} files.",
            report.attempted
        ))
        .await;
        tracing::info!(
            folder = %report.folder,
            succeeded = report.succeeded,
            failed = report.failed,
            "run finished"
        );
        self.phase(RunPhase::Done).await;
        Ok(report)
    }

    /// Submits tasks strictly one after another.
    async fn download_all(&self, folder: String, tasks: Vec<DownloadTask>) -> RunReport {
        let mut progress = RunProgress::new(tasks.len());
        let mut saved = Vec::new();

        for (i, task) in tasks.into_iter().enumerate() {
            self.phase(RunPhase::Downloading {
                index: i + 1,
                total: progress.total,
            })
            .await;

            let request = DownloadRequest::uniquify(task.url, task.filename);
            let downloads = Arc::clone(&self.downloads);
            let submitted = request.clone();
            let outcome = tokio::task::spawn_blocking(move || downloads.download(&submitted))
                .await
                .unwrap_or_else(|e| Err(anyhow::anyhow!("download worker failed: {}", e)));

            match outcome {
                Ok(path) => {
                    saved.push(path);
                    progress.record(true);
                }
                Err(e) => {
                    tracing::warn!(url = %request.url, "Failed to download {}: {:#}", request.filename, e);
                    progress.record(false);
                }
            }

            self.emit(RunEvent::Progress(progress)).await;
            self.status(format!(
                "Downloading: {}/{}",
                progress.completed, progress.total
            ))
            .await;
        }

        RunReport {
            folder,
            attempted: progress.completed,
            succeeded: progress.succeeded,
            failed: progress.failed,
            saved,
        }
    }
}
