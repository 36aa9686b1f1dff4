//! Page context: a dedicated thread that owns the parsed product page and
//! answers extraction requests sent over a channel.
//!
//! The extractor is not available until an `Inject` request installs it;
//! `Probe` reports whether it is installed so callers can inject exactly once.

mod source;

pub use source::{fetch_page, PageSource};

use scraper::Html;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use url::Url;

use crate::extract::Extractor;
use crate::media::{MediaOptions, MediaResult};

/// Request sent from the control side to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum PageRequest {
    /// Is the extractor installed?
    Probe,
    /// Install the extractor. A no-op when already installed.
    Inject,
    ExtractMedia { options: MediaOptions },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResponse {
    Loaded(bool),
    Injected,
    Media(MediaResult),
    Error(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("page did not answer within {0:?}")]
    Timeout(Duration),
    #[error("page context is gone")]
    Disconnected,
    #[error("page rejected request: {0}")]
    Rejected(String),
    #[error("unexpected page response to {request}: {response:?}")]
    Unexpected {
        request: &'static str,
        response: PageResponse,
    },
}

struct Envelope {
    request: PageRequest,
    reply: oneshot::Sender<PageResponse>,
}

/// Clonable handle for talking to a running page context.
#[derive(Clone)]
pub struct PageHandle {
    tx: mpsc::Sender<Envelope>,
    page_url: Url,
}

/// Spawns page contexts.
pub struct PageAgent;

impl PageAgent {
    /// Parses `html` on a new thread and serves requests until every handle is dropped.
    pub fn spawn(html: String, page_url: Url) -> std::io::Result<PageHandle> {
        let (tx, rx) = mpsc::channel::<Envelope>(8);
        let url = page_url.clone();
        std::thread::Builder::new()
            .name("jdgrab-page".to_string())
            .spawn(move || serve(html, url, rx))?;
        Ok(PageHandle { tx, page_url })
    }
}

fn serve(html: String, page_url: Url, mut rx: mpsc::Receiver<Envelope>) {
    let document = Html::parse_document(&html);
    drop(html);
    let mut installed = false;
    tracing::debug!(url = %page_url, "page context ready");

    while let Some(Envelope { request, reply }) = rx.blocking_recv() {
        let response = match request {
            PageRequest::Probe => PageResponse::Loaded(installed),
            PageRequest::Inject => {
                if !installed {
                    installed = true;
                    tracing::info!("extractor initialized");
                }
                PageResponse::Injected
            }
            PageRequest::ExtractMedia { options } => {
                if installed {
                    let extractor = Extractor::new(&document, &page_url);
                    PageResponse::Media(extractor.get_all_media(&options))
                } else {
                    PageResponse::Error("extractor not loaded".to_string())
                }
            }
        };
        // The requester may have timed out and dropped its receiver.
        let _ = reply.send(response);
    }
    tracing::debug!(url = %page_url, "page context closed");
}

impl PageHandle {
    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// Sends one request and waits at most `timeout` for the answer.
    pub async fn request(
        &self,
        request: PageRequest,
        timeout: Duration,
    ) -> Result<PageResponse, PageError> {
        let (reply, answer) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply })
            .await
            .map_err(|_| PageError::Disconnected)?;
        match tokio::time::timeout(timeout, answer).await {
            Err(_) => Err(PageError::Timeout(timeout)),
            Ok(Err(_)) => Err(PageError::Disconnected),
            Ok(Ok(PageResponse::Error(msg))) => Err(PageError::Rejected(msg)),
            Ok(Ok(response)) => Ok(response),
        }
    }

    pub async fn probe(&self, timeout: Duration) -> Result<bool, PageError> {
        match self.request(PageRequest::Probe, timeout).await? {
            PageResponse::Loaded(loaded) => Ok(loaded),
            response => Err(PageError::Unexpected {
                request: "probe",
                response,
            }),
        }
    }

    pub async fn inject(&self, timeout: Duration) -> Result<(), PageError> {
        match self.request(PageRequest::Inject, timeout).await? {
            PageResponse::Injected => Ok(()),
            response => Err(PageError::Unexpected {
                request: "inject",
                response,
            }),
        }
    }

    pub async fn extract_media(
        &self,
        options: MediaOptions,
        timeout: Duration,
    ) -> Result<MediaResult, PageError> {
        match self
            .request(PageRequest::ExtractMedia { options }, timeout)
            .await?
        {
            PageResponse::Media(media) => Ok(media),
            response => Err(PageError::Unexpected {
                request: "extractMedia",
                response,
            }),
        }
    }
}

#[cfg(test)]
impl PageHandle {
    /// Handle whose page context has already shut down.
    pub(crate) fn closed(page_url: Url) -> Self {
        let (tx, _) = mpsc::channel(1);
        Self { tx, page_url }
    }
}
