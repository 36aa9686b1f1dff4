//! Shared libcurl settings for page fetches and media downloads.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::config::JdgrabConfig;

/// Per-request curl settings derived from the config.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub user_agent: String,
    /// Sent as `Referer`; the image CDN rejects some hotlinked requests without it.
    pub referer: Option<String>,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl HttpOptions {
    pub fn from_config(cfg: &JdgrabConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            referer: None,
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.request_timeout_secs),
        }
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Builds a GET handle for `url` with redirects, timeouts and headers applied.
    pub fn easy(&self, url: &str) -> Result<curl::easy::Easy> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        easy.useragent(&self.user_agent)?;
        if let Some(referer) = &self.referer {
            easy.referer(referer)?;
        }
        // Let curl pick any encoding it can decode.
        easy.accept_encoding("")?;
        Ok(easy)
    }
}

/// Fails unless the handle finished with a 2xx status.
pub fn ensure_success(easy: &mut curl::easy::Easy, url: &str) -> Result<()> {
    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }
    Ok(())
}

/// Completes a scheme-relative URL (`//host/path`) with `https:`.
pub fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_url_completes_scheme_relative() {
        assert_eq!(
            absolute_url("//img14.360buyimg.com/imgzone/a.jpg"),
            "https://img14.360buyimg.com/imgzone/a.jpg"
        );
        assert_eq!(absolute_url("http://x.example.com/a"), "http://x.example.com/a");
    }

    #[test]
    fn options_from_config() {
        let cfg = JdgrabConfig::default();
        let opts = HttpOptions::from_config(&cfg).with_referer("https://item.jd.com/1.html");
        assert_eq!(opts.connect_timeout, Duration::from_secs(cfg.connect_timeout_secs));
        assert_eq!(opts.referer.as_deref(), Some("https://item.jd.com/1.html"));
    }
}
