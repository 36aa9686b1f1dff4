//! Obtaining product page markup: over HTTP or from a saved file.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::http::{ensure_success, HttpOptions};

/// Where the product page markup comes from.
#[derive(Debug, Clone)]
pub enum PageSource {
    /// GET the page URL.
    Fetch(HttpOptions),
    /// Page saved from a browser ("Save page as..."); the page URL is still used
    /// to resolve relative links.
    File(PathBuf),
    Markup(String),
}

impl PageSource {
    /// Loads the page markup. Blocking; call from `spawn_blocking` in async code.
    pub fn load(&self, page_url: &str) -> Result<String> {
        match self {
            PageSource::Fetch(opts) => fetch_page(page_url, opts),
            PageSource::File(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("read page file: {}", path.display()))?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            PageSource::Markup(html) => Ok(html.clone()),
        }
    }
}

/// Fetches `url` and returns the body as text (invalid UTF-8 replaced).
pub fn fetch_page(url: &str, opts: &HttpOptions) -> Result<String> {
    let mut body = Vec::new();
    let mut easy = opts.easy(url)?;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform().context("page request failed")?;
    }
    ensure_success(&mut easy, url)?;
    tracing::debug!(url, bytes = body.len(), "fetched product page");
    Ok(String::from_utf8_lossy(&body).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"<html><body>saved</body></html>").unwrap();
        f.flush().unwrap();
        let html = PageSource::File(f.path().to_path_buf())
            .load("https://item.jd.com/1.html")
            .unwrap();
        assert!(html.contains("saved"));
    }

    #[test]
    fn load_missing_file_errs() {
        let dir = tempfile::tempdir().unwrap();
        let source = PageSource::File(dir.path().join("missing.html"));
        assert!(source.load("https://item.jd.com/1.html").is_err());
    }

    #[test]
    fn load_markup() {
        let html = PageSource::Markup("<p>x</p>".to_string())
            .load("https://item.jd.com/1.html")
            .unwrap();
        assert_eq!(html, "<p>x</p>");
    }
}
