use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/jdgrab/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JdgrabConfig {
    /// Marketplace domain; product pages live on `item.<site_domain>`.
    pub site_domain: String,
    /// Root directory for run folders (None = current directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
    /// User-Agent for page fetches and downloads.
    pub user_agent: String,
    /// Upper bound on waiting for the page agent to answer a request.
    pub message_timeout_secs: u64,
    /// Pause after installing the extractor before the first extraction request.
    pub inject_settle_ms: u64,
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout per page fetch or file download.
    pub request_timeout_secs: u64,
}

impl Default for JdgrabConfig {
    fn default() -> Self {
        Self {
            site_domain: "jd.com".to_string(),
            download_dir: None,
            user_agent: concat!("jdgrab/", env!("CARGO_PKG_VERSION")).to_string(),
            message_timeout_secs: 30,
            inject_settle_ms: 100,
            connect_timeout_secs: 15,
            request_timeout_secs: 300,
        }
    }
}

impl JdgrabConfig {
    /// Rejects values that would make every run fail.
    pub fn validate(&self) -> Result<()> {
        if self.site_domain.trim().is_empty() {
            bail!("site_domain must not be empty");
        }
        if self.message_timeout_secs == 0 {
            bail!("message_timeout_secs must be at least 1");
        }
        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            bail!("connect_timeout_secs and request_timeout_secs must be at least 1");
        }
        Ok(())
    }
}

/// `~/.config/jdgrab/config.toml`.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("jdgrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the default path, writing defaults on first use.
pub fn load_or_init() -> Result<JdgrabConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<JdgrabConfig> {
    if path.exists() {
        return load_from(path);
    }
    let cfg = JdgrabConfig::default();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir: {}", parent.display()))?;
    }
    let toml = toml::to_string_pretty(&cfg).context("serialize default config")?;
    fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
    tracing::info!("created default config at {}", path.display());
    Ok(cfg)
}

pub fn load_from(path: &Path) -> Result<JdgrabConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: JdgrabConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}
