//! CLI for jdgrab.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use jdgrab_core::config;
use jdgrab_core::media::MediaCategory;
use std::path::PathBuf;

use commands::{run_download, run_extract, run_prefs_reset, run_prefs_set, run_prefs_show};

/// Top-level CLI for jdgrab.
#[derive(Debug, Parser)]
#[command(name = "jdgrab")]
#[command(about = "jdgrab: save the images and videos of a JD product page", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Extract media from a product page and download it into a new run folder.
    Download {
        /// Product page URL (https://item.jd.com/<id>.html).
        url: String,
        /// Read the page from a saved HTML file instead of fetching it.
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
        /// Download root (default: config `download_dir`, else the current directory).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Only these categories for this run, ignoring stored preferences (comma-separated).
        #[arg(long, value_name = "CATEGORY", value_delimiter = ',', value_parser = parse_category)]
        only: Vec<MediaCategory>,
    },

    /// Print the media URLs of a product page as JSON without downloading.
    Extract {
        /// Product page URL.
        url: String,
        /// Read the page from a saved HTML file instead of fetching it.
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
    },

    /// Show or change which media categories are downloaded.
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum PrefsAction {
    /// Print the stored preferences.
    Show,
    /// Enable or disable one category.
    Set {
        /// main, detail, sku or videos.
        #[arg(value_parser = parse_category)]
        category: MediaCategory,
        state: Toggle,
    },
    /// Enable every category again.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::On
    }
}

fn parse_category(s: &str) -> Result<MediaCategory, String> {
    MediaCategory::parse(s).ok_or_else(|| {
        format!(
            "unknown category '{}' (expected one of: main, detail, sku, videos)",
            s
        )
    })
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Download {
                url,
                html,
                dir,
                only,
            } => run_download(&cfg, &url, html, dir, &only).await?,
            CliCommand::Extract { url, html } => run_extract(&cfg, &url, html).await?,
            CliCommand::Prefs { action } => match action {
                PrefsAction::Show => run_prefs_show()?,
                PrefsAction::Set { category, state } => run_prefs_set(category, state.enabled())?,
                PrefsAction::Reset => run_prefs_reset()?,
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
