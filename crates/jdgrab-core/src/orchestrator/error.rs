//! Errors that abort a run.

use crate::page::PageError;

/// Status line shown when the URL is not a product page.
pub const WRONG_PAGE_MESSAGE: &str = "Please navigate to a JD product page first.";

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Not a product page; nothing was fetched, extracted or downloaded.
    #[error("not a product page: {0}")]
    WrongPage(String),
    #[error("could not load page: {0:#}")]
    PageLoad(anyhow::Error),
    #[error(transparent)]
    Page(#[from] PageError),
}

impl RunError {
    /// Status line for the user.
    pub fn status_message(&self) -> String {
        match self {
            RunError::WrongPage(_) => WRONG_PAGE_MESSAGE.to_string(),
            other => format!("Error: {}", other),
        }
    }
}
