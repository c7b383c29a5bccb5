//! Recoverable per-race extraction failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("element not found: {0}")]
    MissingElement(&'static str),

    #[error("unreadable odds figure: {0:?}")]
    MalformedFigure(String),

    #[error("reveal action failed: {0:#}")]
    Reveal(anyhow::Error),

    #[error("hidden odds still missing {0:?} after reveal")]
    RevealTimeout(std::time::Duration),

    #[error("{0}")]
    Other(String),
}

