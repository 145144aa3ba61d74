use crate::browser::BrowserError;
use crate::config::ConfigError;
use crate::http::HttpError;
use thiserror::Error;

/// Errors that end a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("could not set up HTTP client: {0}")]
    Http(#[from] HttpError),

    #[error("could not read page snapshot: {0}")]
    Snapshot(#[from] std::io::Error),

    #[error("No articles were processed")]
    NoArticles,

    #[error("No translations succeeded")]
    NoTranslations,
}

impl PipelineError {
    /// True when the run completed but its results failed verification
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, PipelineError::NoArticles | PipelineError::NoTranslations)
    }

    /// True when a bounded wait expired
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            PipelineError::Browser(BrowserError::WaitTimeout { .. })
        )
    }
}
