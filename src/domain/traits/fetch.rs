use async_trait::async_trait;
use thiserror::Error;

/// Why a page title could not be fetched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(String),
}

/// Looks up the `<title>` of a web page
#[async_trait]
pub trait TitleFetcher: Send + Sync {
    /// `Ok(None)` when the page was fetched but has no title
    async fn fetch_title(&self, url: &str) -> Result<Option<String>, FetchError>;
}
