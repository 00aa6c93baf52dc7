//! Reports the title of the first URL mentioned in the channel

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::application::messaging::Context;
use crate::domain::entities::{Claim, Handler, HandlerResult};
use crate::domain::traits::{FetchError, TitleFetcher};

/// http, https or ftp URL with a real domain or a dotted quad host
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:https?|ftp)://(?:(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}\.?|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?::\d{1,5})?(?:/[^\s]*)?",
    )
    .expect("URL pattern is valid")
});

/// First strict URL in `text`
pub fn find_url(text: &str) -> Option<&str> {
    URL_RE.find(text).map(|m| m.as_str())
}

/// Fetches page titles inline, so a slow page holds up the next event
pub struct UrlTitle {
    fetcher: Arc<dyn TitleFetcher>,
}

impl UrlTitle {
    pub fn new(fetcher: Arc<dyn TitleFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Handler for UrlTitle {
    fn name(&self) -> &'static str {
        "url_title"
    }

    async fn evaluate(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let Some(url) = find_url(ctx.message()) else {
            return Ok(None);
        };

        match self.fetcher.fetch_title(url).await {
            Ok(Some(title)) => ctx.say(&format!("Title: {}", title)).await?,
            Ok(None) => tracing::debug!("{} has no title", url),
            Err(FetchError::Status(code)) => {
                tracing::warn!("Title fetch for {} returned {}", url, code);
                ctx.say(&format!("{} returned status {}", url, code)).await?;
            }
            Err(FetchError::Transport(e)) => {
                tracing::warn!("Title fetch for {} failed: {}", url, e);
                ctx.say(&format!("{} could not be fetched (no status)", url)).await?;
            }
        }
        Ok(Some(Claim::by(self.name())))
    }
}
