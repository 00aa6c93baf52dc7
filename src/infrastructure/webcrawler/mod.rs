//! Page title fetching for the URL title command

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use reqwest::Client;

use crate::application::errors::BotError;
use crate::domain::traits::{FetchError, TitleFetcher};

static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<title[^>]*>(.*?)</title\s*>").expect("title pattern is valid")
});

/// Fetches titles over HTTP.
///
/// No timeout is set: a server that never answers stalls the caller.
pub struct HttpTitleFetcher {
    client: Client,
}

impl HttpTitleFetcher {
    pub fn new() -> Result<Self, BotError> {
        let client = Client::builder()
            .user_agent(concat!("irc-helper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BotError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl TitleFetcher for HttpTitleFetcher {
    async fn fetch_title(&self, url: &str) -> Result<Option<String>, FetchError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| match e.status() {
                Some(status) => FetchError::Status(status.as_u16()),
                None => FetchError::Transport(e.to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(extract_title(&html))
    }
}

/// Text of the first `<title>` element, whitespace collapsed
pub fn extract_title(html: &str) -> Option<String> {
    let raw = TITLE_RE.captures(html)?.get(1)?.as_str();
    let title = decode_entities(&raw.split_whitespace().collect::<Vec<_>>().join(" "));
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Decode the handful of entities that show up in titles
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        let html = "<html><head><TITLE lang=\"en\">\n  Rust &amp; IRC\n  bots </TITLE></head></html>";
        assert_eq!(extract_title(html).as_deref(), Some("Rust & IRC bots"));
    }

    #[test]
    fn test_missing_or_empty_title() {
        assert_eq!(extract_title("<html><body>Hello</body></html>"), None);
        assert_eq!(extract_title("<title>   </title>"), None);
    }
}
