//! News search through the Google News RSS endpoint.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use nr_core::{Article, Error, NewsQuery, NewsSource, Result};

use crate::html;

pub const DEFAULT_BASE_URL: &str = "https://news.google.com/rss/search";

#[derive(Debug, Clone)]
pub struct GoogleNewsSource {
    client: Client,
    base_url: String,
}

impl GoogleNewsSource {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("Mozilla/5.0 (compatible; newsroom/0.1)")
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into(),
        }
    }

    /// Search URL for a request: `q`, `hl`, `gl` and `ceid` parameters.
    pub fn search_url(&self, request: &NewsQuery) -> Result<Url> {
        let ceid = format!("{}:{}", request.country, request.language);
        Url::parse_with_params(
            &self.base_url,
            &[
                ("q", request.query.as_str()),
                ("hl", request.language.as_str()),
                ("gl", request.country.as_str()),
                ("ceid", ceid.as_str()),
            ],
        )
        .map_err(|e| Error::Config(format!("Invalid news base URL {}: {}", self.base_url, e)))
    }
}

impl Default for GoogleNewsSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns the items of an RSS channel into articles, keeping feed order.
pub fn parse_channel(channel: &rss::Channel, limit: usize) -> Vec<Article> {
    channel
        .items()
        .iter()
        .take(limit)
        .map(|item| Article {
            title: html::collapse_whitespace(item.title().unwrap_or_default()),
            description: item.description().map(html::to_plain_text).unwrap_or_default(),
            url: item.link().unwrap_or_default().to_string(),
        })
        .collect()
}

#[async_trait]
impl NewsSource for GoogleNewsSource {
    fn name(&self) -> &str {
        "Google News"
    }

    async fn fetch_articles(&self, request: &NewsQuery) -> Result<Vec<Article>> {
        let url = self.search_url(request)?;
        debug!("Fetching Google News RSS: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Source(format!("Google News request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Source(format!(
                "Google News returned status {}",
                response.status()
            )));
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| Error::Source(format!("Failed to read Google News response: {}", e)))?;

        let channel = rss::Channel::read_from(&content[..])
            .map_err(|e| Error::Source(format!("Failed to parse Google News RSS: {}", e)))?;

        let articles = parse_channel(&channel, request.max_results);
        info!("📰 Google News returned {} articles for '{}'", articles.len(), request.query);
        Ok(articles)
    }
}
