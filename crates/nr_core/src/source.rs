use async_trait::async_trait;
use crate::types::{Article, NewsQuery};
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the name of the news provider
    fn name(&self) -> &str;

    /// Fetch up to `request.max_results` articles, in provider order.
    /// Titles are not guaranteed to be unique.
    async fn fetch_articles(&self, request: &NewsQuery) -> Result<Vec<Article>>;
}
