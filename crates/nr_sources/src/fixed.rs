use async_trait::async_trait;
use nr_core::{Article, NewsQuery, NewsSource, Result};

/// Serves a fixed list of articles regardless of the query.
#[derive(Debug, Clone)]
pub struct StaticNewsSource {
    name: String,
    articles: Vec<Article>,
}

impl StaticNewsSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            name: "static".to_string(),
            articles,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[async_trait]
impl NewsSource for StaticNewsSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_articles(&self, request: &NewsQuery) -> Result<Vec<Article>> {
        Ok(self.articles.iter().take(request.max_results).cloned().collect())
    }
}
