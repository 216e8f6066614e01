use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::dedup::dedup_articles;
use crate::models::InferenceModel;
use crate::source::NewsSource;
use crate::storage::HistoryStorage;
use crate::types::{ArticleSummary, HistoryRecord, NewsQuery, ResearchReport, Stage};
use crate::{Error, Result};

/// Fetch, deduplicate, summarize each article, summarize the set, log the query.
///
/// Every collaborator call is awaited in turn: per-article summaries come back
/// in deduplicated article order and the overall call starts only after the
/// last of them has returned. Any failure aborts the run and nothing is logged.
pub struct ResearchPipeline {
    source: Arc<dyn NewsSource>,
    inference: Arc<dyn InferenceModel>,
    history: Arc<dyn HistoryStorage>,
}

impl ResearchPipeline {
    pub fn new(
        source: Arc<dyn NewsSource>,
        inference: Arc<dyn InferenceModel>,
        history: Arc<dyn HistoryStorage>,
    ) -> Self {
        Self {
            source,
            inference,
            history,
        }
    }

    pub fn history(&self) -> Arc<dyn HistoryStorage> {
        self.history.clone()
    }

    pub async fn run(&self, request: &NewsQuery) -> Result<ResearchReport> {
        if request.is_blank() {
            warn!("⚠️ Refusing to run with an empty query");
            return Err(Error::EmptyQuery);
        }

        info!(stage = %Stage::Fetching, source = self.source.name(), "📰 Fetching articles for '{}'", request.query);
        let articles = self.source.fetch_articles(request).await?;
        if articles.is_empty() {
            info!("🫙 {} returned no articles", self.source.name());
            return Err(Error::NoArticles);
        }

        debug!(stage = %Stage::Deduplicating, fetched = articles.len());
        let articles = dedup_articles(articles);
        if articles.is_empty() {
            info!("🫙 No article with a usable title");
            return Err(Error::NoArticles);
        }
        info!("🧹 {} unique articles", articles.len());

        info!(stage = %Stage::SummarizingPerArticle, model = self.inference.name(), "🤖 Summarizing articles");
        let mut summaries = Vec::with_capacity(articles.len());
        for (i, article) in articles.iter().enumerate() {
            debug!("📝 Summarizing article {}/{}: {}", i + 1, articles.len(), article.title);
            let summary = self
                .inference
                .summarize(&request.query, &article.summary_input())
                .await?;
            summaries.push(ArticleSummary::from_article(article, summary));
        }

        info!(stage = %Stage::SummarizingOverall, "🧠 Summarizing {} summaries", summaries.len());
        let overall_summary = self
            .inference
            .summarize(&request.query, &join_summaries(&summaries))
            .await?;

        let record = HistoryRecord::new(request.query.clone(), overall_summary.clone());
        self.history.append(&record).await?;
        info!(stage = %Stage::Done, "✅ Research completed for '{}'", request.query);

        Ok(ResearchReport {
            query: request.query.clone(),
            articles,
            summaries,
            overall_summary,
        })
    }
}

/// Input of the aggregate summarizer call.
pub fn join_summaries(summaries: &[ArticleSummary]) -> String {
    summaries
        .iter()
        .map(|s| s.summary.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
