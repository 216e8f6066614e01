use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_RESULTS: usize = 5;
pub const MIN_RESULTS: usize = 3;
pub const MAX_RESULTS: usize = 20;
pub const DEFAULT_COUNTRY: &str = "IN";
pub const DEFAULT_LANGUAGE: &str = "en";

/// A raw news item as returned by a news source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
}

impl Article {
    pub fn new(title: impl Into<String>, description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
        }
    }

    /// Text handed to the summarizer for this article.
    pub fn summary_input(&self) -> String {
        format!("Title: {}\nDescription: {}", self.title, self.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Infers a label by case-insensitive substring search. "positive" is
    /// checked first, so a text mentioning both words is `Positive`.
    pub fn from_summary(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("positive") {
            Sentiment::Positive
        } else if text.contains("negative") {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub sentiment: Sentiment,
}

impl ArticleSummary {
    pub fn from_article(article: &Article, summary: String) -> Self {
        let sentiment = Sentiment::from_summary(&summary);
        Self {
            title: article.title.clone(),
            url: article.url.clone(),
            summary,
            sentiment,
        }
    }
}

/// One row of the query history table. Field order is the on-disk column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub query: String,
    pub summary: String,
    pub time: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(query: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            summary: summary.into(),
            time: Utc::now(),
        }
    }

    /// Case-insensitive substring match on the query field. An empty keyword matches everything.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        keyword.is_empty() || self.query.to_lowercase().contains(&keyword.to_lowercase())
    }
}

/// Parameters of a single research request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsQuery {
    pub query: String,
    pub max_results: usize,
    pub country: String,
    pub language: String,
}

impl NewsQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: DEFAULT_MAX_RESULTS,
            country: DEFAULT_COUNTRY.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.clamp(MIN_RESULTS, MAX_RESULTS);
        self
    }

    pub fn with_country(mut self, country: impl AsRef<str>) -> Self {
        self.country = country.as_ref().trim().to_uppercase();
        self
    }

    pub fn with_language(mut self, language: impl AsRef<str>) -> Self {
        self.language = language.as_ref().trim().to_lowercase();
        self
    }

    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }
}

/// The packaged result of a completed pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchReport {
    pub query: String,
    pub articles: Vec<Article>,
    pub summaries: Vec<ArticleSummary>,
    pub overall_summary: String,
}

impl ResearchReport {
    /// Sentiment of the overall summary, inferred at presentation time.
    pub fn overall_sentiment(&self) -> Sentiment {
        Sentiment::from_summary(&self.overall_summary)
    }
}

/// Stages of an active run, used as a log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Deduplicating,
    SummarizingPerArticle,
    SummarizingOverall,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching",
            Stage::Deduplicating => "deduplicating",
            Stage::SummarizingPerArticle => "summarizing-per-article",
            Stage::SummarizingOverall => "summarizing-overall",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_is_case_insensitive() {
        assert_eq!(Sentiment::from_summary("Outlook is POSITIVE this quarter"), Sentiment::Positive);
        assert_eq!(Sentiment::from_summary("Sentiment: negative"), Sentiment::Negative);
        assert_eq!(Sentiment::from_summary("Revenue was flat."), Sentiment::Neutral);
    }

    #[test]
    fn test_sentiment_positive_takes_precedence() {
        let text = "Negative margins, but a positive guidance update.";
        assert_eq!(Sentiment::from_summary(text), Sentiment::Positive);
    }

    #[test]
    fn test_sentiment_matches_substrings() {
        assert_eq!(Sentiment::from_summary("a non-positive reading"), Sentiment::Positive);
        assert_eq!(Sentiment::from_summary("SENTIMENT:NEGATIVE."), Sentiment::Negative);
    }

    #[test]
    fn test_summary_input_format() {
        let article = Article::new("Q3 results", "Revenue up 12%", "http://example.com/q3");
        assert_eq!(article.summary_input(), "Title: Q3 results\nDescription: Revenue up 12%");
    }

    #[test]
    fn test_news_query_normalizes_parameters() {
        let query = NewsQuery::new("chips")
            .with_max_results(50)
            .with_country(" us ")
            .with_language("EN");
        assert_eq!(query.max_results, MAX_RESULTS);
        assert_eq!(query.country, "US");
        assert_eq!(query.language, "en");

        assert_eq!(NewsQuery::new("chips").with_max_results(1).max_results, MIN_RESULTS);
        assert!(NewsQuery::new("   ").is_blank());
    }

    #[test]
    fn test_keyword_match() {
        let record = HistoryRecord::new("Tech company quarterly results", "Mixed.");
        assert!(record.matches_keyword("QUARTERLY"));
        assert!(record.matches_keyword(""));
        assert!(!record.matches_keyword("Mixed"));
    }
}
