pub mod dedup;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod source;
pub mod storage;
pub mod types;

pub use dedup::dedup_articles;
pub use error::{Error, Result};
pub use models::InferenceModel;
pub use pipeline::ResearchPipeline;
pub use source::NewsSource;
pub use storage::HistoryStorage;
pub use types::{Article, ArticleSummary, HistoryRecord, NewsQuery, ResearchReport, Sentiment, Stage};
