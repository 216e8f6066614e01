use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Please enter a query")]
    EmptyQuery,

    #[error("No articles found for that query")]
    NoArticles,

    #[error("News source error: {0}")]
    Source(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Task error: {0}")]
    Task(String),
}

impl Error {
    /// True for failures raised by the news source or the summarizer.
    pub fn is_provider(&self) -> bool {
        matches!(self, Error::Source(_) | Error::Inference(_) | Error::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
