use std::fmt;

use async_trait::async_trait;
use nr_core::{InferenceModel, Result};

const SUMMARY_WORDS: usize = 40;

/// Offline stand-in that echoes the leading words of its input.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn summarize(&self, _query: &str, text: &str) -> Result<String> {
        let words: Vec<&str> = text.split_whitespace().take(SUMMARY_WORDS).collect();
        Ok(words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_model() {
        let model = DummyModel::new();

        let summary = model
            .summarize("results", "Title: Test Article\nDescription: It has multiple sentences.")
            .await
            .unwrap();
        assert_eq!(summary, "Title: Test Article Description: It has multiple sentences.");

        let long = "word ".repeat(100);
        let summary = model.summarize("results", &long).await.unwrap();
        assert_eq!(summary.split_whitespace().count(), SUMMARY_WORDS);
    }
}
