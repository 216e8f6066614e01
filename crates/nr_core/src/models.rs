use std::fmt;

use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait InferenceModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Summarize `text` in the context of the user's `query`.
    ///
    /// Length limits are only requested in the prompt, so callers must not
    /// assume any bound on the returned string.
    async fn summarize(&self, query: &str, text: &str) -> Result<String>;
}
