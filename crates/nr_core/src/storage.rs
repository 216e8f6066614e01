use async_trait::async_trait;
use crate::types::HistoryRecord;
use crate::Result;

#[async_trait]
pub trait HistoryStorage: Send + Sync {
    /// Add one record to the end of the table
    async fn append(&self, record: &HistoryRecord) -> Result<()>;

    /// All records in append order. A table that was never written is empty.
    async fn load_all(&self) -> Result<Vec<HistoryRecord>>;

    /// Truncate the table
    async fn clear(&self) -> Result<()>;

    /// Records whose query contains `keyword`, ignoring case
    async fn filter(&self, keyword: &str) -> Result<Vec<HistoryRecord>> {
        let records = self.load_all().await?;
        Ok(records.into_iter().filter(|r| r.matches_keyword(keyword)).collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.load_all().await?.len())
    }

    /// The last `n` records matching `keyword`, oldest first
    async fn recent_matching(&self, keyword: &str, n: usize) -> Result<Vec<HistoryRecord>> {
        let mut records = self.filter(keyword).await?;
        let skip = records.len().saturating_sub(n);
        Ok(records.split_off(skip))
    }

    /// The last `n` records, oldest first
    async fn recent(&self, n: usize) -> Result<Vec<HistoryRecord>> {
        self.recent_matching("", n).await
    }
}
