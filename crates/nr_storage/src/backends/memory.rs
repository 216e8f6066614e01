use async_trait::async_trait;
use nr_core::{HistoryRecord, HistoryStorage, Result};
use tokio::sync::RwLock;

/// Process-local history, lost on exit.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    records: RwLock<Vec<HistoryRecord>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStorage for InMemoryHistory {
    async fn append(&self, record: &HistoryRecord) -> Result<()> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<HistoryRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn clear(&self) -> Result<()> {
        self.records.write().await.clear();
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }
}
