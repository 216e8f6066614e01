use std::path::PathBuf;
use std::sync::Arc;

use nr_core::{Error, HistoryStorage, Result};

pub mod backends;

pub use backends::*;

pub const DEFAULT_HISTORY_FILE: &str = "query_history.csv";

/// Builds a history backend by name. `path` only applies to the `csv` backend.
pub fn create_storage(kind: &str, path: Option<PathBuf>) -> Result<Arc<dyn HistoryStorage>> {
    match kind.to_lowercase().as_str() {
        "csv" => {
            let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE));
            tracing::info!("🗄️ Query history stored in {}", path.display());
            Ok(Arc::new(CsvHistory::new(path)))
        }
        "memory" => {
            tracing::info!("🗄️ Query history kept in memory");
            Ok(Arc::new(InMemoryHistory::new()))
        }
        other => Err(Error::Config(format!(
            "Unknown storage '{}'. Available storages: csv, memory",
            other
        ))),
    }
}
