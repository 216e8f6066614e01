use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use nr_core::{Error, HistoryRecord, HistoryStorage, Result};
use tokio::sync::Mutex;
use tracing::debug;

/// Headerless three-column CSV table: query, summary, time (RFC 3339).
///
/// Rows are only ever appended; clearing truncates the file to zero bytes.
/// The in-process mutex orders this handle's own operations; separate
/// processes writing the same file are not coordinated.
#[derive(Debug)]
pub struct CsvHistory {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Path) -> Result<T> + Send + 'static,
    {
        let _guard = self.lock.lock().await;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || op(&path))
            .await
            .map_err(|e| Error::Storage(format!("History task failed: {}", e)))?
    }
}

fn csv_error(e: csv::Error) -> Error {
    Error::Storage(format!("Malformed history table: {}", e))
}

fn append_record(path: &Path, record: &HistoryRecord) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer.serialize(record).map_err(csv_error)?;
    writer.flush()?;
    Ok(())
}

fn read_records(path: &Path) -> Result<Vec<HistoryRecord>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let mut reader = csv::ReaderBuilder::new().has_headers(false).from_reader(file);
    reader
        .deserialize()
        .map(|row| row.map_err(csv_error))
        .collect()
}

#[async_trait]
impl HistoryStorage for CsvHistory {
    async fn append(&self, record: &HistoryRecord) -> Result<()> {
        let record = record.clone();
        self.blocking(move |path| append_record(path, &record)).await?;
        debug!("💾 Appended history record to {}", self.path.display());
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<HistoryRecord>> {
        self.blocking(read_records).await
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|path| {
            File::create(path)?;
            Ok(())
        })
        .await?;
        debug!("🧹 Cleared history table {}", self.path.display());
        Ok(())
    }
}
