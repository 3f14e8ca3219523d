//! JSON-lines record store.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use super::{RecordSearch, RecordSink, Result, TransactionFilter};
use crate::error::StoreError;
use crate::models::transaction::{PersistedTransaction, TransactionRecord};

/// Record store appending one JSON document per line to a file.
///
/// Ids continue from the highest id already in the file. File access runs
/// on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored record. A missing file holds no records.
    pub fn load_all(&self) -> Result<Vec<PersistedTransaction>> {
        read_records(&self.path)
    }

    async fn blocking<T, F>(&self, task: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(JsonFileStore) -> Result<T> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || task(store))
            .await
            .map_err(|e| StoreError::Io(std::io::Error::other(e)))?
    }

    fn append(&self, records: Vec<TransactionRecord>, owner: i64) -> Result<Vec<PersistedTransaction>> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let first_id = read_records(&self.path)?
            .iter()
            .map(|p| p.id)
            .max()
            .map(|id| id + 1)
            .unwrap_or(1);
        let created_at = Utc::now();

        let persisted: Vec<PersistedTransaction> = records
            .into_iter()
            .enumerate()
            .map(|(offset, record)| PersistedTransaction {
                id: first_id + offset as u64,
                record,
                created_at,
                created_by: owner,
            })
            .collect();

        if persisted.is_empty() {
            return Ok(persisted);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = BufWriter::new(file);
        for transaction in &persisted {
            serde_json::to_writer(&mut writer, transaction)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        info!(
            "Saved {} transactions (ids {}..={}) to {}",
            persisted.len(),
            first_id,
            first_id + persisted.len() as u64 - 1,
            self.path.display()
        );

        Ok(persisted)
    }
}

fn read_records(path: &Path) -> Result<Vec<PersistedTransaction>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| StoreError::Corrupt {
                line: i + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}

#[async_trait]
impl RecordSink for JsonFileStore {
    async fn save(&self, records: Vec<TransactionRecord>, owner: i64) -> Result<Vec<PersistedTransaction>> {
        self.blocking(move |store| store.append(records, owner)).await
    }
}

#[async_trait]
impl RecordSearch for JsonFileStore {
    async fn search(&self, filter: &TransactionFilter) -> Result<Vec<PersistedTransaction>> {
        let filter = filter.clone();
        self.blocking(move |store| {
            let all = store.load_all()?;
            debug!("Searching {} stored transactions", all.len());
            Ok(all.into_iter().filter(|p| filter.matches(&p.record)).collect())
        })
        .await
    }
}
