//! In-process record store.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{RecordSearch, RecordSink, Result, TransactionFilter};
use crate::models::transaction::{PersistedTransaction, TransactionRecord};

/// Record store held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<PersistedTransaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordSink for MemoryStore {
    async fn save(&self, records: Vec<TransactionRecord>, owner: i64) -> Result<Vec<PersistedTransaction>> {
        let mut stored = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let first_id = stored.last().map(|r| r.id + 1).unwrap_or(1);
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

        stored.extend(persisted.iter().cloned());
        Ok(persisted)
    }
}

#[async_trait]
impl RecordSearch for MemoryStore {
    async fn search(&self, filter: &TransactionFilter) -> Result<Vec<PersistedTransaction>> {
        let stored = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(stored
            .iter()
            .filter(|p| filter.matches(&p.record))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(document_number: &str) -> TransactionRecord {
        TransactionRecord {
            document_number: Some(document_number.to_string()),
            original_text: format!("Document No. : {}", document_number),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_assigns_ascending_ids() {
        let store = MemoryStore::new();

        let first = store.save(vec![record("1/2019"), record("2/2019")], 7).await.unwrap();
        let second = store.save(vec![record("3/2019")], 8).await.unwrap();

        assert_eq!(first.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(second[0].id, 3);
        assert_eq!(first[0].created_by, 7);
        assert_eq!(second[0].created_by, 8);
        assert_eq!(first[1].record, record("2/2019"));
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_save_empty_batch() {
        let store = MemoryStore::new();
        assert!(store.save(Vec::new(), 1).await.unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_search() {
        let store = MemoryStore::new();
        store.save(vec![record("1/2019"), record("2/2019")], 1).await.unwrap();

        let found = store
            .search(&TransactionFilter::new().with_document_number("2/2019"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);

        let all = store.search(&TransactionFilter::new()).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
