//! Record sinks: persistence for assembled transaction records.

mod file;
mod filter;
mod memory;

pub use file::JsonFileStore;
pub use filter::TransactionFilter;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::transaction::{PersistedTransaction, TransactionRecord};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Accepts assembled records and gives them identity.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Persist records for `owner`, returning them with ids and timestamps
    /// in the order given.
    async fn save(&self, records: Vec<TransactionRecord>, owner: i64) -> Result<Vec<PersistedTransaction>>;
}

/// Looks up persisted records.
#[async_trait]
pub trait RecordSearch: Send + Sync {
    /// Records matching every criterion of `filter`, in id order.
    async fn search(&self, filter: &TransactionFilter) -> Result<Vec<PersistedTransaction>>;
}
