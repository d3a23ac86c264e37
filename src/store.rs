use crate::models::Receipt;
use moka::future::Cache;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory, write-once receipt storage.
///
/// Backed by an unbounded moka cache with no TTL, so entries live until the
/// process exits. Receipts are never updated or removed. Cloning the store
/// shares the same underlying map.
#[derive(Clone)]
pub struct ReceiptStore {
    receipts: Cache<String, Arc<Receipt>>,
}

impl ReceiptStore {
    pub fn new() -> Self {
        Self {
            receipts: Cache::builder().build(),
        }
    }

    /// Stores a receipt under a freshly generated UUID v4 and returns the id.
    pub async fn put(&self, receipt: Receipt) -> String {
        let id = Uuid::new_v4().to_string();
        self.receipts.insert(id.clone(), Arc::new(receipt)).await;
        tracing::debug!("Stored receipt {}", id);
        id
    }

    /// Looks up a receipt by id.
    pub async fn get(&self, id: &str) -> Option<Arc<Receipt>> {
        self.receipts.get(id).await
    }

    /// Number of stored receipts.
    pub async fn len(&self) -> u64 {
        // entry_count lags behind inserts until pending maintenance runs
        self.receipts.run_pending_tasks().await;
        self.receipts.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ReceiptStore {
    fn default() -> Self {
        Self::new()
    }
}
