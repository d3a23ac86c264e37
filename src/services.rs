use crate::config::Config;
use crate::errors::AppError;
use crate::models::Receipt;
use crate::scoring::{self, ScoringOptions};
use crate::store::ReceiptStore;

/// Receipt submission and points lookup.
#[derive(Clone)]
pub struct ReceiptService {
    store: ReceiptStore,
    options: ScoringOptions,
}

impl ReceiptService {
    pub fn new(config: &Config) -> Self {
        Self::with_store(ReceiptStore::new(), config.scoring_options())
    }

    pub fn with_store(store: ReceiptStore, options: ScoringOptions) -> Self {
        Self { store, options }
    }

    /// Decode a raw JSON body and store the receipt.
    ///
    /// # Returns
    ///
    /// * `Result<String, AppError>` - The generated receipt id, or `InvalidPayload`
    ///   if the body is not a receipt-shaped JSON object. A `null` body is an
    ///   empty receipt.
    pub async fn submit(&self, raw_payload: &[u8]) -> Result<String, AppError> {
        let receipt: Option<Receipt> = serde_json::from_slice(raw_payload)?;
        Ok(self.submit_receipt(receipt.unwrap_or_default()).await)
    }

    /// Store an already decoded receipt.
    pub async fn submit_receipt(&self, receipt: Receipt) -> String {
        let item_count = receipt.items.len();
        let id = self.store.put(receipt).await;
        tracing::info!("Processed receipt id={} items={}", id, item_count);
        id
    }

    /// Compute the points for a stored receipt. Scores are never cached.
    pub async fn get_points(&self, id: &str) -> Result<i64, AppError> {
        let receipt = self
            .store
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Receipt {} not found", id)))?;

        let breakdown = scoring::score(&receipt, self.options);
        tracing::debug!("Points breakdown for receipt id={}: {:?}", id, breakdown);

        Ok(breakdown.total())
    }
}
