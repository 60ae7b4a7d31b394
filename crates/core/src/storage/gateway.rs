use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::transaction::TransactionDraft;

use super::traits::Store;

/// The only path by which generated or selected transactions reach the store.
///
/// Every call maps to exactly one atomic store batch, so callers never observe
/// a half-written series or a half-deleted one. Failures are logged and
/// returned unchanged; there are no retries here.
#[derive(Clone)]
pub struct BatchGateway {
    store: Arc<dyn Store>,
}

impl std::fmt::Debug for BatchGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchGateway")
            .field("store", &self.store.name())
            .finish()
    }
}

impl BatchGateway {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Write a whole series (or a single record) as one batch.
    /// Returns store-assigned ids in draft order.
    pub async fn write_batch(
        &self,
        user_id: &str,
        drafts: &[TransactionDraft],
    ) -> Result<Vec<Uuid>, CoreError> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }
        debug!(user_id, records = drafts.len(), store = self.store.name(), "writing batch");
        self.store
            .insert_transactions(user_id, drafts)
            .await
            .inspect_err(|e| warn!(user_id, records = drafts.len(), error = %e, "batch write failed"))
    }

    /// Remove every id as one batch.
    pub async fn delete_batch(&self, user_id: &str, ids: &[Uuid]) -> Result<usize, CoreError> {
        if ids.is_empty() {
            return Ok(0);
        }
        debug!(user_id, records = ids.len(), store = self.store.name(), "deleting batch");
        self.store
            .delete_transactions(user_id, ids)
            .await
            .inspect_err(|e| warn!(user_id, records = ids.len(), error = %e, "batch delete failed"))
    }
}
