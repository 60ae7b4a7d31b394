use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::category::{Category, NewCategory};
use crate::models::query::TransactionQuery;
use crate::models::transaction::{Transaction, TransactionDraft};

/// Trait abstraction over the remote document store (Dependency Inversion).
///
/// Every call is scoped by `user_id`. Batch operations are atomic: either
/// every record is written/removed or the store is left untouched and an
/// error is returned. Implementations report failures as
/// `CoreError::Persistence` (or a not-found variant for single-record calls).
#[async_trait]
pub trait Store: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Write all drafts in one batch. Returns the assigned ids in draft order.
    async fn insert_transactions(
        &self,
        user_id: &str,
        drafts: &[TransactionDraft],
    ) -> Result<Vec<Uuid>, CoreError>;

    async fn get_transaction(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<Transaction>, CoreError>;

    async fn query_transactions(
        &self,
        user_id: &str,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, CoreError>;

    async fn count_transactions(&self, user_id: &str) -> Result<usize, CoreError>;

    /// Replace every field of one record except its id and owner.
    async fn update_transaction(
        &self,
        user_id: &str,
        id: Uuid,
        draft: &TransactionDraft,
    ) -> Result<(), CoreError>;

    /// Remove all ids in one batch. Ids the user does not own, or that are
    /// already gone, are skipped. Returns the number actually removed.
    async fn delete_transactions(&self, user_id: &str, ids: &[Uuid]) -> Result<usize, CoreError>;

    /// Write all categories in one batch.
    async fn insert_categories(
        &self,
        user_id: &str,
        categories: &[NewCategory],
    ) -> Result<Vec<Category>, CoreError>;

    /// All categories of the user, ordered by name.
    async fn list_categories(&self, user_id: &str) -> Result<Vec<Category>, CoreError>;

    async fn update_category(
        &self,
        user_id: &str,
        id: Uuid,
        category: &NewCategory,
    ) -> Result<(), CoreError>;

    /// Does not touch transactions referencing the category.
    async fn delete_category(&self, user_id: &str, id: Uuid) -> Result<(), CoreError>;
}
