use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::category::{Category, NewCategory};
use crate::models::query::{DateOrder, TransactionQuery};
use crate::models::transaction::{Transaction, TransactionDraft};

use super::traits::Store;

/// Records owned by one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecords {
    pub transactions: BTreeMap<Uuid, Transaction>,
    pub categories: BTreeMap<Uuid, Category>,
}

/// Everything a `MemoryStore` holds. This is what snapshots serialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreContents {
    pub users: BTreeMap<String, UserRecords>,
}

/// In-process document store.
///
/// Each batch is applied under a single write lock after every record has been
/// checked, so a failed batch leaves nothing behind.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<StoreContents>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contents(contents: StoreContents) -> Self {
        Self {
            data: RwLock::new(contents),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Copy of the current contents.
    pub async fn snapshot(&self) -> StoreContents {
        self.data.read().await.clone()
    }

    /// Make every subsequent write fail with `CoreError::Persistence`
    /// (reads keep working). Used to exercise failure paths.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), CoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::Persistence(
                "memory store rejected the write".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert_transactions(
        &self,
        user_id: &str,
        drafts: &[TransactionDraft],
    ) -> Result<Vec<Uuid>, CoreError> {
        self.check_writable()?;
        let mut data = self.data.write().await;
        let records = data.users.entry(user_id.to_string()).or_default();

        let mut ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = Uuid::new_v4();
            records
                .transactions
                .insert(id, Transaction::from_draft(id, user_id, draft.clone()));
            ids.push(id);
        }
        Ok(ids)
    }

    async fn get_transaction(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<Transaction>, CoreError> {
        let data = self.data.read().await;
        Ok(data
            .users
            .get(user_id)
            .and_then(|r| r.transactions.get(&id))
            .cloned())
    }

    async fn query_transactions(
        &self,
        user_id: &str,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, CoreError> {
        let data = self.data.read().await;
        let Some(records) = data.users.get(user_id) else {
            return Ok(Vec::new());
        };

        let mut found: Vec<Transaction> = records
            .transactions
            .values()
            .filter(|t| query.matches(t.date, &t.description))
            .cloned()
            .collect();

        match query.order {
            DateOrder::Desc => found.sort_by(|a, b| {
                b.date
                    .cmp(&a.date)
                    .then_with(|| a.description.cmp(&b.description))
            }),
            DateOrder::Asc => found.sort_by(|a, b| {
                a.date
                    .cmp(&b.date)
                    .then_with(|| a.description.cmp(&b.description))
            }),
        }

        if let Some(limit) = query.limit {
            found.truncate(limit as usize);
        }
        Ok(found)
    }

    async fn count_transactions(&self, user_id: &str) -> Result<usize, CoreError> {
        let data = self.data.read().await;
        Ok(data
            .users
            .get(user_id)
            .map_or(0, |r| r.transactions.len()))
    }

    async fn update_transaction(
        &self,
        user_id: &str,
        id: Uuid,
        draft: &TransactionDraft,
    ) -> Result<(), CoreError> {
        self.check_writable()?;
        let mut data = self.data.write().await;
        let existing = data
            .users
            .get_mut(user_id)
            .and_then(|r| r.transactions.get_mut(&id))
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;
        *existing = Transaction::from_draft(id, user_id, draft.clone());
        Ok(())
    }

    async fn delete_transactions(&self, user_id: &str, ids: &[Uuid]) -> Result<usize, CoreError> {
        self.check_writable()?;
        let unique: BTreeSet<Uuid> = ids.iter().copied().collect();
        if unique.is_empty() {
            return Ok(0);
        }

        let mut data = self.data.write().await;
        let Some(records) = data.users.get_mut(user_id) else {
            return Ok(0);
        };
        // Ids that are already gone are skipped.
        let mut removed = 0;
        for id in &unique {
            if records.transactions.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn insert_categories(
        &self,
        user_id: &str,
        categories: &[NewCategory],
    ) -> Result<Vec<Category>, CoreError> {
        self.check_writable()?;
        let mut data = self.data.write().await;
        let records = data.users.entry(user_id.to_string()).or_default();

        let mut created = Vec::with_capacity(categories.len());
        for new in categories {
            let category = Category {
                id: Uuid::new_v4(),
                user_id: user_id.to_string(),
                name: new.name.clone(),
                color: new.color.clone(),
            };
            records.categories.insert(category.id, category.clone());
            created.push(category);
        }
        Ok(created)
    }

    async fn list_categories(&self, user_id: &str) -> Result<Vec<Category>, CoreError> {
        let data = self.data.read().await;
        let mut categories: Vec<Category> = data
            .users
            .get(user_id)
            .map(|r| r.categories.values().cloned().collect())
            .unwrap_or_default();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn update_category(
        &self,
        user_id: &str,
        id: Uuid,
        category: &NewCategory,
    ) -> Result<(), CoreError> {
        self.check_writable()?;
        let mut data = self.data.write().await;
        let existing = data
            .users
            .get_mut(user_id)
            .and_then(|r| r.categories.get_mut(&id))
            .ok_or_else(|| CoreError::CategoryNotFound(id.to_string()))?;
        existing.name = category.name.clone();
        existing.color = category.color.clone();
        Ok(())
    }

    async fn delete_category(&self, user_id: &str, id: Uuid) -> Result<(), CoreError> {
        self.check_writable()?;
        let mut data = self.data.write().await;
        data.users
            .get_mut(user_id)
            .and_then(|r| r.categories.remove(&id))
            .map(|_| ())
            .ok_or_else(|| CoreError::CategoryNotFound(id.to_string()))
    }
}
