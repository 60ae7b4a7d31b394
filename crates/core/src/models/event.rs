use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Published after a write has been committed by the store.
///
/// Views holding cached aggregates (summaries, charts) subscribe to these
/// and re-query when one concerns their user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeEvent {
    /// One or more transactions were created (a whole series counts as one event)
    TransactionsAdded { user_id: String, ids: Vec<Uuid> },
    TransactionUpdated { user_id: String, id: Uuid },
    TransactionsDeleted { user_id: String, ids: Vec<Uuid> },
    /// Any category create/update/delete
    CategoriesChanged { user_id: String },
}

impl ChangeEvent {
    pub fn user_id(&self) -> &str {
        match self {
            ChangeEvent::TransactionsAdded { user_id, .. }
            | ChangeEvent::TransactionUpdated { user_id, .. }
            | ChangeEvent::TransactionsDeleted { user_id, .. }
            | ChangeEvent::CategoriesChanged { user_id } => user_id,
        }
    }
}
