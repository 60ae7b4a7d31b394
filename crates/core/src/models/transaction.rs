use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in (salary, refunds, ...)
    Income,
    /// Money going out
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// A stored transaction.
///
/// Series membership is not a field: it lives in the description suffix
/// (`"Notebook (2/3)"`, `"Salário (Mês 4/12)"`). See `services::series_identifier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Assigned by the store on creation
    pub id: Uuid,

    /// Owner. Every query is scoped by it.
    pub user_id: String,

    /// Free text, 1–100 characters, possibly carrying a series tag
    pub description: String,

    /// Positive amount in currency units
    pub value: f64,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// May dangle: categories are deleted without cascading.
    pub category_id: String,

    /// Calendar date, serialized as `yyyy-MM-dd`
    pub date: NaiveDate,
}

impl Transaction {
    /// Build a stored record from a draft once the store has assigned an id.
    pub fn from_draft(id: Uuid, user_id: impl Into<String>, draft: TransactionDraft) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            description: draft.description,
            value: draft.value,
            transaction_type: draft.transaction_type,
            category_id: draft.category_id,
            date: draft.date,
        }
    }

    /// The draft this record would be written from (everything but id and owner).
    pub fn to_draft(&self) -> TransactionDraft {
        TransactionDraft {
            description: self.description.clone(),
            value: self.value,
            transaction_type: self.transaction_type,
            category_id: self.category_id.clone(),
            date: self.date,
        }
    }
}

/// A transaction that has not been written yet (no id, no owner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub description: String,
    pub value: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category_id: String,
    pub date: NaiveDate,
}

/// How much of a series a delete request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteType {
    /// Only the selected record. Remaining `(k/n)` tags are left as they are.
    Single,
    /// The selected record and every later position of the same series.
    Future,
}
