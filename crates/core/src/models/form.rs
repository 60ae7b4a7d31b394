use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::series::SeriesKind;
use super::transaction::{TransactionDraft, TransactionType};

/// What the add/edit transaction form submits.
///
/// `installments` / `fixed_income_months` only matter when their flag is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    pub description: String,
    /// Per record: an installment value or a monthly income, never a total.
    pub value: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category_id: String,
    /// Date of the single record, or of the first record of a series
    pub date: NaiveDate,
    #[serde(default)]
    pub is_installment: bool,
    #[serde(default)]
    pub installments: Option<u32>,
    #[serde(default)]
    pub is_fixed_income: bool,
    #[serde(default)]
    pub fixed_income_months: Option<u32>,
}

impl TransactionForm {
    /// A plain one-off transaction.
    pub fn single(
        description: impl Into<String>,
        value: f64,
        transaction_type: TransactionType,
        category_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            value,
            transaction_type,
            category_id: category_id.into(),
            date,
            is_installment: false,
            installments: None,
            is_fixed_income: false,
            fixed_income_months: None,
        }
    }

    /// Turn this one-off into an installment purchase of `count` records.
    pub fn with_installments(mut self, count: u32) -> Self {
        self.is_installment = true;
        self.installments = Some(count);
        self
    }

    /// Turn this one-off into a fixed monthly income repeated `months` times.
    pub fn with_fixed_income(mut self, months: u32) -> Self {
        self.is_fixed_income = true;
        self.fixed_income_months = Some(months);
        self
    }

    /// The record this form describes, ignoring any series flags.
    pub fn base_draft(&self) -> TransactionDraft {
        TransactionDraft {
            description: self.description.trim().to_string(),
            value: self.value,
            transaction_type: self.transaction_type,
            category_id: self.category_id.clone(),
            date: self.date,
        }
    }
}

/// The write a validated form resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesPlan {
    Single,
    Series { kind: SeriesKind, count: u32 },
}

impl SeriesPlan {
    /// Number of records the plan will write.
    pub fn record_count(&self) -> u32 {
        match self {
            SeriesPlan::Single => 1,
            SeriesPlan::Series { count, .. } => *count,
        }
    }
}
