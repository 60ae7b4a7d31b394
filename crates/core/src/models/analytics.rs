use serde::{Deserialize, Serialize};

/// Totals for one month (or any other window the caller filtered to).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub income: f64,
    pub expenses: f64,
    /// income - expenses
    pub balance: f64,
    /// Number of transactions that went into the totals
    pub count: usize,
}

/// One bar of the annual overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotals {
    /// 1–12
    pub month: u32,
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

/// One slice of the per-category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// `None` when the transactions point at a category that no longer exists
    pub category_id: Option<String>,
    pub name: String,
    pub color: String,
    pub total: f64,
    /// Share of the breakdown total, 0–100
    pub percentage: f64,
}
