use chrono::Datelike;
use std::collections::HashMap;

use crate::models::analytics::{CategoryTotal, MonthTotals, MonthlySummary};
use crate::models::category::Category;
use crate::models::transaction::{Transaction, TransactionType};

/// Label used for transactions whose category has been deleted.
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";
/// Colour used for the unknown-category slice.
pub const UNKNOWN_CATEGORY_COLOR: &str = "#A9A9A9";

/// Derived aggregate views over already-fetched transactions.
///
/// Pure computation, no I/O. Callers pick the window (month, year) when they
/// query the store.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Income, expenses and balance over the given transactions.
    pub fn monthly_summary(&self, transactions: &[Transaction]) -> MonthlySummary {
        let mut summary = MonthlySummary::default();
        for t in transactions {
            match t.transaction_type {
                TransactionType::Income => summary.income += t.value,
                TransactionType::Expense => summary.expenses += t.value,
            }
        }
        summary.balance = summary.income - summary.expenses;
        summary.count = transactions.len();
        summary
    }

    /// Twelve zero-filled months, January first. Transactions outside `year`
    /// are ignored.
    pub fn annual_summary(&self, year: i32, transactions: &[Transaction]) -> Vec<MonthTotals> {
        let mut months: Vec<MonthTotals> = (1..=12)
            .map(|month| MonthTotals {
                month,
                income: 0.0,
                expenses: 0.0,
                balance: 0.0,
            })
            .collect();

        for t in transactions.iter().filter(|t| t.date.year() == year) {
            let slot = &mut months[t.date.month0() as usize];
            match t.transaction_type {
                TransactionType::Income => slot.income += t.value,
                TransactionType::Expense => slot.expenses += t.value,
            }
        }
        for m in &mut months {
            m.balance = m.income - m.expenses;
        }
        months
    }

    /// Totals per category for one transaction type, largest first.
    ///
    /// Transactions pointing at a category that no longer exists are pooled
    /// into a single unknown entry instead of being dropped.
    pub fn category_breakdown(
        &self,
        transactions: &[Transaction],
        categories: &[Category],
        transaction_type: TransactionType,
    ) -> Vec<CategoryTotal> {
        let by_id: HashMap<String, &Category> = categories
            .iter()
            .map(|c| (c.id.to_string(), c))
            .collect();

        let mut totals: HashMap<Option<String>, f64> = HashMap::new();
        for t in transactions
            .iter()
            .filter(|t| t.transaction_type == transaction_type)
        {
            let key = by_id
                .contains_key(&t.category_id)
                .then(|| t.category_id.clone());
            *totals.entry(key).or_insert(0.0) += t.value;
        }

        let grand_total: f64 = totals.values().sum();
        let mut breakdown: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category_id, total)| {
                let (name, color) = match category_id.as_deref().and_then(|id| by_id.get(id)) {
                    Some(c) => (c.name.clone(), c.color.clone()),
                    None => (
                        UNKNOWN_CATEGORY_NAME.to_string(),
                        UNKNOWN_CATEGORY_COLOR.to_string(),
                    ),
                };
                let percentage = if grand_total > 0.0 {
                    total / grand_total * 100.0
                } else {
                    0.0
                };
                CategoryTotal {
                    category_id,
                    name,
                    color,
                    total,
                    percentage,
                }
            })
            .collect();

        breakdown.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        breakdown
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
