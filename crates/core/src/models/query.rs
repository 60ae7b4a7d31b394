use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Sort order for transaction listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateOrder {
    /// Newest date first (default for display)
    #[default]
    Desc,
    /// Oldest date first
    Asc,
}

/// Filters understood by the store. Everything is ANDed; ranges are inclusive.
///
/// Description bounds compare byte-wise, which is how document stores order
/// string keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionQuery {
    pub date_eq: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub description_from: Option<String>,
    pub description_to: Option<String>,
    pub order: DateOrder,
    pub limit: Option<u32>,
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_day(mut self, date: NaiveDate) -> Self {
        self.date_eq = Some(date);
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    pub fn description_between(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.description_from = Some(from.into());
        self.description_to = Some(to.into());
        self
    }

    pub fn ordered(mut self, order: DateOrder) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a record with this date and description passes the filters
    /// (order and limit are applied by the store afterwards).
    pub fn matches(&self, date: NaiveDate, description: &str) -> bool {
        if self.date_eq.is_some_and(|d| d != date) {
            return false;
        }
        if self.date_from.is_some_and(|d| date < d) {
            return false;
        }
        if self.date_to.is_some_and(|d| date > d) {
            return false;
        }
        if let Some(from) = &self.description_from {
            if description < from.as_str() {
                return false;
            }
        }
        if let Some(to) = &self.description_to {
            if description > to.as_str() {
                return false;
            }
        }
        true
    }
}

/// Calendar window used by listings and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    All,
    Year(i32),
    /// Year and month (1–12)
    Month(i32, u32),
    Day(NaiveDate),
}

impl Period {
    /// First and last day covered, or `None` for `All`.
    pub fn bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>, CoreError> {
        let invalid = || CoreError::Validation(format!("Invalid period: {self:?}"));
        match *self {
            Period::All => Ok(None),
            Period::Day(d) => Ok(Some((d, d))),
            Period::Year(y) => NaiveDate::from_ymd_opt(y, 1, 1)
                .zip(NaiveDate::from_ymd_opt(y, 12, 31))
                .map(Some)
                .ok_or_else(invalid),
            Period::Month(y, m) => {
                let first = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(invalid)?;
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .ok_or_else(invalid)?;
                Ok(Some((first, last)))
            }
        }
    }

    /// The period a date falls in, at month granularity.
    pub fn month_of(date: NaiveDate) -> Self {
        Period::Month(date.year(), date.month())
    }
}
