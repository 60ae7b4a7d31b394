use chrono::{Months, NaiveDate};

use crate::errors::CoreError;
use crate::models::series::SeriesKind;
use crate::models::transaction::TransactionDraft;

use super::series_encoder;

/// Expands one base transaction into a monthly series of drafts.
///
/// Pure business logic, no I/O. Record `k` (1-based) is dated `k - 1` calendar
/// months after the start, keeping the day of month and clamping to the last
/// day of shorter months (Jan 31 → Feb 29 → Mar 31 in a leap year). Each month
/// is computed from the start date, not from the previous record, so one
/// clamped month does not drag the rest of the series to an earlier day.
///
/// The value is copied to every record as given; it is never divided by `n`.
pub struct SeriesGenerator;

impl SeriesGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate `count` drafts for `base`. `count` must be at least 2; the
    /// upper guard is enforced by the caller's settings.
    pub fn generate(
        &self,
        kind: SeriesKind,
        base: &TransactionDraft,
        count: u32,
    ) -> Result<Vec<TransactionDraft>, CoreError> {
        if count < 2 {
            return Err(CoreError::Validation(format!(
                "A {kind} series needs at least 2 records, got {count}"
            )));
        }

        (1..=count)
            .map(|position| {
                let date = Self::month_offset(base.date, position - 1)?;
                Ok(TransactionDraft {
                    description: series_encoder::tag(kind, &base.description, position, count),
                    value: base.value,
                    transaction_type: base.transaction_type,
                    category_id: base.category_id.clone(),
                    date,
                })
            })
            .collect()
    }

    /// `start` advanced by `months` whole calendar months.
    pub fn month_offset(start: NaiveDate, months: u32) -> Result<NaiveDate, CoreError> {
        start.checked_add_months(Months::new(months)).ok_or_else(|| {
            CoreError::Validation(format!(
                "Date {start} plus {months} months is outside the supported calendar range"
            ))
        })
    }
}

impl Default for SeriesGenerator {
    fn default() -> Self {
        Self::new()
    }
}
