use tracing::info;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::event::ChangeEvent;
use crate::models::form::{SeriesPlan, TransactionForm};
use crate::models::query::{Period, TransactionQuery};
use crate::models::series::SeriesKind;
use crate::models::settings::Settings;
use crate::models::transaction::{DeleteType, Transaction, TransactionDraft};
use crate::storage::gateway::BatchGateway;

use super::deletion_resolver::SeriesDeletionResolver;
use super::notifier::ChangeNotifier;
use super::series_generator::SeriesGenerator;

/// Maximum description length, in characters, of the base text. Series tags
/// are appended after the check, so stored descriptions can be longer.
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Creates, edits, lists and deletes transactions, including whole series.
///
/// Every write goes through the `BatchGateway` as one batch and is announced on
/// the `ChangeNotifier` only after the store accepted it.
pub struct TransactionService {
    gateway: BatchGateway,
    notifier: ChangeNotifier,
    generator: SeriesGenerator,
    resolver: SeriesDeletionResolver,
    settings: Settings,
}

impl TransactionService {
    pub fn new(gateway: BatchGateway, notifier: ChangeNotifier, settings: Settings) -> Self {
        Self {
            gateway,
            notifier,
            generator: SeriesGenerator::new(),
            resolver: SeriesDeletionResolver::new(),
            settings,
        }
    }

    /// Validate a form and decide what it writes.
    ///
    /// Rules:
    /// - Description 1–100 characters after trimming
    /// - Value finite and positive
    /// - Category required
    /// - A flagged series needs a count in `2..=max_series_len`; installments
    ///   win when both flags are set
    pub fn plan(&self, form: &TransactionForm) -> Result<SeriesPlan, CoreError> {
        Self::validate_fields(form)?;

        let series = if form.is_installment {
            Some((SeriesKind::Installment, form.installments, "installments"))
        } else if form.is_fixed_income {
            Some((
                SeriesKind::RecurringIncome,
                form.fixed_income_months,
                "fixed income months",
            ))
        } else {
            None
        };

        let Some((kind, count, label)) = series else {
            return Ok(SeriesPlan::Single);
        };
        let count = count.ok_or_else(|| {
            CoreError::Validation(format!("Number of {label} is required (minimum 2)"))
        })?;
        if count < 2 {
            return Err(CoreError::Validation(format!(
                "Number of {label} must be at least 2, got {count}"
            )));
        }
        if count > self.settings.max_series_len {
            return Err(CoreError::Validation(format!(
                "Number of {label} must be at most {}, got {count}",
                self.settings.max_series_len
            )));
        }
        Ok(SeriesPlan::Series { kind, count })
    }

    /// The drafts a form expands to, without writing anything.
    pub fn preview(&self, form: &TransactionForm) -> Result<Vec<TransactionDraft>, CoreError> {
        let base = form.base_draft();
        match self.plan(form)? {
            SeriesPlan::Single => Ok(vec![base]),
            SeriesPlan::Series { kind, count } => self.generator.generate(kind, &base, count),
        }
    }

    /// Validate, expand and write a form in one batch. Returns the new ids in
    /// series order.
    pub async fn add(&self, user_id: &str, form: &TransactionForm) -> Result<Vec<Uuid>, CoreError> {
        Self::check_user(user_id)?;
        let drafts = self.preview(form)?;
        let ids = self.gateway.write_batch(user_id, &drafts).await?;

        info!(
            user_id,
            records = ids.len(),
            description = %form.description.trim(),
            "transactions added"
        );
        self.notifier.publish(ChangeEvent::TransactionsAdded {
            user_id: user_id.to_string(),
            ids: ids.clone(),
        });
        Ok(ids)
    }

    /// Overwrite one record. Series flags on the form are ignored: series
    /// members are only ever edited one at a time.
    pub async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        form: &TransactionForm,
    ) -> Result<(), CoreError> {
        Self::check_user(user_id)?;
        Self::validate_fields(form)?;
        self.gateway
            .store()
            .update_transaction(user_id, id, &form.base_draft())
            .await?;

        info!(user_id, %id, "transaction updated");
        self.notifier.publish(ChangeEvent::TransactionUpdated {
            user_id: user_id.to_string(),
            id,
        });
        Ok(())
    }

    /// Delete `target` alone (`Single`) or with every later record of its
    /// series (`Future`). Returns the ids that were selected, target first.
    /// A target that was already deleted does not stop its later siblings
    /// from being removed.
    ///
    /// A single delete leaves the other records' `(k/n)` tags untouched, even
    /// though `n` no longer matches what is stored.
    pub async fn delete(
        &self,
        user_id: &str,
        target: &Transaction,
        delete_type: DeleteType,
    ) -> Result<Vec<Uuid>, CoreError> {
        Self::check_user(user_id)?;
        if target.user_id != user_id {
            return Err(CoreError::Validation(format!(
                "Transaction {} does not belong to user {user_id}",
                target.id
            )));
        }

        let ids = match delete_type {
            DeleteType::Single => vec![target.id],
            DeleteType::Future => {
                self.resolver
                    .resolve_future(self.gateway.store(), user_id, target)
                    .await?
                    .ids
            }
        };
        let removed = self.gateway.delete_batch(user_id, &ids).await?;

        info!(user_id, ?delete_type, planned = ids.len(), removed, "transactions deleted");
        self.notifier.publish(ChangeEvent::TransactionsDeleted {
            user_id: user_id.to_string(),
            ids: ids.clone(),
        });
        Ok(ids)
    }

    /// Look the record up first, then delete as `delete`.
    pub async fn delete_by_id(
        &self,
        user_id: &str,
        id: Uuid,
        delete_type: DeleteType,
    ) -> Result<Vec<Uuid>, CoreError> {
        let target = self.get(user_id, id).await?;
        self.delete(user_id, &target, delete_type).await
    }

    pub async fn get(&self, user_id: &str, id: Uuid) -> Result<Transaction, CoreError> {
        self.gateway
            .store()
            .get_transaction(user_id, id)
            .await?
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))
    }

    /// Transactions in a period, newest first. `limit` falls back to the
    /// configured default.
    pub async fn list(
        &self,
        user_id: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>, CoreError> {
        self.query_period(user_id, period, limit.or(self.settings.default_list_limit))
            .await
    }

    /// Every transaction in a period, ignoring the default listing limit.
    /// Aggregates are computed from this.
    pub async fn list_all(&self, user_id: &str, period: Period) -> Result<Vec<Transaction>, CoreError> {
        self.query_period(user_id, period, None).await
    }

    async fn query_period(
        &self,
        user_id: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>, CoreError> {
        let mut query = match (period, period.bounds()?) {
            (Period::Day(day), _) => TransactionQuery::new().on_day(day),
            (_, Some((from, to))) => TransactionQuery::new().between(from, to),
            (_, None) => TransactionQuery::new(),
        };
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        self.gateway.store().query_transactions(user_id, &query).await
    }

    pub async fn count(&self, user_id: &str) -> Result<usize, CoreError> {
        self.gateway.store().count_transactions(user_id).await
    }

    fn validate_fields(form: &TransactionForm) -> Result<(), CoreError> {
        let len = form.description.trim().chars().count();
        if len == 0 {
            return Err(CoreError::Validation("Description is required".into()));
        }
        if len > MAX_DESCRIPTION_LEN {
            return Err(CoreError::Validation(format!(
                "Description is too long ({len} characters, maximum {MAX_DESCRIPTION_LEN})"
            )));
        }
        if !form.value.is_finite() || form.value <= 0.0 {
            return Err(CoreError::Validation(format!(
                "Value must be a positive number, got {}",
                form.value
            )));
        }
        if form.category_id.trim().is_empty() {
            return Err(CoreError::Validation("Category is required".into()));
        }
        Ok(())
    }

    fn check_user(user_id: &str) -> Result<(), CoreError> {
        if user_id.trim().is_empty() {
            return Err(CoreError::Validation("User id is required".into()));
        }
        Ok(())
    }
}
