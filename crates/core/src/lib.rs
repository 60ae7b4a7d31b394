pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use std::sync::{Arc, Once};

use models::{
    analytics::{CategoryTotal, MonthTotals, MonthlySummary},
    category::{Category, NewCategory},
    event::ChangeEvent,
    form::TransactionForm,
    query::Period,
    series::SeriesInfo,
    settings::Settings,
    transaction::{DeleteType, Transaction, TransactionDraft, TransactionType},
};
use services::{
    analytics_service::AnalyticsService, category_service::CategoryService,
    notifier::ChangeNotifier, series_identifier, transaction_service::TransactionService,
};
use storage::{gateway::BatchGateway, traits::Store};
use tokio::sync::broadcast;
use uuid::Uuid;

use errors::CoreError;

static INIT_TRACING: Once = Once::new();

/// Install a global `tracing` subscriber (fmt output, `RUST_LOG` filter,
/// `info` by default). Safe to call more than once; does nothing if the host
/// application already installed its own subscriber.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        if tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
            .is_ok()
        {
            tracing::info!("finance tracker tracing initialized");
        }
    });
}

/// Main entry point for the finance tracker core library.
/// Holds the store handle and all services needed to operate on it.
#[must_use]
pub struct FinanceTracker {
    store: Arc<dyn Store>,
    transaction_service: TransactionService,
    category_service: CategoryService,
    analytics_service: AnalyticsService,
    notifier: ChangeNotifier,
    settings: Settings,
}

impl std::fmt::Debug for FinanceTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceTracker")
            .field("store", &self.store.name())
            .field("settings", &self.settings)
            .field("subscribers", &self.notifier.subscriber_count())
            .finish()
    }
}

impl FinanceTracker {
    /// Tracker over `store` with default settings.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::build(store, Settings::default())
    }

    /// Tracker over `store` with validated custom settings.
    pub fn with_settings(store: Arc<dyn Store>, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(store, settings))
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Receive a `ChangeEvent` after every committed write.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.notifier.subscribe()
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Add a single transaction, an installment purchase or a fixed monthly
    /// income. Returns the created ids (one per generated record).
    pub async fn add_transaction(
        &self,
        user_id: &str,
        form: &TransactionForm,
    ) -> Result<Vec<Uuid>, CoreError> {
        self.transaction_service.add(user_id, form).await
    }

    /// What `add_transaction` would write, without writing it.
    pub fn preview_transaction(
        &self,
        form: &TransactionForm,
    ) -> Result<Vec<TransactionDraft>, CoreError> {
        self.transaction_service.preview(form)
    }

    /// Edit a single record.
    pub async fn update_transaction(
        &self,
        user_id: &str,
        id: Uuid,
        form: &TransactionForm,
    ) -> Result<(), CoreError> {
        self.transaction_service.update(user_id, id, form).await
    }

    /// Delete a record, or a record and its later series siblings.
    pub async fn delete_transaction(
        &self,
        user_id: &str,
        transaction: &Transaction,
        delete_type: DeleteType,
    ) -> Result<Vec<Uuid>, CoreError> {
        self.transaction_service
            .delete(user_id, transaction, delete_type)
            .await
    }

    pub async fn delete_transaction_by_id(
        &self,
        user_id: &str,
        id: Uuid,
        delete_type: DeleteType,
    ) -> Result<Vec<Uuid>, CoreError> {
        self.transaction_service
            .delete_by_id(user_id, id, delete_type)
            .await
    }

    pub async fn get_transaction(&self, user_id: &str, id: Uuid) -> Result<Transaction, CoreError> {
        self.transaction_service.get(user_id, id).await
    }

    /// Transactions within a period, newest first.
    pub async fn list_transactions(
        &self,
        user_id: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>, CoreError> {
        self.transaction_service.list(user_id, period, limit).await
    }

    /// The `limit` most recent transactions across all dates.
    pub async fn recent_transactions(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Transaction>, CoreError> {
        self.transaction_service
            .list(user_id, Period::All, Some(limit))
            .await
    }

    pub async fn transaction_count(&self, user_id: &str) -> Result<usize, CoreError> {
        self.transaction_service.count(user_id).await
    }

    /// Series tag carried by a description, if any.
    #[must_use]
    pub fn series_info(description: &str) -> Option<SeriesInfo> {
        series_identifier::classify(description)
    }

    /// Whether deleting this transaction should offer "this and future ones".
    #[must_use]
    pub fn is_series_member(transaction: &Transaction) -> bool {
        series_identifier::is_series_member(&transaction.description)
    }

    // ── Categories ──────────────────────────────────────────────────

    pub async fn add_category(
        &self,
        user_id: &str,
        category: NewCategory,
    ) -> Result<Category, CoreError> {
        self.category_service.create(user_id, category).await
    }

    pub async fn list_categories(&self, user_id: &str) -> Result<Vec<Category>, CoreError> {
        self.category_service.list(user_id).await
    }

    pub async fn update_category(
        &self,
        user_id: &str,
        id: Uuid,
        category: NewCategory,
    ) -> Result<(), CoreError> {
        self.category_service.update(user_id, id, category).await
    }

    /// Transactions keep pointing at the removed id.
    pub async fn delete_category(&self, user_id: &str, id: Uuid) -> Result<(), CoreError> {
        self.category_service.delete(user_id, id).await
    }

    pub async fn seed_default_categories(&self, user_id: &str) -> Result<Vec<Category>, CoreError> {
        self.category_service.seed_defaults(user_id).await
    }

    // ── Summaries ───────────────────────────────────────────────────

    /// Income, expenses and balance for one month.
    pub async fn monthly_summary(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<MonthlySummary, CoreError> {
        let transactions = self
            .transaction_service
            .list_all(user_id, Period::Month(year, month))
            .await?;
        Ok(self.analytics_service.monthly_summary(&transactions))
    }

    /// Per-month totals for a whole year, January first.
    pub async fn annual_summary(
        &self,
        user_id: &str,
        year: i32,
    ) -> Result<Vec<MonthTotals>, CoreError> {
        let transactions = self
            .transaction_service
            .list_all(user_id, Period::Year(year))
            .await?;
        Ok(self.analytics_service.annual_summary(year, &transactions))
    }

    /// Totals per category for a period and transaction type.
    /// Transactions and categories are fetched concurrently.
    pub async fn category_breakdown(
        &self,
        user_id: &str,
        period: Period,
        transaction_type: TransactionType,
    ) -> Result<Vec<CategoryTotal>, CoreError> {
        let (transactions, categories) = tokio::try_join!(
            self.transaction_service.list_all(user_id, period),
            self.category_service.list(user_id),
        )?;
        Ok(self
            .analytics_service
            .category_breakdown(&transactions, &categories, transaction_type))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(store: Arc<dyn Store>, settings: Settings) -> Self {
        let notifier = ChangeNotifier::new(settings.notification_capacity);
        let gateway = BatchGateway::new(Arc::clone(&store));
        let transaction_service =
            TransactionService::new(gateway, notifier.clone(), settings.clone());
        let category_service = CategoryService::new(Arc::clone(&store), notifier.clone());
        let analytics_service = AnalyticsService::new();

        Self {
            store,
            transaction_service,
            category_service,
            analytics_service,
            notifier,
            settings,
        }
    }
}
