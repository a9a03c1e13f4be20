//! Fetching the dashboard data and turning it into view records.

use crate::{
    Error,
    api::{ApiClient, TransactionsResponse},
    balance::{Balance, BalanceView},
    format::FormatConfig,
    transaction::ViewTransaction,
};

/// Everything the dashboard displays once the data has loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// The transactions in the order the API listed them.
    pub transactions: Vec<ViewTransaction>,
    /// The formatted balance summary.
    pub balance: BalanceView,
}

impl DashboardView {
    /// Parse and format an API response for display.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if a balance amount is not a number or a
    /// transaction value is negative.
    pub fn from_response(
        response: TransactionsResponse,
        config: &FormatConfig,
    ) -> Result<Self, Error> {
        let balance = Balance::try_from(response.balance)?;

        if !balance.is_consistent() {
            tracing::warn!(
                "Balance total {} does not equal income {} minus outcome {}, displaying the API's total",
                balance.total,
                balance.income,
                balance.outcome
            );
        }

        let transactions = response
            .transactions
            .into_iter()
            .map(|raw| -> Result<ViewTransaction, Error> {
                raw.validate().inspect_err(|error| {
                    tracing::error!("Invalid transaction {}: {error}", raw.id)
                })?;
                Ok(ViewTransaction::new(raw, config))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self {
            transactions,
            balance: BalanceView::new(&balance, config),
        })
    }
}

/// The state of the dashboard content.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    /// The data has been requested but has not arrived yet.
    #[default]
    Loading,
    /// The data could not be loaded.
    Failed(Error),
    /// The data is ready to display.
    Ready(DashboardView),
}

impl LoadState {
    /// Whether the data is still on its way.
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Fetch the transactions and balance and format them for display.
///
/// Failures are logged and returned as [LoadState::Failed], this function
/// never returns [LoadState::Loading].
pub async fn load_dashboard(client: &ApiClient, config: &FormatConfig) -> LoadState {
    let result = async {
        let response = client.get_transactions().await?;
        DashboardView::from_response(response, config)
    }
    .await;

    match result {
        Ok(view) => {
            tracing::debug!("Loaded {} transactions", view.transactions.len());
            LoadState::Ready(view)
        }
        Err(error) => {
            tracing::error!("Could not load the dashboard: {error}");
            LoadState::Failed(error)
        }
    }
}
