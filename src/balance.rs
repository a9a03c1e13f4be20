//! The balance summary reported by the API.

use serde::Deserialize;

use crate::{
    Error,
    format::{FormatConfig, format_currency},
};

/// Mismatches smaller than half a cent are rounding noise.
const CONSISTENCY_TOLERANCE: f64 = 0.005;

/// An amount as it appears in the balance JSON.
///
/// The API sends the balance amounts as strings, but plain numbers are
/// accepted too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// A number sent as a string, e.g. `"5000"`.
    Text(String),
    /// A number sent as a JSON number.
    Number(f64),
}

impl RawAmount {
    fn parse(&self, field: &'static str) -> Result<f64, Error> {
        let invalid = |value: String| Error::InvalidAmount { field, value };

        let amount = match self {
            RawAmount::Number(number) => *number,
            RawAmount::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| invalid(text.clone()))?,
        };

        if amount.is_finite() {
            Ok(amount)
        } else {
            Err(invalid(amount.to_string()))
        }
    }
}

/// The balance exactly as the API sends it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawBalance {
    /// The sum of all income.
    pub income: RawAmount,
    /// The sum of all outcome.
    pub outcome: RawAmount,
    /// Income minus outcome, as computed by the API.
    pub total: RawAmount,
}

/// The balance summary with its amounts parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Balance {
    /// The sum of all income.
    pub income: f64,
    /// The sum of all outcome.
    pub outcome: f64,
    /// Income minus outcome, as computed by the API.
    pub total: f64,
}

impl Balance {
    /// Whether `total` equals `income - outcome` to within half a cent.
    ///
    /// The API's total is displayed either way, this is only used to flag
    /// suspicious data in the logs.
    pub fn is_consistent(&self) -> bool {
        (self.income - self.outcome - self.total).abs() < CONSISTENCY_TOLERANCE
    }
}

impl TryFrom<RawBalance> for Balance {
    type Error = Error;

    fn try_from(raw: RawBalance) -> Result<Self, Self::Error> {
        Ok(Self {
            income: raw.income.parse("income")?,
            outcome: raw.outcome.parse("outcome")?,
            total: raw.total.parse("total")?,
        })
    }
}

/// The balance amounts formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceView {
    /// The formatted sum of all income.
    pub income: String,
    /// The formatted sum of all outcome.
    pub outcome: String,
    /// The formatted total.
    pub total: String,
}

impl BalanceView {
    /// Format `balance` with the currency formatter used for transactions.
    pub fn new(balance: &Balance, config: &FormatConfig) -> Self {
        Self {
            income: format_currency(balance.income, config),
            outcome: format_currency(balance.outcome, config),
            total: format_currency(balance.total, config),
        }
    }
}
