//! Transactions as received from the API and as displayed on the dashboard.

use serde::{Deserialize, Deserializer, de};
use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::{
    Error,
    format::{FormatConfig, format_currency, format_date},
};

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received.
    Income,
    /// Money spent.
    Outcome,
}

impl TransactionType {
    /// The lowercase name of the type, also used as a CSS class.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Outcome => "outcome",
        }
    }
}

/// The category a transaction is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// The display name of the category.
    pub title: String,
}

/// A transaction exactly as the API sends it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTransaction {
    /// Opaque identifier assigned by the API.
    pub id: String,
    /// A short description of the transaction.
    pub title: String,
    /// The amount of money, always a non-negative magnitude.
    pub value: f64,
    /// Whether the transaction is income or outcome.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category of the transaction.
    pub category: Category,
    /// When the transaction was created.
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: OffsetDateTime,
}

impl RawTransaction {
    /// Check the parts of the transaction that the JSON shape alone cannot.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the value is negative or not finite.
    pub fn validate(&self) -> Result<(), Error> {
        if self.value.is_finite() && self.value >= 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidAmount {
                field: "value",
                value: self.value.to_string(),
            })
        }
    }
}

/// Accepts RFC 3339 date times, and ISO 8601 date times without an offset
/// which are read as UTC.
fn deserialize_created_at<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;

    parse_created_at(&text)
        .ok_or_else(|| de::Error::custom(format!("invalid created_at date time \"{text}\"")))
}

fn parse_created_at(text: &str) -> Option<OffsetDateTime> {
    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(date_time);
    }

    let without_offset = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
    );

    PrimitiveDateTime::parse(text, without_offset)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// A transaction with its value and date formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransaction {
    /// Opaque identifier assigned by the API, used as the table row key.
    pub id: String,
    /// A short description of the transaction.
    pub title: String,
    /// The amount of money.
    pub value: f64,
    /// Whether the transaction is income or outcome.
    pub transaction_type: TransactionType,
    /// The category of the transaction.
    pub category: Category,
    /// When the transaction was created.
    pub created_at: OffsetDateTime,
    /// `value` as a currency string, e.g. "R$ 1.000,00".
    pub formatted_value: String,
    /// The date of `created_at`, e.g. "20/04/2020".
    pub formatted_date: String,
}

impl ViewTransaction {
    /// Create the view of `raw` using the display settings in `config`.
    pub fn new(raw: RawTransaction, config: &FormatConfig) -> Self {
        let formatted_value = format_currency(raw.value, config);
        let formatted_date = format_date(raw.created_at, config);

        Self {
            id: raw.id,
            title: raw.title,
            value: raw.value,
            transaction_type: raw.transaction_type,
            category: raw.category,
            created_at: raw.created_at,
            formatted_value,
            formatted_date,
        }
    }
}
