//! A financial dashboard that shows the income, outcome and balance reported
//! by a transactions API.
//!
//! This library provides a web server that fetches the transactions and
//! balance from the API and serves them as HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod api;
mod app_state;
mod balance;
mod dashboard;
mod endpoints;
mod format;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use api::{ApiClient, TransactionsResponse};
pub use app_state::AppState;
pub use balance::{Balance, BalanceView, RawAmount, RawBalance};
pub use dashboard::{DashboardSession, DashboardView, LoadState, load_dashboard};
pub use format::{Currency, FormatConfig, Locale, format_currency, format_date};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{Category, RawTransaction, TransactionType, ViewTransaction};

use crate::{internal_server_error::InternalServerError, not_found::get_404_not_found_response};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transactions API did not respond before the request timed out.
    #[error("the transactions API did not respond in time")]
    ApiTimeout,

    /// The transactions API could not be reached, e.g. the connection was
    /// refused.
    ///
    /// The string is the underlying error message and is only intended for
    /// the server logs.
    #[error("could not reach the transactions API: {0}")]
    ApiUnavailable(String),

    /// The transactions API responded with a non-success status code.
    #[error("the transactions API responded with status {0}")]
    ApiStatus(u16),

    /// The response body did not have the expected JSON shape.
    #[error("the transactions API sent a malformed response: {0}")]
    MalformedResponse(String),

    /// An amount in the response was not a valid, finite number.
    #[error("invalid amount {value:?} for field \"{field}\"")]
    InvalidAmount {
        /// The name of the field holding the amount.
        field: &'static str,
        /// The value as it was received.
        value: String,
    },

    /// The URL of the transactions API could not be parsed.
    #[error("invalid API URL \"{0}\"")]
    InvalidApiUrl(String),

    /// The locale tag is not one of the supported locales.
    #[error("unsupported locale \"{0}\"")]
    InvalidLocale(String),

    /// The currency code is not one of the supported currencies.
    #[error("unsupported currency \"{0}\"")]
    InvalidCurrency(String),

    /// The number formatter for a locale and currency could not be built.
    #[error("could not build the currency formatter: {0}")]
    CurrencyFormat(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The dashboard load ended without producing a result, e.g. because it
    /// was aborted.
    #[error("the dashboard load was cancelled")]
    LoadCancelled,

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// A title and description of the error that is suitable for showing to users.
    pub(crate) fn user_message(&self) -> (&'static str, String) {
        match self {
            Error::ApiTimeout => (
                "The server is taking too long",
                "The transactions service did not respond in time. Try again in a moment."
                    .to_owned(),
            ),
            Error::ApiUnavailable(_) => (
                "Could not reach the server",
                "The transactions service is unavailable. Check that it is running and try again."
                    .to_owned(),
            ),
            Error::ApiStatus(status) => (
                "The server returned an error",
                format!("The transactions service responded with status {status}."),
            ),
            Error::MalformedResponse(_) | Error::InvalidAmount { .. } => (
                "Could not read the transactions",
                "The transactions service sent data in an unexpected format, \
                check the server logs for more details."
                    .to_owned(),
            ),
            _ => (
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.".to_owned(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        Error,
        test_utils::{parse_html_document, text_of},
    };

    #[tokio::test]
    async fn not_found_renders_404_page() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_document(response).await;
        assert_eq!(text_of(&html, ".error-page__code"), "404");
    }

    #[tokio::test]
    async fn other_errors_render_500_page() {
        let response = Error::ApiTimeout.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_document(response).await;
        assert_eq!(text_of(&html, ".error-page__code"), "500");
        assert!(
            !html.html().contains("did not respond in time"),
            "internal error details should not be shown to the client"
        );
    }
}
