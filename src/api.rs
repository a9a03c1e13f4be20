//! Client for the transactions API.

use std::time::Duration;

use reqwest::{Client as HttpClient, Url, header::ACCEPT};
use serde::Deserialize;

use crate::{
    Error, balance::RawBalance, endpoints::TRANSACTIONS_API, transaction::RawTransaction,
};

/// The body of a successful response from the transactions endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionsResponse {
    /// Every transaction, in the order the API lists them.
    pub transactions: Vec<RawTransaction>,
    /// The balance summary computed by the API.
    pub balance: RawBalance,
}

/// Fetches dashboard data from the transactions API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: HttpClient,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the API at `base_url`.
    ///
    /// Requests that take longer than `timeout` fail with [Error::ApiTimeout].
    ///
    /// # Errors
    /// Returns [Error::InvalidApiUrl] if `base_url` is not an absolute HTTP(S)
    /// URL, or [Error::ApiUnavailable] if the HTTP client could not be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let mut url =
            Url::parse(base_url).map_err(|_| Error::InvalidApiUrl(base_url.to_owned()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidApiUrl(base_url.to_owned()));
        }

        // Without the trailing slash `join` would replace the last path
        // segment instead of appending to it.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| Error::ApiUnavailable(error.to_string()))?;

        Ok(Self {
            http_client,
            base_url: url,
        })
    }

    /// The base URL requests are made relative to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get all transactions and the balance summary.
    ///
    /// # Errors
    /// - [Error::ApiTimeout] if the API did not respond in time.
    /// - [Error::ApiUnavailable] if the API could not be reached.
    /// - [Error::ApiStatus] if the API responded with a non-success status.
    /// - [Error::MalformedResponse] if the body is not the expected JSON.
    pub async fn get_transactions(&self) -> Result<TransactionsResponse, Error> {
        let url = self
            .base_url
            .join(TRANSACTIONS_API)
            .map_err(|error| Error::InvalidApiUrl(error.to_string()))?;

        tracing::debug!("Fetching transactions from {url}");

        let response = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Transactions API responded with status {status}");
            return Err(Error::ApiStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;

        serde_json::from_slice(&body).map_err(|error| Error::MalformedResponse(error.to_string()))
    }
}

fn map_transport_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::ApiTimeout
    } else {
        Error::ApiUnavailable(error.to_string())
    }
}
