//! Implements a struct that holds the state of the web server.

use crate::{api::ApiClient, format::FormatConfig};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client for the transactions API.
    pub api_client: ApiClient,

    /// How amounts and dates are displayed.
    pub format_config: FormatConfig,
}

impl AppState {
    /// Create a new [AppState].
    pub fn new(api_client: ApiClient, format_config: FormatConfig) -> Self {
        Self {
            api_client,
            format_config,
        }
    }
}
