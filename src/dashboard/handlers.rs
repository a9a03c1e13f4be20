//! Dashboard HTTP handlers and view rendering.
//!
//! The dashboard page is served straight away in the loading state. Once it
//! is shown, htmx requests the content endpoint, which mounts a
//! [DashboardSession] for the one load and renders whatever state it settles
//! on.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};

use crate::{
    AppState,
    api::ApiClient,
    dashboard::{
        cards::balance_cards_view,
        load::{DashboardView, LoadState},
        session::DashboardSession,
        table::transactions_table_view,
    },
    endpoints,
    format::FormatConfig,
    html::{base, link, loading_spinner},
    navigation::NavBar,
};

const CONTENT_ID: &str = "dashboard-content";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The client for fetching transactions.
    pub api_client: ApiClient,
    /// How to display amounts and dates.
    pub format_config: FormatConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api_client: state.api_client.clone(),
            format_config: state.format_config.clone(),
        }
    }
}

/// Display the dashboard page, which loads its content once shown.
pub async fn get_dashboard_page() -> Response {
    dashboard_page(&LoadState::Loading).into_response()
}

/// Load the transactions and balance and render them.
///
/// HTMX requests get just the content so it can be swapped into the page,
/// other requests get the full page.
///
/// A failed load is still a successful response, the failure is shown in the
/// content. If the client goes away before the load finishes, this future is
/// dropped along with its session, which aborts the load.
pub async fn get_dashboard_content(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
) -> Response {
    let mut session = DashboardSession::mount(state.api_client, state.format_config);
    let load_state = session.settled().await;

    if is_htmx_request {
        dashboard_content_view(&load_state).into_response()
    } else {
        dashboard_page(&load_state).into_response()
    }
}

fn dashboard_page(load_state: &LoadState) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    let content = html! {
        (nav_bar.into_html())

        main class="container" {
            (dashboard_content_view(load_state))
        }
    };

    base("Dashboard", &content)
}

/// Renders the dashboard content for each state of the load.
fn dashboard_content_view(load_state: &LoadState) -> Markup {
    match load_state {
        LoadState::Loading => loading_view(),
        LoadState::Failed(error) => {
            let (title, description) = error.user_message();
            load_failed_view(title, &description)
        }
        LoadState::Ready(view) => ready_view(view),
    }
}

fn loading_view() -> Markup {
    html! {
        div
            id=(CONTENT_ID)
            class="loading"
            aria-busy="true"
            hx-get=(endpoints::DASHBOARD_CONTENT)
            hx-trigger="load"
            hx-swap="outerHTML"
        {
            (loading_spinner())
            span { "Loading transactions..." }

            noscript {
                p { (link(endpoints::DASHBOARD_CONTENT, "Show transactions")) }
            }
        }
    }
}

fn load_failed_view(title: &str, description: &str) -> Markup {
    html! {
        div id=(CONTENT_ID) class="load-failed" role="alert" {
            h2 class="load-failed__title" { (title) }
            p { (description) }
            p { (link(endpoints::DASHBOARD_VIEW, "Reload the page")) }
        }
    }
}

fn ready_view(view: &DashboardView) -> Markup {
    html! {
        div id=(CONTENT_ID) {
            (balance_cards_view(&view.balance))
            (transactions_table_view(&view.transactions))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
    use axum_htmx::HxRequest;
    use serde_json::{Value, json};

    use crate::{
        api::ApiClient,
        endpoints,
        format::FormatConfig,
        test_utils::{
            api::{dashboard_json, empty_dashboard_json, spawn_mock_api, unused_address},
            assert_content_type, assert_status_ok, assert_valid_html, element_text,
            parse_html_document, parse_html_fragment, select_all, text_of,
        },
    };

    use super::{DashboardState, get_dashboard_content, get_dashboard_page};

    const TIMEOUT: Duration = Duration::from_secs(5);

    async fn state_for(body: Value) -> DashboardState {
        let base_url = spawn_mock_api(Router::new().route(
            "/transactions",
            get(move || {
                let body = body.clone();
                async move { Json(body) }
            }),
        ))
        .await;

        DashboardState {
            api_client: ApiClient::new(&base_url, TIMEOUT).unwrap(),
            format_config: FormatConfig::default(),
        }
    }

    #[tokio::test]
    async fn dashboard_page_starts_loading() {
        let response = get_dashboard_page().await;

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let placeholder = select_all(&html, "#dashboard-content[hx-trigger='load']");
        assert_eq!(placeholder.len(), 1);
        assert_eq!(
            placeholder[0].value().attr("hx-get"),
            Some(endpoints::DASHBOARD_CONTENT)
        );
        assert!(select_all(&html, "table").is_empty());
    }

    #[tokio::test]
    async fn content_shows_balance_and_transactions() {
        let state = state_for(dashboard_json()).await;

        let response = get_dashboard_content(State(state), HxRequest(true)).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert_eq!(
            text_of(&html, "[data-testid='balance-income']"),
            "R$ 5.000,00"
        );
        assert_eq!(
            text_of(&html, "[data-testid='balance-outcome']"),
            "R$ 1.000,00"
        );
        assert_eq!(
            text_of(&html, "[data-testid='balance-total']"),
            "R$ 4.000,00"
        );

        let rows = select_all(&html, "tbody tr");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value().attr("id"), Some("transaction-a4b7c1d2-0001"));
        assert_eq!(rows[1].value().attr("id"), Some("transaction-a4b7c1d2-0002"));
        assert_eq!(text_of(&html, "td.income"), "R$ 5.000,00");
        assert_eq!(text_of(&html, "td.outcome"), "- R$ 1.000,00");
        assert!(select_all(&html, "nav").is_empty(), "fragment should not include the header");
    }

    #[tokio::test]
    async fn content_without_htmx_is_full_page() {
        let state = state_for(dashboard_json()).await;

        let response = get_dashboard_content(State(state), HxRequest(false)).await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(text_of(&html, "title"), "Dashboard - Finances");
        assert_eq!(select_all(&html, "nav").len(), 1);
        assert_eq!(select_all(&html, "tbody tr").len(), 2);
    }

    #[tokio::test]
    async fn empty_transactions_render_no_rows() {
        let state = state_for(empty_dashboard_json()).await;

        let response = get_dashboard_content(State(state), HxRequest(true)).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert!(select_all(&html, "tbody tr").is_empty());
        assert_eq!(text_of(&html, "[data-testid='balance-total']"), "R$ 0,00");
    }

    #[tokio::test]
    async fn unreachable_api_shows_load_failed() {
        let state = DashboardState {
            api_client: ApiClient::new(&format!("http://{}", unused_address()), TIMEOUT)
                .unwrap(),
            format_config: FormatConfig::default(),
        };

        let response = get_dashboard_content(State(state), HxRequest(true)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let alert = select_all(&html, "[role='alert']");
        assert_eq!(alert.len(), 1);
        assert_eq!(
            text_of(&html, ".load-failed__title"),
            "Could not reach the server"
        );
        assert!(select_all(&html, "table").is_empty());
        assert!(element_text(alert[0]).contains("Reload the page"));
    }

    #[tokio::test]
    async fn malformed_balance_shows_load_failed() {
        let mut body = dashboard_json();
        body["balance"]["outcome"] = json!("a lot");
        let state = state_for(body).await;

        let response = get_dashboard_content(State(state), HxRequest(true)).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_eq!(
            text_of(&html, ".load-failed__title"),
            "Could not read the transactions"
        );
    }
}
