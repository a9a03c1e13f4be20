//! Ties a dashboard load to the lifetime of the page that asked for it.

use tokio::{sync::watch, task::JoinHandle};

use crate::{
    Error,
    api::ApiClient,
    dashboard::load::{LoadState, load_dashboard},
    format::FormatConfig,
};

/// One mount of the dashboard: a single load and the state it produces.
///
/// The state starts as [LoadState::Loading] and is written at most once, when
/// the load finishes. Dropping the session aborts the load, and no state is
/// written after the session is gone.
pub struct DashboardSession {
    state: watch::Receiver<LoadState>,
    load_task: JoinHandle<()>,
}

impl DashboardSession {
    /// Start loading the dashboard data in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(client: ApiClient, config: FormatConfig) -> Self {
        let (sender, receiver) = watch::channel(LoadState::Loading);

        let load_task = tokio::spawn(async move {
            let state = load_dashboard(&client, &config).await;

            // Fails only when every receiver is gone, i.e. the page was torn down.
            if sender.send(state).is_err() {
                tracing::debug!(
                    "Dashboard was unmounted before the load finished, discarding the result"
                );
            }
        });

        Self {
            state: receiver,
            load_task,
        }
    }

    /// The current state of the load.
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Get a receiver that is notified when the state changes.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.clone()
    }

    /// Wait for the load to finish and return the final state.
    ///
    /// Returns [LoadState::Failed] with [Error::LoadCancelled] if the load
    /// ended without producing a state.
    pub async fn settled(&mut self) -> LoadState {
        match self.state.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => {
                tracing::warn!("Dashboard load ended without a result");
                LoadState::Failed(Error::LoadCancelled)
            }
        }
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        self.load_task.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use axum::{Json, Router, routing::get};
    use tokio::{sync::Notify, time::timeout};

    use crate::{
        Error,
        api::ApiClient,
        dashboard::load::LoadState,
        format::FormatConfig,
        test_utils::api::{dashboard_json, spawn_mock_api},
    };

    use super::DashboardSession;

    const WAIT: Duration = Duration::from_secs(5);

    /// A mock API that signals `started` when a request arrives and then
    /// takes far longer to answer than any test waits.
    async fn slow_api(started: Arc<Notify>) -> ApiClient {
        let base_url = spawn_mock_api(Router::new().route(
            "/transactions",
            get(move || {
                let started = started.clone();
                async move {
                    started.notify_one();
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Json(dashboard_json())
                }
            }),
        ))
        .await;

        ApiClient::new(&base_url, Duration::from_secs(120)).unwrap()
    }

    #[tokio::test]
    async fn settles_to_ready() {
        let base_url = spawn_mock_api(
            Router::new().route("/transactions", get(|| async { Json(dashboard_json()) })),
        )
        .await;
        let client = ApiClient::new(&base_url, WAIT).unwrap();

        let mut session = DashboardSession::mount(client, FormatConfig::default());
        let state = timeout(WAIT, session.settled()).await.unwrap();

        assert!(matches!(state, LoadState::Ready(_)), "got {state:?}");
        assert_eq!(session.state(), state);
    }

    #[tokio::test]
    async fn starts_in_loading_state() {
        let started = Arc::new(Notify::new());
        let client = slow_api(started.clone()).await;

        let session = DashboardSession::mount(client, FormatConfig::default());

        assert_eq!(session.state(), LoadState::Loading);
    }

    #[tokio::test]
    async fn dropping_session_before_response_never_writes_state() {
        let started = Arc::new(Notify::new());
        let client = slow_api(started.clone()).await;

        let session = DashboardSession::mount(client, FormatConfig::default());
        timeout(WAIT, started.notified())
            .await
            .expect("request never reached the API");

        let mut observer = session.subscribe();
        drop(session);

        let changed = timeout(WAIT, observer.changed())
            .await
            .expect("load task was not aborted");
        assert!(changed.is_err(), "state was written after the session was dropped");
        assert_eq!(*observer.borrow(), LoadState::Loading);
    }

    #[tokio::test]
    async fn aborted_load_settles_as_cancelled() {
        let started = Arc::new(Notify::new());
        let client = slow_api(started.clone()).await;

        let mut session = DashboardSession::mount(client, FormatConfig::default());
        timeout(WAIT, started.notified())
            .await
            .expect("request never reached the API");
        session.load_task.abort();

        let state = timeout(WAIT, session.settled()).await.unwrap();

        assert_eq!(state, LoadState::Failed(Error::LoadCancelled));
    }
}
