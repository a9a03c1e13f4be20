//! A stand-in for the transactions API that tests can point a real client at.

use std::net::{SocketAddr, TcpListener as StdTcpListener};

use axum::Router;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL.
///
/// The server runs until the test's runtime shuts down.
pub(crate) async fn spawn_mock_api(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind mock API listener");
    let address = listener
        .local_addr()
        .expect("Could not get mock API address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Mock API server failed");
    });

    format!("http://{address}")
}

/// An address that nothing is listening on.
pub(crate) fn unused_address() -> SocketAddr {
    let listener = StdTcpListener::bind("127.0.0.1:0").expect("Could not bind listener");
    listener.local_addr().expect("Could not get address")
}

/// The API response for one income of 5000 and one outcome of 1000.
pub(crate) fn dashboard_json() -> Value {
    json!({
        "transactions": [
            {
                "id": "a4b7c1d2-0001",
                "title": "Computer",
                "value": 5000,
                "type": "income",
                "category": { "title": "Sell" },
                "created_at": "2020-04-20T00:00:00.000Z"
            },
            {
                "id": "a4b7c1d2-0002",
                "title": "Website Hosting",
                "value": 1000,
                "type": "outcome",
                "category": { "title": "Hosting" },
                "created_at": "2020-04-19T00:00:00.000Z"
            }
        ],
        "balance": { "income": "5000", "outcome": "1000", "total": "4000" }
    })
}

/// An API response with no transactions and a zero balance.
pub(crate) fn empty_dashboard_json() -> Value {
    json!({
        "transactions": [],
        "balance": { "income": "0", "outcome": "0", "total": "0" }
    })
}
