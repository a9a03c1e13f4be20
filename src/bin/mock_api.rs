use std::net::SocketAddr;

use axum::{Json, Router, routing::get};
use clap::Parser;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing_subscriber::filter::LevelFilter;

/// A stand-in for the transactions API that serves sample data, for trying
/// out the dashboard locally.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the sample API from.
    #[arg(short, long, default_value_t = 3333)]
    port: u16,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(LevelFilter::INFO)
        .init();

    let args = Args::parse();
    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let router = Router::new().route("/transactions", get(get_transactions));

    let listener = TcpListener::bind(addr)
        .await
        .expect("Could not bind the sample API address");

    tracing::info!("Sample transactions API listening on {}", addr);
    axum::serve(listener, router)
        .await
        .expect("Sample API stopped unexpectedly");
}

async fn get_transactions() -> Json<Value> {
    Json(json!({
        "transactions": [
            {
                "id": "0f4e9d42-7a13-4c8b-9a1e-5d2f3b6c7a01",
                "title": "Computer",
                "value": 5000,
                "type": "income",
                "category": { "title": "Sell" },
                "created_at": "2020-04-20T00:00:00.000Z"
            },
            {
                "id": "0f4e9d42-7a13-4c8b-9a1e-5d2f3b6c7a02",
                "title": "Website Hosting",
                "value": 1000,
                "type": "outcome",
                "category": { "title": "Hosting" },
                "created_at": "2020-04-19T00:00:00.000Z"
            }
        ],
        "balance": { "income": "5000", "outcome": "1000", "total": "4000" }
    }))
}
