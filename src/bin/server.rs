use std::{
    fs::OpenOptions,
    net::SocketAddr,
    process::exit,
    sync::Arc,
    time::Duration,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use finances_dashboard::{
    ApiClient, AppState, Currency, FormatConfig, Locale, build_router, graceful_shutdown,
    logging_middleware,
};

/// The web server for the finances dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the transactions API, e.g. "http://localhost:3333".
    #[arg(long, env = "API_URL")]
    api_url: String,

    /// The port to serve the dashboard from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// The locale to display amounts and dates in, e.g. "pt-BR" or "en-US".
    #[arg(long, env = "LOCALE", default_value = "pt-BR")]
    locale: Locale,

    /// The ISO 4217 code of the currency amounts are in, e.g. "BRL".
    #[arg(long, env = "CURRENCY", default_value = "BRL")]
    currency: Currency,

    /// The canonical timezone to display dates in, e.g. "America/Sao_Paulo".
    #[arg(long, env = "TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// How many seconds to wait for the transactions API before giving up.
    #[arg(long, env = "API_TIMEOUT", default_value_t = 10)]
    timeout_secs: u64,

    /// File path for the debug log.
    #[arg(long, env = "LOG_PATH", default_value = "debug.log")]
    log_path: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args.log_path);

    let format_config = match FormatConfig::new(args.locale, args.currency, &args.timezone) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Invalid format settings: {error}");
            exit(1);
        }
    };

    let api_client = match ApiClient::new(&args.api_url, Duration::from_secs(args.timeout_secs))
    {
        Ok(client) => client,
        Err(error) => {
            tracing::error!("Could not create the API client: {error}");
            exit(1);
        }
    };

    tracing::info!(
        "Displaying amounts in {} ({}) and dates in {}, fetching from {}",
        format_config.currency(),
        format_config.locale(),
        format_config.timezone(),
        api_client.base_url()
    );

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(AppState::new(api_client, format_config))
        .layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("Server stopped unexpectedly");
}

fn setup_logging(log_path: &str) {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
