//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::{Method, StatusCode, Uri},
    middleware::Next,
    response::Response,
};

/// The number of characters of a response body that are logged at the `debug` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// The request line and response status are logged at the `info` level.
/// The response body is logged at the `debug` level, truncated to
/// [LOG_BODY_LENGTH_LIMIT] characters.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    tracing::info!("Received request: {method} {uri}");

    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read the response body for {method} {uri}: {error}");
            return Response::from_parts(parts, Body::empty());
        }
    };

    log_response(&method, &uri, parts.status, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

fn log_response(method: &Method, uri: &Uri, status: StatusCode, body: &str) {
    tracing::info!("Sending response: {method} {uri} {status}");

    let truncated = truncate_body(body);
    if truncated.len() < body.len() {
        tracing::debug!("Response body: {truncated}...");
    } else {
        tracing::debug!("Response body: {body}");
    }
}

/// The first [LOG_BODY_LENGTH_LIMIT] characters of `body`.
fn truncate_body(body: &str) -> &str {
    match body.char_indices().nth(LOG_BODY_LENGTH_LIMIT) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}
