//! HTTP middleware

use axum::{
    extract::Request,
    http::{HeaderValue, Method, Uri},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

/// Header carrying the request correlation id, in both directions
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlates every log line of a request under one id.
///
/// The id comes from an incoming `x-request-id` header when it is usable,
/// otherwise a fresh UUID. The rest of the request runs inside a `request`
/// span carrying the id, so lookup and upstream logs are tagged with it, and
/// the id is echoed back in the response header.
pub async fn request_logging_middleware(
    method: Method,
    uri: Uri,
    request: Request,
    next: Next,
) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = info_span!("request", request_id = %request_id, method = %method, uri = %uri);

    async move {
        let start = Instant::now();
        debug!("HTTP request started");

        let mut response = next.run(request).await;
        let status = response.status().as_u16();
        let duration_ms = start.elapsed().as_millis();

        if status >= 400 {
            warn!(status, duration_ms, "HTTP request completed with error");
        } else {
            info!(status, duration_ms, "HTTP request completed");
        }

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}
