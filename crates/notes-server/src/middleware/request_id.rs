//! Request ID middleware for tracing requests.

use axum::{extract::Request, middleware::Next, response::Response};
use http::HeaderValue;
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Ensure every request carries an `x-request-id` and echo it on the
/// response. An inbound ID is kept; otherwise a fresh UUID is assigned.
pub async fn set_request_id(mut request: Request, next: Next) -> Response {
    let id = match request.headers().get(REQUEST_ID_HEADER) {
        Some(value) => value.clone(),
        None => {
            // A hyphenated UUID is always a valid header value.
            let generated = Uuid::new_v4().to_string();
            let value = HeaderValue::from_str(&generated)
                .expect("generated request id is valid ASCII");
            request.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
            value
        }
    };

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, id);
    response
}
