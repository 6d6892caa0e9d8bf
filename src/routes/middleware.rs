use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Log how each `/send` request ended: success at info, client errors at
/// warn, everything else at error.
pub async fn log_send_outcome(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis();

    if status.is_success() {
        tracing::info!(status = status.as_u16(), elapsed_ms, "Notification accepted");
    } else if status.is_client_error() {
        tracing::warn!(status = status.as_u16(), elapsed_ms, "Notification rejected");
    } else {
        tracing::error!(status = status.as_u16(), elapsed_ms, "Notification not delivered");
    }

    response
}
