use std::time::{Duration, Instant};

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{error, info};

/// Logs method, path, status and wall time of every request.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let res = next.run(req).await;

    let status = res.status();
    let duration = seconds(started.elapsed());
    if status.is_server_error() {
        error!(%method, %path, status = status.as_u16(), %duration, "request failed");
    } else {
        info!(%method, %path, status = status.as_u16(), %duration, "request completed");
    }
    res
}

fn seconds(d: Duration) -> String {
    format!("{:.3}s", d.as_secs_f64())
}
