use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::Method as HttpMethod,
    middleware::Next,
    response::Response,
};
use shared::utils::{Method, Status};
use std::{sync::Arc, time::Instant};

/// Records every request in the HTTP metrics families.
pub async fn track_metrics(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let method = match *req.method() {
        HttpMethod::GET => Method::Get,
        HttpMethod::POST => Method::Post,
        _ => Method::Other,
    };

    let start = Instant::now();
    let response = next.run(req).await;

    let status = if response.status().is_redirection() {
        Status::Redirect
    } else if response.status().is_client_error() || response.status().is_server_error() {
        Status::Error
    } else {
        Status::Success
    };

    state
        .metrics
        .record(method, status, start.elapsed().as_secs_f64());

    response
}
