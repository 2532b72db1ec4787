//! Axum router and handlers for the relay.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use bgi_notify::{render, Notification, WebhookSink};

use crate::error::ApiError;

/// Shared state for the relay handlers.
#[derive(Clone)]
pub struct RelayState {
    pub sink: Arc<WebhookSink>,
}

impl RelayState {
    pub fn new(sink: WebhookSink) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }
}

/// Build the relay router.
///
/// The notification route is mounted at the endpoint token path, so only the
/// producer that knows the token can reach it. The root path answers the
/// liveness probe unconditionally.
pub fn relay_router(endpoint_token: &str, state: RelayState) -> Router {
    Router::new()
        .route("/", get(liveness_handler))
        .route(&format!("/{endpoint_token}"), post(notify_handler))
        .layer(axum::middleware::from_fn(crate::middleware::log_requests))
        .with_state(state)
}

/// Liveness probe: `200 OK` with no dependency on body or state.
async fn liveness_handler() -> &'static str {
    "OK"
}

/// Receive a notification, render it, forward it to the sink.
///
/// Render and forward failures are deliberately propagated — the relay does
/// not retry and does not degrade to a success response on a failed forward.
async fn notify_handler(
    State(state): State<RelayState>,
    Json(notification): Json<Notification>,
) -> Result<&'static str, ApiError> {
    let message = render(&notification)?;
    state.sink.send(&message).await?;
    Ok("OK")
}
