//! HTTP trigger
//!
//! A single endpoint: `POST /` with an `Authorization: <shared-secret>`
//! header and a JSON `{"records": [...]}` body. Checks run in order (auth,
//! then body parse, then per-record validation), so an unauthorized request
//! never reaches the resolver or the provider.
//!
//! Responses:
//! - 200, empty body: pass completed
//! - 401 `{"message": ...}`: missing or incorrect token
//! - 400 `{"message": ...}`: malformed body or a record with an empty name
//! - 500 `{"message": ...}`: resolver/provider failure during the pass
//!
//! Concurrent requests each run their own sequential pass; the provider's
//! last-writer-wins behavior is the only consistency guarantee.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde::Serialize;
use tracing::{error, info, warn};

use dnsync_core::{Reconciler, RecordBatch};

/// Fixed listen port for the HTTP trigger
pub const LISTEN_PORT: u16 = 1338;

#[derive(Clone)]
struct AppState {
    reconciler: Arc<Reconciler>,
    auth_token: String,
}

/// Error body shape shared by all non-200 responses
#[derive(Serialize)]
struct Message {
    message: String,
}

fn message(status: StatusCode, text: &str) -> Response {
    (
        status,
        Json(Message {
            message: text.to_string(),
        }),
    )
        .into_response()
}

/// Build the trigger router
pub fn router(reconciler: Arc<Reconciler>, auth_token: String) -> Router {
    Router::new()
        .route("/", post(apply_records))
        .with_state(AppState {
            reconciler,
            auth_token,
        })
}

async fn apply_records(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    // An empty configured token never authorizes, even against an empty
    // header.
    if provided.is_empty() || state.auth_token.is_empty() || provided != state.auth_token {
        warn!("rejected request with missing or invalid token");
        return message(StatusCode::UNAUTHORIZED, "invalid token");
    }

    let batch = match RecordBatch::from_json_slice(&body) {
        Ok(batch) => batch,
        Err(e) => {
            warn!("rejected malformed request body: {e}");
            return message(StatusCode::BAD_REQUEST, "invalid request body");
        }
    };

    if let Err(e) = batch.validate() {
        warn!("rejected invalid record batch: {e}");
        return message(StatusCode::BAD_REQUEST, "invalid record");
    }

    match state.reconciler.run_pass(&batch).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => {
            error!("reconciliation pass failed: {e}");
            message(StatusCode::INTERNAL_SERVER_ERROR, "failed to apply records")
        }
    }
}

/// Serve the HTTP trigger until ctrl-c
pub async fn run(reconciler: Arc<Reconciler>, auth_token: String) -> anyhow::Result<()> {
    let app = router(reconciler, auth_token);
    let addr = SocketAddr::from(([0, 0, 0, 0], LISTEN_PORT));

    info!("starting server on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
