//! HTTP front door: axum router exposing the capture endpoint.
//!
//! - `GET /capture`: runs one capture and returns the PNG bytes
//!
//! Every other path or method falls through to axum's default 404 / 405.

use std::{future::Future, net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, error, info, warn};

use crate::{capture::CaptureFacade, error::CaptureError, perf::HandlerTimer};

/// Path of the capture endpoint
pub const CAPTURE_PATH: &str = "/capture";

/// Shared state for the capture endpoint
pub struct AppState {
    capture: Arc<dyn CaptureFacade>,
    /// Held across a capture when serialization is enabled
    gate:    Option<Mutex<()>>,
}

impl AppState {
    /// State where concurrent requests each run their own capture
    pub fn new(capture: Arc<dyn CaptureFacade>) -> Self {
        Self {
            capture,
            gate: None,
        }
    }

    /// State allowing at most one capture at a time
    pub fn serialized(capture: Arc<dyn CaptureFacade>) -> Self {
        Self {
            capture,
            gate: Some(Mutex::new(())),
        }
    }
}

/// Builds the router serving the capture endpoint
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(CAPTURE_PATH, get(capture_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Binds `addr`, failing fast when the port is unavailable
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))
}

/// Serves `app` on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("Failed to read listener address")?;
    info!("Starting server on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

/// GET /capture: run the capture routine and return its image
pub async fn capture_handler(State(state): State<Arc<AppState>>) -> Response {
    let _timer = HandlerTimer::start("capture");

    let _permit = match &state.gate {
        Some(gate) => Some(gate.lock().await),
        None => None,
    };

    match state.capture.capture().await {
        Ok(image) => {
            debug!(bytes = image.len(), "Captured fingerprint image");
            let content_type = image.content_type();
            ([(header::CONTENT_TYPE, content_type)], image.into_bytes()).into_response()
        }
        Err(err) => {
            log_capture_error(&err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.response_body()).into_response()
        }
    }
}

fn log_capture_error(err: &CaptureError) {
    match err {
        CaptureError::EmptyOutput { .. } => {
            warn!(
                stderr = %err.stderr_text(),
                hint = err.remediation_hint(),
                "Capture routine returned empty output"
            );
        }
        _ => {
            error!(hint = err.remediation_hint(), "Failed to capture fingerprint: {}", err);
            error!("Capture routine stdout:\n{}", err.stdout_text());
            error!("Capture routine stderr:\n{}", err.stderr_text());
        }
    }
}
