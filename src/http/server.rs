//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the axum Router that funnels every request into the Dispatcher
//! - Read the request body under the configured size limit
//! - Map `ApiError` to a status code and a JSON error body
//! - Attach request IDs, timeout and trace layers
//! - Serve until the shutdown coordinator fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderName, Request, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::api;
use crate::config::ServerConfig;
use crate::dispatch::{Dispatcher, Headers};
use crate::engine::{Engine, PortAllocator};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Failure body returned to callers.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Application state injected into the fallback handler.
#[derive(Clone)]
struct AppState {
    dispatcher: Arc<Dispatcher>,
    max_body_bytes: usize,
}

/// HTTP server for the control-plane API.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Create a new server over the given collaborators.
    pub fn new(
        config: ServerConfig,
        engine: Arc<dyn Engine>,
        ports: Arc<dyn PortAllocator>,
    ) -> Self {
        let state = AppState {
            dispatcher: Arc::new(api::build_dispatcher(engine, ports)),
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Router::new()
            .fallback(dispatch_request)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: &Shutdown,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "API server starting");

        let mut signal = shutdown.subscribe();
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = signal.recv().await;
            })
            .await?;

        tracing::info!("API server stopped");
        Ok(())
    }
}

/// Fallback handler: every request funnels through the dispatcher.
async fn dispatch_request(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().as_str().to_string();
    let path = request.uri().path().to_string();

    let (parts, body) = request.into_parts();
    let headers = convert_headers(&parts.headers);

    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) if bytes.is_empty() => None,
        Ok(bytes) => Some(bytes.to_vec()),
        Err(err) => {
            tracing::error!(request_id = %request_id, error = %err, "failed to read request body");
            let response = error_response(
                StatusCode::BAD_REQUEST,
                "request body unreadable or too large",
                &request_id,
            );
            metrics::record_request(&method, response.status().as_u16(), start);
            return response;
        }
    };

    let response = match state.dispatcher.dispatch(&method, &path, headers, body) {
        Ok(Some(bytes)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/json".to_string()),
                (request_id_header(), request_id.clone()),
            ],
            bytes,
        )
            .into_response(),
        Ok(None) => (
            StatusCode::OK,
            [(request_id_header(), request_id.clone())],
        )
            .into_response(),
        Err(err) => {
            let status =
                StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            error_response(status, &err.to_string(), &request_id)
        }
    };

    metrics::record_request(&method, response.status().as_u16(), start);
    response
}

fn convert_headers(map: &HeaderMap) -> Headers {
    let mut headers = Headers::new();
    for (name, value) in map {
        if let Ok(value) = value.to_str() {
            headers.insert(name.as_str(), value);
        }
    }
    headers
}

fn request_id_header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

fn error_response(status: StatusCode, reason: &str, request_id: &str) -> Response {
    (
        status,
        [(request_id_header(), request_id.to_string())],
        Json(ErrorBody {
            error: reason.to_string(),
        }),
    )
        .into_response()
}
