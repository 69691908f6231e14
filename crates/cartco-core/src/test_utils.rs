//! Test utilities for cartco-core
//!
//! This module provides a mock estimation service that speaks the same HTTP
//! contract as the real one, for integration tests and offline development.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::sync::oneshot;

use crate::client::sample_result;
use crate::models::{TcoResult, VehicleInput};

/// How the mock answers `POST /api/tco/estimate`
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// 200 with [`sample_result`] for the submitted vehicle
    Sample,
    /// 200 with this exact result
    Result(Box<TcoResult>),
    /// Error status with `{"detail": ...}`
    Detail { status: u16, detail: String },
    /// Error status with an empty JSON object
    Status(u16),
    /// Any status with a raw, possibly non-JSON body
    Raw { status: u16, body: String },
    /// 200 with [`sample_result`], after sleeping this long
    Delay(Duration),
}

/// How the mock answers `GET /health`
#[derive(Debug, Clone)]
pub enum MockHealth {
    /// 200 with `{"status": "healthy"}`
    Up,
    /// 503 with `{"status": "down"}`
    Down,
    /// 200 with this raw body
    Body(String),
}

struct ServerState {
    behavior: MockBehavior,
    health: MockHealth,
    requests: Mutex<Vec<VehicleInput>>,
}

/// Mock estimation server for testing and development
pub struct MockTcoServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    state: Arc<ServerState>,
}

impl MockTcoServer {
    /// Start a healthy server answering with sample estimates
    pub async fn start() -> Self {
        Self::start_with(MockBehavior::Sample, true).await
    }

    /// Start the mock server on an available port
    pub async fn start_with(behavior: MockBehavior, healthy: bool) -> Self {
        let health = if healthy { MockHealth::Up } else { MockHealth::Down };
        Self::start_full(behavior, health).await
    }

    /// Start a server answering with sample estimates and a scripted health reply
    pub async fn start_with_health(health: MockHealth) -> Self {
        Self::start_full(MockBehavior::Sample, health).await
    }

    async fn start_full(behavior: MockBehavior, health: MockHealth) -> Self {
        let state = Arc::new(ServerState {
            behavior,
            health,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/tco/estimate", post(handle_estimate))
            .route("/health", get(handle_health))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            state,
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Vehicles received so far, in arrival order
    pub fn requests(&self) -> Vec<VehicleInput> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockTcoServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Base URL with nothing listening behind it
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn handle_estimate(
    State(state): State<Arc<ServerState>>,
    Json(vehicle): Json<VehicleInput>,
) -> Response {
    state.requests.lock().unwrap().push(vehicle.clone());

    match &state.behavior {
        MockBehavior::Sample => Json(sample_result(&vehicle)).into_response(),
        MockBehavior::Result(result) => Json(result.as_ref().clone()).into_response(),
        MockBehavior::Detail { status, detail } => (
            status_code(*status),
            Json(serde_json::json!({ "detail": detail })),
        )
            .into_response(),
        MockBehavior::Status(status) => {
            (status_code(*status), Json(serde_json::json!({}))).into_response()
        }
        MockBehavior::Raw { status, body } => (status_code(*status), body.clone()).into_response(),
        MockBehavior::Delay(delay) => {
            tokio::time::sleep(*delay).await;
            Json(sample_result(&vehicle)).into_response()
        }
    }
}

async fn handle_health(State(state): State<Arc<ServerState>>) -> Response {
    match &state.health {
        MockHealth::Up => Json(serde_json::json!({ "status": "healthy" })).into_response(),
        MockHealth::Down => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "down" })),
        )
            .into_response(),
        MockHealth::Body(body) => (StatusCode::OK, body.clone()).into_response(),
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
