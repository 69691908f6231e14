//! Transport layer to the remote estimation service
//!
//! # Architecture
//!
//! - `EstimationBackend` trait: the only boundary between the application and
//!   the remote estimation capability
//! - `HttpEstimator`: reqwest implementation against the real service
//! - `MockEstimator`: scripted responses for tests and offline development
//!
//! # Endpoints
//!
//! - `POST {base_url}/api/tco/estimate` with `{make, model, year}`
//! - `GET {base_url}/health`
//!
//! Each call is fire-once: no retries, no caching.

mod http;
mod mock;

pub use http::HttpEstimator;
pub use mock::{sample_result, MockEstimator, MockResponse};

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{HealthStatus, TcoResult, VehicleInput};

/// Path of the estimate endpoint, relative to the base URL
pub const ESTIMATE_PATH: &str = "/api/tco/estimate";

/// Path of the liveness endpoint, relative to the base URL
pub const HEALTH_PATH: &str = "/health";

/// Interface to a TCO estimation service
#[async_trait]
pub trait EstimationBackend: Send + Sync {
    /// Submit a vehicle and return the service's estimate verbatim
    async fn estimate_tco(&self, vehicle: &VehicleInput) -> Result<TcoResult>;

    /// Liveness probe; never fails, unreachable services report `Error`
    async fn check_health(&self) -> HealthStatus;

    /// Base URL requests are sent to
    fn base_url(&self) -> &str;
}
