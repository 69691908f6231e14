//! Mock backend for testing
//!
//! Returns scripted responses without any network access. Useful for unit
//! tests and development without a running estimation service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result, FALLBACK_ERROR_MESSAGE};
use crate::models::{
    Assumptions, Breakdown, Confidence, EndReason, HealthStatus, Lifetime, Source, TcoResult,
    VehicleInfo, VehicleInput,
};

use super::EstimationBackend;

/// What the mock answers to `estimate_tco`
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Echo the vehicle into [`sample_result`]
    Sample,
    /// Return this exact result
    Result(Box<TcoResult>),
    /// Fail as if the service answered non-2xx
    ServerError { status: u16, detail: Option<String> },
    /// Fail as if no response was obtained
    Unreachable,
}

/// Mock estimation backend for testing
#[derive(Debug, Clone)]
pub struct MockEstimator {
    response: MockResponse,
    healthy: bool,
    calls: Arc<AtomicUsize>,
}

impl Default for MockEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEstimator {
    /// Healthy mock answering with [`sample_result`]
    pub fn new() -> Self {
        Self {
            response: MockResponse::Sample,
            healthy: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Mock answering with a fixed result
    pub fn with_result(result: TcoResult) -> Self {
        Self {
            response: MockResponse::Result(Box::new(result)),
            ..Self::new()
        }
    }

    /// Mock failing with a server error
    pub fn server_error(status: u16, detail: Option<&str>) -> Self {
        Self {
            response: MockResponse::ServerError {
                status,
                detail: detail.map(str::to_string),
            },
            ..Self::new()
        }
    }

    /// Mock that behaves like an unreachable service
    pub fn unreachable() -> Self {
        Self {
            response: MockResponse::Unreachable,
            healthy: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `estimate_tco` calls made so far (shared across clones)
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EstimationBackend for MockEstimator {
    async fn estimate_tco(&self, vehicle: &VehicleInput) -> Result<TcoResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.response {
            MockResponse::Sample => Ok(sample_result(vehicle)),
            MockResponse::Result(result) => Ok(result.as_ref().clone()),
            MockResponse::ServerError { status, detail } => Err(Error::Server {
                status: *status,
                message: detail
                    .clone()
                    .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string()),
            }),
            MockResponse::Unreachable => Err(Error::Network {
                base_url: self.base_url().to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }

    async fn check_health(&self) -> HealthStatus {
        if self.healthy {
            HealthStatus::Healthy {
                message: "healthy".to_string(),
            }
        } else {
            HealthStatus::Error
        }
    }

    fn base_url(&self) -> &str {
        "mock://estimator"
    }
}

/// Deterministic estimate for a vehicle
///
/// Totals reconcile with the breakdown; `costPerMonth` is deliberately not
/// `totalCost / months` so renderers can be checked for recomputation.
pub fn sample_result(vehicle: &VehicleInput) -> TcoResult {
    let name = format!("{} {} {}", vehicle.year, vehicle.make, vehicle.model);

    TcoResult {
        vehicle: VehicleInfo {
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
        },
        lifetime: Lifetime {
            total_cost: 45_000.0,
            cost_per_month: 380.0,
            months: 120,
            end_reason: EndReason::MaxYears,
        },
        breakdown: Breakdown {
            depreciation: 15_000.0,
            fuel: 20_000.0,
            maintenance: 6_000.0,
            fees: 4_000.0,
        },
        assumptions_used: Assumptions {
            km_per_year: 15_000,
            fuel_price_per_liter: 7.0,
            max_years: 20,
            max_km: 250_000,
        },
        sources_used: vec![
            Source {
                title: format!("{} Fuel Economy", name),
                url: "https://www.fueleconomy.gov/".to_string(),
                snippet: "Average fuel consumption varies between 7-10 L/100km.".to_string(),
            },
            Source {
                title: format!("{} {} Maintenance Costs", vehicle.make, vehicle.model),
                url: "https://www.edmunds.com/".to_string(),
                snippet: "Annual maintenance typically ranges from $500-$1200.".to_string(),
            },
        ],
        confidence: Confidence::Medium,
        notes: vec![
            "Depreciation slows after the first five years.".to_string(),
            "Fuel cost assumes average mixed driving.".to_string(),
        ],
    }
}
