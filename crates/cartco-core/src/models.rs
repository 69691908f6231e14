//! Data contracts shared with the estimation service
//!
//! All wire names are camelCase. Results are immutable snapshots: the client
//! renders what the service returned and never recomputes totals.

use serde::{Deserialize, Serialize};

/// Tolerance (in currency units) used when checking breakdown against totals
pub const RECONCILE_TOLERANCE: f64 = 1.0;

/// Vehicle description sent to the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInput {
    pub make: String,
    pub model: String,
    pub year: i32,
}

impl VehicleInput {
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: i32) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
        }
    }
}

/// Vehicle as echoed back by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub make: String,
    pub model: String,
    pub year: i32,
}

impl VehicleInfo {
    /// "2016 Honda Civic"
    pub fn title(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

/// Why the modeled lifetime ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndReason {
    /// Vehicle reaches the maximum age
    MaxYears,
    /// Vehicle reaches the maximum odometer distance
    MaxKm,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxYears => "maxYears",
            Self::MaxKm => "maxKm",
        }
    }

    /// Human-readable label shown under the duration card
    pub fn label(&self) -> &'static str {
        match self {
            Self::MaxYears => "Max age reached",
            Self::MaxKm => "Max km reached",
        }
    }
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse reliability label attached to an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifetime summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifetime {
    pub total_cost: f64,
    pub cost_per_month: f64,
    pub months: u32,
    pub end_reason: EndReason,
}

/// Lifetime cost split by component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub depreciation: f64,
    pub fuel: f64,
    pub maintenance: f64,
    pub fees: f64,
}

impl Breakdown {
    /// Sum of all four components
    pub fn sum(&self) -> f64 {
        self.depreciation + self.fuel + self.maintenance + self.fees
    }

    /// Whether the components add up to `total` within `tolerance`
    pub fn reconciles_with(&self, total: f64, tolerance: f64) -> bool {
        (self.sum() - total).abs() <= tolerance
    }
}

/// Assumptions the service used for the estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    pub km_per_year: u64,
    pub fuel_price_per_liter: f64,
    pub max_years: u32,
    pub max_km: u64,
}

/// Provenance cited for an estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Full estimate returned by `POST /api/tco/estimate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcoResult {
    pub vehicle: VehicleInfo,
    pub lifetime: Lifetime,
    pub breakdown: Breakdown,
    pub assumptions_used: Assumptions,
    #[serde(default)]
    pub sources_used: Vec<Source>,
    pub confidence: Confidence,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl TcoResult {
    /// Difference between the breakdown sum and the reported total, when it
    /// exceeds [`RECONCILE_TOLERANCE`]
    pub fn breakdown_mismatch(&self) -> Option<f64> {
        if self
            .breakdown
            .reconciles_with(self.lifetime.total_cost, RECONCILE_TOLERANCE)
        {
            None
        } else {
            Some(self.breakdown.sum() - self.lifetime.total_cost)
        }
    }
}

/// Result of the liveness probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service answered 2xx; `message` is its reported status
    Healthy { message: String },
    /// Service unreachable or answered with an error status
    Error,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy { .. })
    }
}
