//! HTTP client for the estimation service

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result, FALLBACK_ERROR_MESSAGE};
use crate::models::{HealthStatus, TcoResult, VehicleInput};

use super::{EstimationBackend, ESTIMATE_PATH, HEALTH_PATH};

/// reqwest-backed estimation client
///
/// Build with [`HttpEstimator::from_config`] to pick up the configured
/// timeout; [`HttpEstimator::new`] waits indefinitely.
#[derive(Clone)]
pub struct HttpEstimator {
    http_client: Client,
    base_url: String,
}

impl HttpEstimator {
    /// Create a client without a request timeout
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from resolved configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn network_error(&self, source: reqwest::Error) -> Error {
        warn!("No response from {}: {}", self.base_url, source);
        Error::Network {
            base_url: self.base_url.clone(),
            reason: source.to_string(),
        }
    }
}

/// Error payload returned with non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Health endpoint payload
#[derive(Debug, Deserialize)]
struct HealthBody {
    status: Option<String>,
}

/// Extract a usable `detail` message from an error body
///
/// Only non-empty string details count; structured details (validation
/// error lists) fall back to the generic message.
fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.is_empty() => Some(detail),
        _ => None,
    }
}

#[async_trait]
impl EstimationBackend for HttpEstimator {
    async fn estimate_tco(&self, vehicle: &VehicleInput) -> Result<TcoResult> {
        let url = self.url(ESTIMATE_PATH);
        debug!(
            "POST {} ({} {} {})",
            url, vehicle.year, vehicle.make, vehicle.model
        );

        let response = self
            .http_client
            .post(&url)
            .json(vehicle)
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Estimate failed with {}: {}", status, body);
            let message =
                error_detail(&body).unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
            return Err(Error::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(|e| self.network_error(e))?;
        let result: TcoResult =
            serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))?;

        info!(
            "Estimate for {}: total {:.0}, {} months",
            result.vehicle.title(),
            result.lifetime.total_cost,
            result.lifetime.months
        );
        if let Some(diff) = result.breakdown_mismatch() {
            warn!(
                "Breakdown differs from reported total by {:.2}; showing service values as-is",
                diff
            );
        }

        Ok(result)
    }

    async fn check_health(&self) -> HealthStatus {
        let url = self.url(HEALTH_PATH);
        debug!("GET {}", url);

        let response = match self.http_client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                warn!("Health check returned {}", resp.status());
                return HealthStatus::Error;
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                return HealthStatus::Error;
            }
        };

        match response.json::<HealthBody>().await {
            Ok(body) => HealthStatus::Healthy {
                message: body.status.unwrap_or_else(|| "unknown".to_string()),
            },
            Err(e) => {
                warn!("Health check body unreadable: {}", e);
                HealthStatus::Error
            }
        }
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
