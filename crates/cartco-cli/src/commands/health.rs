//! Service health command

use cartco_core::{EstimationBackend, HealthStatus};
use tracing::warn;

/// Probe the estimation service; returns whether it answered healthy
pub async fn cmd_health<B: EstimationBackend>(backend: &B) -> bool {
    println!("🔍 Checking estimation service at {}...\n", backend.base_url());

    match backend.check_health().await {
        HealthStatus::Healthy { message } => {
            println!("   ✅ Service is up (status: {})", message);
            true
        }
        HealthStatus::Error => {
            warn!("Health probe failed for {}", backend.base_url());
            println!("   ❌ Service is not responding");
            println!("\nTo point cartco at another service:");
            println!("  - pass --api-url URL");
            println!("  - or set CARTCO_API_URL");
            println!("  - or set base_url under [client] in the config file");
            false
        }
    }
}
