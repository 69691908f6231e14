//! cartco Core Library
//!
//! Client-side functionality for the vehicle total-cost-of-ownership tool:
//! - Request/response contract with the remote estimation service
//! - Pre-flight validation of vehicle input
//! - HTTP transport with a pluggable backend trait
//! - Form controller and request state machine
//! - Report rendering and currency formatting
//! - Layered client configuration
//!
//! The estimate itself is computed by the remote service; nothing here
//! recomputes or reconciles its figures.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod format;
pub mod models;
pub mod render;
pub mod state;
pub mod validation;

/// Test utilities including mock estimation server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::{EstimationBackend, HttpEstimator, MockEstimator};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use form::FormController;
pub use models::{
    Assumptions, Breakdown, Confidence, EndReason, HealthStatus, Lifetime, Source, TcoResult,
    VehicleInfo, VehicleInput,
};
pub use render::RenderOptions;
pub use state::EstimateState;
pub use validation::{validate, ValidationError};
