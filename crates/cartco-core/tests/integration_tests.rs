//! Integration tests for cartco-core
//!
//! These tests exercise the full form → validate → HTTP → render workflow
//! against the mock estimation server.

use cartco_core::{
    client::sample_result,
    error::FALLBACK_ERROR_MESSAGE,
    render::{render_result, render_view},
    test_utils::{unreachable_url, MockBehavior, MockTcoServer},
    validation, ClientConfig, EstimateState, EstimationBackend, FormController, HealthStatus,
    HttpEstimator, RenderOptions, VehicleInput,
};

fn form_for(url: &str, make: &str, model: &str, year: &str) -> FormController<HttpEstimator> {
    let mut form = FormController::new(HttpEstimator::new(url)).with_current_year(2026);
    form.set_make(make);
    form.set_model(model);
    form.set_year(year);
    form
}

// =============================================================================
// Validation gates the network
// =============================================================================

#[tokio::test]
async fn test_valid_input_reaches_service() {
    let server = MockTcoServer::start().await;
    let longest = "M".repeat(50);

    for (make, model, year) in [
        ("Honda", "Civic", "2016"),
        ("Ford", "Model T", "1900"),
        ("Tesla", "Model Y", "2027"),
        (longest.as_str(), "X", "2010"),
    ] {
        let mut form = form_for(&server.url(), make, model, year);
        let state = form.submit().await;
        assert!(state.result().is_some(), "{} {} {}", make, model, year);
    }

    assert_eq!(server.requests().len(), 4);
}

#[tokio::test]
async fn test_invalid_names_never_reach_service() {
    let server = MockTcoServer::start().await;
    let long = "x".repeat(51);

    for (make, model) in [
        ("", "Civic"),
        ("Honda", ""),
        ("   ", "Civic"),
        (long.as_str(), "Civic"),
        ("Honda", long.as_str()),
    ] {
        let mut form = form_for(&server.url(), make, model, "2016");
        let state = form.submit().await;
        assert!(state.error().is_some(), "{:?} {:?}", make, model);
    }

    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_invalid_years_name_the_constraint() {
    let server = MockTcoServer::start().await;

    let cases = [
        ("1899", "Year must be between 1900 and 2027"),
        ("2005.5", "Year must be a whole number"),
        ("2028", "Year must be between 1900 and 2027"),
    ];
    for (year, expected) in cases {
        let mut form = form_for(&server.url(), "Honda", "Civic", year);
        let state = form.submit().await;
        assert_eq!(state.error(), Some(expected));
    }

    assert!(server.requests().is_empty());
}

#[test]
fn test_current_year_window() {
    let now = validation::current_year();
    assert!(validation::validate("Honda", "Civic", &(now + 1).to_string()).is_ok());
    let err = validation::validate("Honda", "Civic", &(now + 2).to_string()).unwrap_err();
    assert!(err.message.contains("Year must be between"));
}

// =============================================================================
// Response handling
// =============================================================================

#[tokio::test]
async fn test_cost_per_month_is_not_recomputed() {
    let mut result = sample_result(&VehicleInput::new("Honda", "Civic", 2016));
    result.lifetime.total_cost = 45000.0;
    result.lifetime.months = 120;
    result.lifetime.cost_per_month = 412.0;

    let server = MockTcoServer::start_with(MockBehavior::Result(Box::new(result)), true).await;
    let mut form = form_for(&server.url(), "Honda", "Civic", "2016");
    form.submit().await;

    let text = render_view(&form, &RenderOptions::default());
    assert!(text.contains("$412"));
    assert!(!text.contains("$375"));
}

#[tokio::test]
async fn test_server_detail_shown_verbatim() {
    let server = MockTcoServer::start_with(
        MockBehavior::Detail {
            status: 500,
            detail: "Unknown vehicle model".to_string(),
        },
        true,
    )
    .await;
    let mut form = form_for(&server.url(), "Foo", "Bar", "2020");

    let state = form.submit().await;
    assert_eq!(state, &EstimateState::Error("Unknown vehicle model".to_string()));

    let text = render_view(&form, &RenderOptions::default());
    assert!(text.contains("Error: Unknown vehicle model\n"));
}

#[tokio::test]
async fn test_server_error_without_detail_uses_fallback() {
    let server = MockTcoServer::start_with(MockBehavior::Status(500), true).await;
    let mut form = form_for(&server.url(), "Foo", "Bar", "2020");

    let state = form.submit().await;
    assert_eq!(state.error(), Some(FALLBACK_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_network_failure_is_generic_error() {
    let url = unreachable_url();
    let mut form = form_for(&url, "Honda", "Civic", "2016");

    let state = form.submit().await;
    let message = state.error().unwrap();
    assert!(message.starts_with("Could not reach the estimation service"));
    assert!(message.contains(&url));
    assert_ne!(message, FALLBACK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_form_usable_after_failure() {
    let url = unreachable_url();
    let mut form = form_for(&url, "Honda", "Civic", "2016");
    form.submit().await;
    assert!(form.state().error().is_some());
    assert!(form.can_submit());

    form.set_year("abc");
    form.submit().await;
    assert_eq!(form.state().error(), Some("Year must be a valid number"));
}

#[tokio::test]
async fn test_identical_calls_are_idempotent() {
    let server = MockTcoServer::start().await;
    let client = HttpEstimator::new(&server.url());
    let vehicle = VehicleInput::new("Honda", "Civic", 2016);

    let first = client.estimate_tco(&vehicle).await.unwrap();
    let second = client.estimate_tco(&vehicle).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        render_result(&first, &RenderOptions::default()),
        render_result(&second, &RenderOptions::default())
    );
}

#[tokio::test]
async fn test_request_body_is_trimmed_vehicle() {
    let server = MockTcoServer::start().await;
    let mut form = form_for(&server.url(), " Honda ", "Civic", "2016");
    form.submit().await;

    assert_eq!(
        server.requests(),
        vec![VehicleInput::new("Honda", "Civic", 2016)]
    );
}

// =============================================================================
// Health and configuration
// =============================================================================

#[tokio::test]
async fn test_health_probe() {
    let up = MockTcoServer::start().await;
    let down = MockTcoServer::start_with(MockBehavior::Sample, false).await;

    assert!(HttpEstimator::new(&up.url()).check_health().await.is_healthy());
    assert_eq!(
        HttpEstimator::new(&down.url()).check_health().await,
        HealthStatus::Error
    );
    assert_eq!(
        HttpEstimator::new(&unreachable_url()).check_health().await,
        HealthStatus::Error
    );
}

#[tokio::test]
async fn test_client_from_config() {
    let server = MockTcoServer::start().await;
    let config = ClientConfig::with_base_url(&format!("{}/", server.url())).unwrap();
    let client = HttpEstimator::from_config(&config).unwrap();

    assert_eq!(client.base_url(), server.url());
    let result = client
        .estimate_tco(&VehicleInput::new("Mazda", "3", 2019))
        .await
        .unwrap();
    assert_eq!(result.vehicle.model, "3");
}
