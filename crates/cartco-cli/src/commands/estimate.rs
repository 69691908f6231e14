//! One-shot estimate command

use std::io::{self, Write};

use anyhow::{Context, Result};
use cartco_core::render::{render_state, render_view};
use cartco_core::{EstimateState, EstimationBackend, FormController, RenderOptions};
use tracing::debug;

/// Estimate one vehicle and print the report to stdout
///
/// Returns `false` when the estimate ended in an error state.
pub async fn cmd_estimate<B: EstimationBackend>(
    backend: B,
    make: &str,
    model: &str,
    year: &str,
    json: bool,
    opts: &RenderOptions,
) -> Result<bool> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    estimate_to(backend, make, model, year, json, opts, &mut out).await
}

/// Estimate one vehicle, writing the report or JSON to `out`
pub async fn estimate_to<B: EstimationBackend, W: Write>(
    backend: B,
    make: &str,
    model: &str,
    year: &str,
    json: bool,
    opts: &RenderOptions,
    out: &mut W,
) -> Result<bool> {
    debug!("Estimating via {}", backend.base_url());

    let mut form = FormController::new(backend);
    form.set_make(make);
    form.set_model(model);
    form.set_year(year);

    form.submit_observed(|state| {
        // Loading indicator goes to stderr so stdout holds only the report
        if !json {
            eprint!("{}", render_state(state, opts));
        }
    })
    .await;

    if json {
        let value = match form.state() {
            EstimateState::Success(result) => serde_json::to_value(result.as_ref())?,
            EstimateState::Error(message) => {
                let error = form.last_error();
                serde_json::json!({
                    "detail": message,
                    "validation": error.is_some_and(|e| e.is_validation()),
                    "status": error.and_then(|e| e.status()),
                })
            }
            EstimateState::Idle | EstimateState::Loading => serde_json::Value::Null,
        };
        let text = serde_json::to_string_pretty(&value).context("Failed to serialize result")?;
        writeln!(out, "{}", text)?;
    } else {
        write!(out, "{}", render_view(&form, opts))?;
    }

    Ok(form.state().result().is_some())
}
