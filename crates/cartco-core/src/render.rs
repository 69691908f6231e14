//! Terminal rendering of the form and estimate state
//!
//! Pure projection: nothing here computes costs. Every amount shown is the
//! value the service returned, formatted with [`format_currency`].

use crate::client::EstimationBackend;
use crate::config::DEFAULT_CURRENCY;
use crate::form::FormController;
use crate::format::{currency_symbol, format_currency, format_decimal, format_grouped};
use crate::models::{Confidence, TcoResult};
use crate::state::EstimateState;

/// Shown below every result
pub const DISCLAIMER: &str = "Results are AI-generated estimates based on publicly available information. \
Actual costs may vary significantly based on individual usage, location, and vehicle condition.";

const RULE: &str = "   ─────────────────────────────────────────────────────────────";

const BOLD: &str = "1";
const DIM: &str = "2";
const RED: &str = "31";
const GREEN: &str = "32";
const YELLOW: &str = "33";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// ISO 4217 code for all amounts
    pub currency: String,
    /// Emit ANSI styling
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            color: false,
        }
    }
}

impl RenderOptions {
    fn paint(&self, text: &str, code: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    fn money(&self, value: f64) -> String {
        format_currency(value, &self.currency)
    }
}

/// Form summary followed by whatever the current state calls for
pub fn render_view<B: EstimationBackend>(
    form: &FormController<B>,
    opts: &RenderOptions,
) -> String {
    let mut out = render_form(form.make(), form.model(), form.year(), opts);
    let state = render_state(form.state(), opts);
    if !state.is_empty() {
        out.push('\n');
        out.push_str(&state);
    }
    out
}

/// The three form fields, with placeholders for empty ones
pub fn render_form(make: &str, model: &str, year: &str, opts: &RenderOptions) -> String {
    let field = |label: &str, value: &str, placeholder: &str| {
        if value.is_empty() {
            format!("   {:6} {}", label, opts.paint(placeholder, DIM))
        } else {
            format!("   {:6} {}", label, value)
        }
    };

    [
        String::new(),
        format!("🚗 {}", opts.paint("Car Lifetime TCO Calculator", BOLD)),
        "   Estimate the total cost of ownership for your vehicle".to_string(),
        RULE.to_string(),
        field("Make", make, "e.g., Honda"),
        field("Model", model, "e.g., Civic"),
        field("Year", year, "e.g., 2016"),
        String::new(),
    ]
    .join("\n")
}

/// Loading indicator, error box, result, or nothing when idle
pub fn render_state(state: &EstimateState, opts: &RenderOptions) -> String {
    match state {
        EstimateState::Idle => String::new(),
        EstimateState::Loading => format!("   {}\n", opts.paint("Calculating...", DIM)),
        EstimateState::Error(message) => render_error(message, opts),
        EstimateState::Success(result) => render_result(result, opts),
    }
}

/// Error box; the message is shown verbatim
pub fn render_error(message: &str, opts: &RenderOptions) -> String {
    format!("   {} {}\n", opts.paint("Error:", &format!("{};{}", BOLD, RED)), message)
}

/// Full report for a successful estimate
pub fn render_result(result: &TcoResult, opts: &RenderOptions) -> String {
    let mut lines = Vec::new();

    // Header
    let badge = format!("{} CONFIDENCE", result.confidence.as_str().to_uppercase());
    lines.push(format!(
        "📊 {}   {}",
        opts.paint(&result.vehicle.title(), BOLD),
        opts.paint(&badge, confidence_color(result.confidence))
    ));
    lines.push(RULE.to_string());

    // Summary cards
    let lifetime = &result.lifetime;
    let duration = format!("{} months", lifetime.months);
    lines.push(format!(
        "   {:22} {:18} {}",
        "Total Lifetime Cost", "Cost Per Month", "Duration"
    ));
    lines.push(format!(
        "   {:22} {:18} {}",
        opts.money(lifetime.total_cost),
        opts.money(lifetime.cost_per_month),
        duration
    ));
    lines.push(format!(
        "   {:22} {:18} {}",
        "",
        "",
        opts.paint(&format!("({})", lifetime.end_reason.label()), DIM)
    ));
    lines.push(String::new());

    // Breakdown table
    let breakdown = &result.breakdown;
    lines.push(format!("   {}", opts.paint("Cost Breakdown", BOLD)));
    for (label, value) in [
        ("Depreciation", breakdown.depreciation),
        ("Fuel", breakdown.fuel),
        ("Maintenance", breakdown.maintenance),
        ("Fees (Insurance, Registration, Taxes)", breakdown.fees),
    ] {
        lines.push(format!("   {:38} │ {:>12}", label, opts.money(value)));
    }
    lines.push(String::new());

    // Assumptions
    let assumptions = &result.assumptions_used;
    lines.push(format!("   {}", opts.paint("Assumptions Used", BOLD)));
    lines.push(format!(
        "   • Average km per year: {}",
        format_grouped(assumptions.km_per_year)
    ));
    lines.push(format!(
        "   • Fuel price per liter: {}",
        unit_price(assumptions.fuel_price_per_liter, &opts.currency)
    ));
    lines.push(format!(
        "   • Maximum vehicle age: {} years",
        assumptions.max_years
    ));
    lines.push(format!(
        "   • Maximum km: {}",
        format_grouped(assumptions.max_km)
    ));

    if !result.notes.is_empty() {
        lines.push(String::new());
        lines.push(format!("   {}", opts.paint("Notes", BOLD)));
        for note in &result.notes {
            lines.push(format!("   • {}", note));
        }
    }

    if !result.sources_used.is_empty() {
        lines.push(String::new());
        lines.push(format!("   {}", opts.paint("Sources", BOLD)));
        for source in &result.sources_used {
            lines.push(format!("   • {}", source.title));
            lines.push(format!("     {}", opts.paint(&source.url, DIM)));
            if !source.snippet.is_empty() {
                lines.push(format!("     {}", source.snippet));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!("   ⚠️  {}", opts.paint(DISCLAIMER, DIM)));
    lines.push(String::new());

    lines.join("\n")
}

fn confidence_color(confidence: Confidence) -> &'static str {
    match confidence {
        Confidence::High => GREEN,
        Confidence::Medium => YELLOW,
        Confidence::Low => RED,
    }
}

/// Price with two decimals, e.g. `$7.00`
fn unit_price(value: f64, currency: &str) -> String {
    match currency_symbol(currency) {
        Some(symbol) => format!("{}{}", symbol, format_decimal(value, 2)),
        None => format!(
            "{} {}",
            currency.to_ascii_uppercase(),
            format_decimal(value, 2)
        ),
    }
}
