//! Number and currency formatting (en-US conventions)

/// Format a monetary amount with zero fractional digits
///
/// Rounds half away from zero and groups thousands with commas:
/// `format_currency(45000.4, "USD") == "$45,000"`. Codes without a known
/// symbol are written as a prefix: `"CHF 1,200"`.
pub fn format_currency(value: f64, currency: &str) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = group_digits(&format!("{:.0}", rounded.abs()));

    match currency_symbol(currency) {
        Some(symbol) => format!("{}{}{}", sign, symbol, digits),
        None => format!("{}{} {}", sign, currency.to_ascii_uppercase(), digits),
    }
}

/// Symbol for the currencies the renderer knows about
pub fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_ascii_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "ILS" => Some("₪"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// Integer with thousands separators: `250000` → `"250,000"`
pub fn format_grouped(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Fixed-point decimal: `format_decimal(7.0, 2) == "7.00"`
pub fn format_decimal(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
