//! Pre-flight validation of vehicle input
//!
//! Runs before any request is made. A failure here never reaches the network.
//!
//! Rules:
//! - make/model: present, not blank after trimming, at most 50 characters
//! - year: a finite number, within [1900, current year + 1], and whole

use chrono::Datelike;
use thiserror::Error;

use crate::models::VehicleInput;

/// Maximum length of make and model, in characters
pub const MAX_NAME_LEN: usize = 50;

/// Oldest accepted model year
pub const MIN_YEAR: i32 = 1900;

/// Form field a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Make,
    Model,
    Year,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Make => "Make",
            Self::Model => "Model",
            Self::Year => "Year",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Input rejected before submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// A required field was left empty
    pub fn required(field: Field) -> Self {
        Self::new(field, format!("{} is required", field.label()))
    }
}

/// Current calendar year in local time
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Newest accepted model year (next year's models are allowed)
pub fn max_year(current_year: i32) -> i32 {
    current_year + 1
}

/// Validate raw form text against the current year
pub fn validate(make: &str, model: &str, year: &str) -> Result<VehicleInput, ValidationError> {
    validate_at(make, model, year, current_year())
}

/// Validate raw form text against an explicit current year
pub fn validate_at(
    make: &str,
    model: &str,
    year: &str,
    current_year: i32,
) -> Result<VehicleInput, ValidationError> {
    check_name(Field::Make, make)?;
    check_name(Field::Model, model)?;
    let year = parse_year(year, current_year)?;

    Ok(VehicleInput::new(make.trim(), model.trim(), year))
}

fn check_name(field: Field, value: &str) -> Result<(), ValidationError> {
    let label = field.label();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    if value.trim().is_empty() {
        return Err(ValidationError::new(
            field,
            format!("{} cannot be empty", label),
        ));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::new(
            field,
            format!("{} is too long (max {} characters)", label, MAX_NAME_LEN),
        ));
    }
    Ok(())
}

fn parse_year(text: &str, current_year: i32) -> Result<i32, ValidationError> {
    // f64 parsing accepts "inf" and "NaN", hence the explicit finiteness check
    let year: f64 = text
        .trim()
        .parse()
        .ok()
        .filter(|y: &f64| y.is_finite())
        .ok_or_else(|| ValidationError::new(Field::Year, "Year must be a valid number"))?;

    check_year_range(year, current_year)?;

    if year.fract() != 0.0 {
        return Err(ValidationError::new(
            Field::Year,
            "Year must be a whole number",
        ));
    }

    Ok(year as i32)
}

fn check_year_range(year: f64, current_year: i32) -> Result<(), ValidationError> {
    let max = max_year(current_year);
    if year < f64::from(MIN_YEAR) || year > f64::from(max) {
        return Err(ValidationError::new(
            Field::Year,
            format!("Year must be between {} and {}", MIN_YEAR, max),
        ));
    }
    Ok(())
}
