//! Input form controller
//!
//! Owns the three form fields and the request state. A submission runs
//! required-field checks, then validation, then exactly one backend call.
//! `submit` borrows the controller mutably for the whole request, so a second
//! submission cannot start until the first has settled.

use tracing::debug;

use crate::client::EstimationBackend;
use crate::error::Error;
use crate::state::EstimateState;
use crate::validation::{self, Field, ValidationError};

/// Lower bound of the advisory year range offered as a hint
pub const YEAR_HINT_MIN: i32 = 2005;

/// Upper bound of the advisory year range offered as a hint
pub const YEAR_HINT_MAX: i32 = 2026;

/// Form state plus the backend it submits to
pub struct FormController<B: EstimationBackend> {
    backend: B,
    make: String,
    model: String,
    year: String,
    state: EstimateState,
    /// Error behind the current `Error` state
    last_error: Option<Error>,
    current_year: Option<i32>,
}

impl<B: EstimationBackend> FormController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            make: String::new(),
            model: String::new(),
            year: String::new(),
            state: EstimateState::Idle,
            last_error: None,
            current_year: None,
        }
    }

    /// Pin the year used for validation instead of the system clock
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    pub fn set_make(&mut self, value: impl Into<String>) {
        self.make = value.into();
    }

    pub fn set_model(&mut self, value: impl Into<String>) {
        self.model = value.into();
    }

    pub fn set_year(&mut self, value: impl Into<String>) {
        self.year = value.into();
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn state(&self) -> &EstimateState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Typed error behind the current `Error` state, if any
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// First required field left empty, if any
    pub fn missing_field(&self) -> Option<Field> {
        [
            (Field::Make, &self.make),
            (Field::Model, &self.model),
            (Field::Year, &self.year),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.state.is_loading() && self.missing_field().is_none()
    }

    /// Submit the form and wait for the outcome
    pub async fn submit(&mut self) -> &EstimateState {
        self.submit_observed(|_| {}).await
    }

    /// Submit the form, calling `observe` once the request is in flight
    ///
    /// `observe` sees the `Loading` state before the backend is awaited; it is
    /// not called when the submission is rejected locally.
    pub async fn submit_observed<F>(&mut self, mut observe: F) -> &EstimateState
    where
        F: FnMut(&EstimateState),
    {
        if self.state.is_loading() {
            debug!("Submit ignored: request already in flight");
            return &self.state;
        }

        self.last_error = None;

        if let Some(field) = self.missing_field() {
            return self.reject(ValidationError::required(field));
        }

        let current_year = self.current_year.unwrap_or_else(validation::current_year);
        let vehicle =
            match validation::validate_at(&self.make, &self.model, &self.year, current_year) {
                Ok(vehicle) => vehicle,
                Err(e) => return self.reject(e),
            };

        self.state.begin();
        observe(&self.state);

        let outcome = self.backend.estimate_tco(&vehicle).await;
        self.last_error = self.state.finish(outcome);
        &self.state
    }

    fn reject(&mut self, e: ValidationError) -> &EstimateState {
        debug!("Validation failed on {}: {}", e.field, e);
        let error = Error::from(e);
        self.state.reject(error.to_string());
        self.last_error = Some(error);
        &self.state
    }
}
