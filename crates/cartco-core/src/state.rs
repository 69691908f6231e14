//! Request state for one estimate at a time
//!
//! Transitions: `Idle → Loading → (Success | Error)`, and any settled state
//! back to `Loading` on the next submission. Validation failures go straight
//! to `Error` without passing through `Loading`. Result and error are
//! mutually exclusive by construction.

use tracing::warn;

use crate::error::{Error, Result};
use crate::models::TcoResult;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EstimateState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Last attempt succeeded
    Success(Box<TcoResult>),
    /// Last attempt failed; the message is shown verbatim
    Error(String),
}

impl EstimateState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&TcoResult> {
        match self {
            Self::Success(result) => Some(result.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Enter `Loading`, discarding any previous result or error
    ///
    /// Returns false (and changes nothing) if a request is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        *self = Self::Loading;
        true
    }

    /// Settle an in-flight request
    ///
    /// Ignored unless the state is `Loading`. Returns the error that was
    /// recorded, if any, so callers can inspect its kind.
    pub fn finish(&mut self, outcome: Result<TcoResult>) -> Option<Error> {
        if !self.is_loading() {
            warn!("Ignoring estimate outcome with no request in flight");
            return None;
        }
        match outcome {
            Ok(result) => {
                *self = Self::Success(Box::new(result));
                None
            }
            Err(e) => {
                *self = Self::Error(e.to_string());
                Some(e)
            }
        }
    }

    /// Record a failure detected before any request was made
    pub fn reject(&mut self, message: impl Into<String>) {
        *self = Self::Error(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::sample_result;
    use crate::models::VehicleInput;

    fn sample() -> TcoResult {
        sample_result(&VehicleInput::new("Honda", "Civic", 2016))
    }

    #[test]
    fn test_default_is_idle() {
        let state = EstimateState::default();
        assert_eq!(state, EstimateState::Idle);
        assert!(state.result().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_success_flow() {
        let mut state = EstimateState::Idle;
        assert!(state.begin());
        assert!(state.is_loading());

        state.finish(Ok(sample()));
        assert_eq!(state.result().unwrap().vehicle.model, "Civic");
        assert!(state.error().is_none());
    }

    #[test]
    fn test_error_flow() {
        let mut state = EstimateState::Idle;
        state.begin();
        let err = state.finish(Err(Error::Server {
            status: 404,
            message: "Unknown vehicle model".to_string(),
        }));
        assert_eq!(err.and_then(|e| e.status()), Some(404));
        assert_eq!(state.error(), Some("Unknown vehicle model"));
        assert!(state.result().is_none());
    }

    #[test]
    fn test_begin_rejected_while_loading() {
        let mut state = EstimateState::Loading;
        assert!(!state.begin());
        assert!(state.is_loading());
    }

    #[test]
    fn test_begin_clears_previous_outcome() {
        let mut state = EstimateState::Success(Box::new(sample()));
        assert!(state.begin());
        assert!(state.result().is_none());

        let mut state = EstimateState::Error("boom".to_string());
        assert!(state.begin());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_finish_without_begin_ignored() {
        let mut state = EstimateState::Idle;
        assert!(state.finish(Ok(sample())).is_none());
        assert_eq!(state, EstimateState::Idle);

        let err = state.finish(Err(Error::Config("late".to_string())));
        assert!(err.is_none());
        assert_eq!(state, EstimateState::Idle);
    }

    #[test]
    fn test_reject_replaces_result() {
        let mut state = EstimateState::Success(Box::new(sample()));
        state.reject("Make is required");
        assert_eq!(state.error(), Some("Make is required"));
        assert!(state.result().is_none());
    }
}
