//! Consignment Error Types

use thiserror::Error;

use super::state::FormState;
use super::validation::FieldErrors;

/// Failures reported by the external collaborators
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request failed with status code {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Operations rejected by the form state machine
///
/// None of these change form state; the caller may simply try again later.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Form already mounted (state {0})")]
    AlreadyMounted(FormState),

    #[error("Form is not editable in state {0}")]
    NotEditable(FormState),

    #[error("Form cannot submit in state {0}")]
    NotReady(FormState),

    #[error("A submission is already in flight")]
    SubmitInFlight,

    #[error("Form has invalid fields: {0}")]
    InvalidForm(FieldErrors),

    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Units are required (got '{0}')")]
    InvalidUnit(String),
}

impl FormError {
    pub fn code(&self) -> &'static str {
        match self {
            FormError::AlreadyMounted(_) => "ALREADY_MOUNTED",
            FormError::NotEditable(_) => "NOT_EDITABLE",
            FormError::NotReady(_) => "NOT_READY",
            FormError::SubmitInFlight => "SUBMIT_IN_FLIGHT",
            FormError::InvalidForm(_) => "INVALID_FORM",
            FormError::UnknownLocation(_) => "UNKNOWN_LOCATION",
            FormError::InvalidUnit(_) => "INVALID_UNIT",
        }
    }
}
