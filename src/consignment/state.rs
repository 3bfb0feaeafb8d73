//! Form FSM State Definitions

use std::fmt;

/// Form lifecycle states
///
/// ```text
/// UNINITIALIZED → FETCHING_LOCATIONS → READY → SUBMITTING → SUBMIT_SUCCEEDED → READY
///                        ↓                          ↓
///          LOCATIONS_EMPTY / LOCATIONS_UNAVAILABLE   SUBMIT_FAILED → READY
/// ```
///
/// `LocationsEmpty` and `LocationsUnavailable` are terminal for the mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormState {
    /// Created, locations not requested yet
    Uninitialized,

    /// Location request in flight
    FetchingLocations,

    /// Editable
    Ready,

    /// Submission in flight, editing and submit disabled
    Submitting,

    /// Submitter resolved; draft reset, notification pending
    SubmitSucceeded,

    /// Submitter rejected; draft kept, notification pending
    SubmitFailed,

    /// Terminal: provider answered with no locations
    LocationsEmpty,

    /// Terminal: provider request failed
    LocationsUnavailable,
}

impl FormState {
    /// Terminal for the current mount (no transition leaves this state)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FormState::LocationsEmpty | FormState::LocationsUnavailable
        )
    }

    /// Locations are loaded and the field controls exist
    #[inline]
    pub fn has_fields(&self) -> bool {
        matches!(
            self,
            FormState::Ready
                | FormState::Submitting
                | FormState::SubmitSucceeded
                | FormState::SubmitFailed
        )
    }

    #[inline]
    pub fn is_editable(&self) -> bool {
        matches!(self, FormState::Ready)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormState::Uninitialized => "UNINITIALIZED",
            FormState::FetchingLocations => "FETCHING_LOCATIONS",
            FormState::Ready => "READY",
            FormState::Submitting => "SUBMITTING",
            FormState::SubmitSucceeded => "SUBMIT_SUCCEEDED",
            FormState::SubmitFailed => "SUBMIT_FAILED",
            FormState::LocationsEmpty => "LOCATIONS_EMPTY",
            FormState::LocationsUnavailable => "LOCATIONS_UNAVAILABLE",
        }
    }
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(FormState::LocationsEmpty.is_terminal());
        assert!(FormState::LocationsUnavailable.is_terminal());

        assert!(!FormState::Uninitialized.is_terminal());
        assert!(!FormState::FetchingLocations.is_terminal());
        assert!(!FormState::Ready.is_terminal());
        assert!(!FormState::Submitting.is_terminal());
    }

    #[test]
    fn test_fields_only_after_locations_loaded() {
        assert!(!FormState::Uninitialized.has_fields());
        assert!(!FormState::FetchingLocations.has_fields());
        assert!(!FormState::LocationsEmpty.has_fields());
        assert!(!FormState::LocationsUnavailable.has_fields());

        assert!(FormState::Ready.has_fields());
        assert!(FormState::Submitting.has_fields());
    }

    #[test]
    fn test_only_ready_is_editable() {
        assert!(FormState::Ready.is_editable());
        assert!(!FormState::Submitting.is_editable());
        assert!(!FormState::FetchingLocations.is_editable());
        assert!(!FormState::SubmitFailed.is_editable());
    }

    #[test]
    fn test_display() {
        assert_eq!(FormState::Ready.to_string(), "READY");
        assert_eq!(
            FormState::LocationsUnavailable.to_string(),
            "LOCATIONS_UNAVAILABLE"
        );
    }
}
