//! Render snapshot
//!
//! Everything a presentation layer needs to draw the form, derived from the
//! state machine. Holds no decisions of its own.

use super::state::FormState;
use super::types::ConsignmentDraft;
use super::units::Unit;
use super::validation::{Field, FieldErrors};

pub const FETCHING_LOCATIONS_LABEL: &str = "fetching locations ...";

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub state: FormState,
    /// Loading indicator text, shown instead of the fields
    pub loader: Option<&'static str>,
    pub show_fields: bool,
    /// Blocking progress overlay
    pub show_progress: bool,
    pub submit_enabled: bool,
    pub locations: Vec<String>,
    pub draft: ConsignmentDraft,
    pub errors: FieldErrors,
}

impl FormView {
    pub(crate) fn new(
        state: FormState,
        valid: bool,
        locations: Vec<String>,
        draft: ConsignmentDraft,
        errors: FieldErrors,
    ) -> Self {
        Self {
            state,
            loader: (state == FormState::FetchingLocations).then_some(FETCHING_LOCATIONS_LABEL),
            show_fields: state.has_fields(),
            show_progress: state == FormState::Submitting,
            submit_enabled: valid && state == FormState::Ready,
            locations,
            draft,
            errors,
        }
    }

    /// Inline message for a field, if any
    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(field)
    }

    /// Options of the unit selector
    pub fn unit_options(&self) -> [Unit; 2] {
        Unit::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(state: FormState, valid: bool) -> FormView {
        FormView::new(
            state,
            valid,
            Vec::new(),
            ConsignmentDraft::default(),
            FieldErrors::default(),
        )
    }

    #[test]
    fn test_loader_only_while_fetching() {
        let fetching = view(FormState::FetchingLocations, false);
        assert_eq!(fetching.loader, Some("fetching locations ..."));
        assert!(!fetching.show_fields);

        assert_eq!(view(FormState::Ready, false).loader, None);
        assert_eq!(view(FormState::LocationsUnavailable, false).loader, None);
    }

    #[test]
    fn test_degraded_states_hide_fields() {
        assert!(!view(FormState::LocationsEmpty, true).show_fields);
        assert!(!view(FormState::LocationsUnavailable, true).show_fields);
        assert!(!view(FormState::LocationsEmpty, true).submit_enabled);
    }

    #[test]
    fn test_submitting_blocks_submit() {
        let submitting = view(FormState::Submitting, true);
        assert!(submitting.show_progress);
        assert!(submitting.show_fields);
        assert!(!submitting.submit_enabled);

        let ready = view(FormState::Ready, true);
        assert!(!ready.show_progress);
        assert!(ready.submit_enabled);

        assert!(!view(FormState::Ready, false).submit_enabled);
    }

    #[test]
    fn test_unit_options() {
        let v = view(FormState::Ready, true);
        assert_eq!(v.unit_options(), [Unit::Centimeters, Unit::Millimeters]);
    }
}
