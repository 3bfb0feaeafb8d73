//! Consignment Form
//!
//! Owns the draft, the field errors and both lifecycles (location fetch and
//! submission) and drives every state transition.
//!
//! The form is shared as `Arc<ConsignmentForm>` between event handlers. The
//! inner lock is never held across an `.await`: each operation takes the lock,
//! transitions, releases, suspends on the collaborator, then takes it again.
//! `submit` moves to `Submitting` before its first suspension point, which is
//! what rejects a second submit while one is in flight.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};

use super::adapters::{ConsignmentSubmitter, LocationProvider, NotificationSink};
use super::error::{ApiError, FormError};
use super::state::FormState;
use super::types::{ConsignmentDraft, ConsignmentId, ConsignmentRecord, LocationSet, SubmissionPayload};
use super::units::{Unit, convert};
use super::validation::{Field, FieldErrors, validate_all, validate_field};
use super::view::FormView;

pub const SUCCESS_MESSAGE: &str = "Form submitted successfully";

/// Result of a submission that reached the submitter
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Succeeded(ConsignmentRecord),
    Failed(ApiError),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }
}

struct FormInner {
    state: FormState,
    draft: ConsignmentDraft,
    /// Only fields validated by an edit (or a rejected submit) appear here
    errors: FieldErrors,
    locations: LocationSet,
    last_outcome: Option<SubmitOutcome>,
}

impl FormInner {
    fn transition(&mut self, to: FormState) {
        info!(from = %self.state, to = %to, "Form state transition");
        self.state = to;
    }

    fn revalidate(&mut self, fields: &[Field]) {
        for &field in fields {
            let outcome = validate_field(&self.draft, field);
            self.errors.apply(field, outcome);
            for &dependent in field.dependents() {
                let outcome = validate_field(&self.draft, dependent);
                self.errors.apply(dependent, outcome);
            }
        }
    }
}

/// Consignment form state machine
pub struct ConsignmentForm {
    provider: Arc<dyn LocationProvider>,
    submitter: Arc<dyn ConsignmentSubmitter>,
    notifier: Arc<dyn NotificationSink>,
    inner: Mutex<FormInner>,
}

impl ConsignmentForm {
    pub fn new(
        provider: Arc<dyn LocationProvider>,
        submitter: Arc<dyn ConsignmentSubmitter>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            provider,
            submitter,
            notifier,
            inner: Mutex::new(FormInner {
                state: FormState::Uninitialized,
                draft: ConsignmentDraft::default(),
                errors: FieldErrors::default(),
                locations: LocationSet::default(),
                last_outcome: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormInner> {
        // No invariant spans a panic point, so a poisoned lock is still consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    pub fn state(&self) -> FormState {
        self.lock().state
    }

    pub fn draft(&self) -> ConsignmentDraft {
        self.lock().draft.clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.lock().errors.clone()
    }

    pub fn locations(&self) -> LocationSet {
        self.lock().locations.clone()
    }

    pub fn last_outcome(&self) -> Option<SubmitOutcome> {
        self.lock().last_outcome.clone()
    }

    /// Every field validates, regardless of which ones were edited
    pub fn is_valid(&self) -> bool {
        validate_all(&self.lock().draft).is_empty()
    }

    /// Submit control enabled
    pub fn can_submit(&self) -> bool {
        let inner = self.lock();
        inner.state == FormState::Ready && validate_all(&inner.draft).is_empty()
    }

    /// What a renderer should show right now
    pub fn view(&self) -> FormView {
        let inner = self.lock();
        let valid = validate_all(&inner.draft).is_empty();
        FormView::new(
            inner.state,
            valid,
            inner.locations.as_slice().to_vec(),
            inner.draft.clone(),
            inner.errors.clone(),
        )
    }

    // ========================================================================
    // Location fetch
    // ========================================================================

    /// Request locations once and populate the default route.
    ///
    /// Returns the state reached. An empty list or a failed request leaves
    /// the form without fields for the rest of this mount; there is no retry.
    pub async fn mount(&self) -> Result<FormState, FormError> {
        {
            let mut inner = self.lock();
            if inner.state != FormState::Uninitialized {
                warn!(state = %inner.state, "Mount ignored, form already mounted");
                return Err(FormError::AlreadyMounted(inner.state));
            }
            inner.transition(FormState::FetchingLocations);
        }

        let result = self.provider.fetch_locations().await;

        let mut inner = self.lock();
        match result {
            Ok(locations) if locations.is_empty() => {
                warn!(provider = self.provider.name(), "Provider returned no locations");
                inner.transition(FormState::LocationsEmpty);
            }
            Ok(locations) => {
                let locations = LocationSet::new(locations);
                inner.draft.source = locations.get(0).unwrap_or_default().to_string();
                inner.draft.destination = locations.get(1).unwrap_or_default().to_string();
                debug!(
                    count = locations.len(),
                    source = %inner.draft.source,
                    destination = %inner.draft.destination,
                    "Locations loaded"
                );
                inner.locations = locations;
                inner.transition(FormState::Ready);
            }
            Err(e) => {
                error!(provider = self.provider.name(), error = %e, "Error fetching locations");
                inner.transition(FormState::LocationsUnavailable);
            }
        }
        Ok(inner.state)
    }

    // ========================================================================
    // Field edits
    // ========================================================================

    /// Apply an edit in `Ready` and re-validate the fields it reports as changed
    fn edit(
        &self,
        apply: impl FnOnce(&mut FormInner) -> Result<&'static [Field], FormError>,
    ) -> Result<(), FormError> {
        let mut inner = self.lock();
        if !inner.state.is_editable() {
            debug!(state = %inner.state, "Edit rejected");
            return Err(FormError::NotEditable(inner.state));
        }
        let changed = apply(&mut inner)?;
        inner.revalidate(changed);
        Ok(())
    }

    fn check_location(inner: &FormInner, location: &str) -> Result<(), FormError> {
        if location.is_empty() || inner.locations.contains(location) {
            Ok(())
        } else {
            Err(FormError::UnknownLocation(location.to_string()))
        }
    }

    /// Select the source location (empty string clears it)
    pub fn set_source(&self, location: &str) -> Result<(), FormError> {
        self.edit(|inner| {
            Self::check_location(inner, location)?;
            inner.draft.source = location.to_string();
            Ok(&[Field::Source])
        })
    }

    /// Select the destination location (empty string clears it)
    pub fn set_destination(&self, location: &str) -> Result<(), FormError> {
        self.edit(|inner| {
            Self::check_location(inner, location)?;
            inner.draft.destination = location.to_string();
            Ok(&[Field::Destination])
        })
    }

    /// Weight in kilograms
    pub fn set_weight(&self, kg: f64) -> Result<(), FormError> {
        self.edit(|inner| {
            inner.draft.weight = kg;
            Ok(&[Field::Weight])
        })
    }

    pub fn set_width(&self, value: f64) -> Result<(), FormError> {
        self.edit(|inner| {
            inner.draft.width = value;
            Ok(&[Field::Width])
        })
    }

    pub fn set_height(&self, value: f64) -> Result<(), FormError> {
        self.edit(|inner| {
            inner.draft.height = value;
            Ok(&[Field::Height])
        })
    }

    pub fn set_depth(&self, value: f64) -> Result<(), FormError> {
        self.edit(|inner| {
            inner.draft.depth = value;
            Ok(&[Field::Depth])
        })
    }

    /// Change the dimension unit and rescale width, height and depth.
    ///
    /// Selecting the unit already in use is not a change and converts nothing.
    /// All three dimensions are converted before any of them is re-validated.
    pub fn set_units(&self, unit: Unit) -> Result<(), FormError> {
        self.edit(|inner| {
            if inner.draft.units == unit {
                return Ok(&[]);
            }
            let draft = &mut inner.draft;
            draft.units = unit;
            draft.width = convert(unit, draft.width);
            draft.height = convert(unit, draft.height);
            draft.depth = convert(unit, draft.depth);
            debug!(
                units = %unit,
                width = draft.width,
                height = draft.height,
                depth = draft.depth,
                "Dimensions converted"
            );
            Ok(&[Field::Units, Field::Width, Field::Height, Field::Depth])
        })
    }

    /// Unit selection from its display name
    pub fn set_units_text(&self, text: &str) -> Result<(), FormError> {
        let unit = text
            .parse::<Unit>()
            .map_err(|_| FormError::InvalidUnit(text.to_string()))?;
        self.set_units(unit)
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Submit the current draft.
    ///
    /// Rejected with `Err` (no collaborator call) unless the form is `Ready`
    /// and every field validates. Once the submitter has been called the
    /// outcome is always `Ok`: failures are reported through the notification
    /// sink and the draft is kept for a retry.
    pub async fn submit(&self) -> Result<SubmitOutcome, FormError> {
        let payload = {
            let mut inner = self.lock();
            match inner.state {
                FormState::Ready => {}
                FormState::Submitting => {
                    debug!("Submit ignored, submission in flight");
                    return Err(FormError::SubmitInFlight);
                }
                other => return Err(FormError::NotReady(other)),
            }

            let errors = validate_all(&inner.draft);
            if !errors.is_empty() {
                debug!(%errors, "Submit rejected, form invalid");
                inner.errors = errors.clone();
                return Err(FormError::InvalidForm(errors));
            }

            let payload = SubmissionPayload::from_draft(ConsignmentId::generate(), &inner.draft);
            inner.last_outcome = None;
            inner.transition(FormState::Submitting);
            payload
        };

        info!(
            id = %payload.id,
            submitter = self.submitter.name(),
            "Submitting consignment: {} -> {}", payload.source, payload.destination
        );
        let result = self.submitter.submit(&payload).await;

        let outcome = {
            let mut inner = self.lock();
            match result {
                Ok(record) => {
                    inner.draft = ConsignmentDraft::default();
                    inner.errors.clear();
                    inner.transition(FormState::SubmitSucceeded);
                    SubmitOutcome::Succeeded(record)
                }
                Err(e) => {
                    error!(id = %payload.id, error = %e, "Error submitting consignment");
                    inner.transition(FormState::SubmitFailed);
                    SubmitOutcome::Failed(e)
                }
            }
        };

        match &outcome {
            SubmitOutcome::Succeeded(_) => self.notifier.notify_success(SUCCESS_MESSAGE),
            SubmitOutcome::Failed(e) => self
                .notifier
                .notify_failure(&format!("Error submitting form: {}", e)),
        }

        let mut inner = self.lock();
        inner.last_outcome = Some(outcome.clone());
        inner.transition(FormState::Ready);
        Ok(outcome)
    }
}
