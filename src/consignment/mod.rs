//! Consignment Form FSM
//!
//! Client-side engine of the "new consignment" form: field validation, unit
//! conversion, the location fetch and the submission lifecycle.
//!
//! # State Machine
//!
//! ```text
//! UNINITIALIZED → FETCHING_LOCATIONS → READY ⇄ SUBMITTING → SUBMIT_SUCCEEDED / SUBMIT_FAILED → READY
//!                        ↓
//!     LOCATIONS_EMPTY / LOCATIONS_UNAVAILABLE (terminal)
//! ```
//!
//! # Invariants
//!
//! 1. **One submission in flight**: `Submitting` is entered before the
//!    submitter is awaited; submit is rejected while in it
//! 2. **Distinct route**: source and destination never validate as equal
//! 3. **Bounds after conversion**: dimension bounds apply to the value in the
//!    currently selected unit
//! 4. **Draft survives failure**: only a successful submission resets fields

pub mod adapters;
pub mod error;
pub mod form;
pub mod state;
pub mod types;
pub mod units;
pub mod validation;
pub mod view;


// Re-exports for convenience
pub use error::{ApiError, FormError};
pub use form::{ConsignmentForm, SubmitOutcome};
pub use state::FormState;
pub use types::{
    ConsignmentDraft, ConsignmentId, ConsignmentRecord, Dimensions, LocationSet, RecordId,
    SubmissionPayload,
};
pub use units::{Unit, convert};
pub use validation::{Field, FieldErrors};
pub use view::FormView;
