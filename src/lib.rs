//! Consignment Form
//!
//! Client-side engine for booking a new consignment: pick a route from the
//! server's location list, enter weight and dimensions, submit once.
//!
//! # Modules
//!
//! - [`consignment`] - Form state machine, validation, unit conversion, adapters
//! - [`config`] - YAML configuration (`config/{env}.yaml`)
//! - [`logging`] - tracing subscriber setup
//! - [`mock_api`] - Mock backend (feature `mock-api`)

pub mod config;
pub mod consignment;
pub mod logging;

#[cfg(feature = "mock-api")]
pub mod mock_api;

// Convenient re-exports at crate root
pub use config::{ApiConfig, AppConfig, ConfigError, MockServerConfig};
pub use consignment::{
    ApiError, ConsignmentDraft, ConsignmentForm, ConsignmentId, ConsignmentRecord, Field,
    FieldErrors, FormError, FormState, FormView, SubmitOutcome, Unit,
};
