//! Collaborator Adapters
//!
//! The form only talks to the outside world through these traits: a
//! location provider, a consignment submitter and a notification sink.

pub mod http;
pub mod notify;

pub use http::{HttpConsignmentSubmitter, HttpLocationProvider};
pub use notify::LogNotifier;

use async_trait::async_trait;

use super::error::ApiError;
use super::types::{ConsignmentRecord, SubmissionPayload};

/// Supplies the selectable locations
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Adapter name for logging
    fn name(&self) -> &'static str;

    /// Fetch all locations, in display order
    async fn fetch_locations(&self) -> Result<Vec<String>, ApiError>;
}

/// Accepts a finalized consignment
#[async_trait]
pub trait ConsignmentSubmitter: Send + Sync {
    /// Adapter name for logging
    fn name(&self) -> &'static str;

    /// Store the consignment; the returned record may carry a server id
    async fn submit(&self, payload: &SubmissionPayload) -> Result<ConsignmentRecord, ApiError>;
}

/// Fire-and-forget user notifications (toasts)
pub trait NotificationSink: Send + Sync {
    fn notify_success(&self, text: &str);
    fn notify_failure(&self, text: &str);
}


#[cfg(test)]
pub use mock::{MockLocationProvider, MockSubmitter, RecordingNotifier};
