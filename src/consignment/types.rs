//! Consignment Core Types
//!
//! Draft values owned by the form, the payload snapshot sent on submit and
//! the record the backend answers with.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::units::Unit;

/// Consignment id sent with each submission attempt
///
/// Format: `CNS-<epoch-millis>-<4-digit-random>`. A fresh id is generated per
/// attempt and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsignmentId(String);

impl ConsignmentId {
    /// Generate a new id from the current wall clock
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: u16 = rand::thread_rng().gen_range(1000..10000);
        Self(format!("CNS-{}-{}", millis, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConsignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered set of selectable locations, fetched once per mount
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSet(Vec<String>);

impl LocationSet {
    pub fn new(locations: Vec<String>) -> Self {
        Self(locations)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, location: &str) -> bool {
        self.0.iter().any(|l| l == location)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// In-progress field values of the form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsignmentDraft {
    /// Empty string means unset
    pub source: String,
    pub destination: String,
    /// Kilograms
    pub weight: f64,
    /// In `units`
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub units: Unit,
}

/// Package dimensions as sent on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Immutable snapshot of the draft built at submit time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub id: ConsignmentId,
    pub source: String,
    pub destination: String,
    pub weight: f64,
    pub dimensions: Dimensions,
    pub units: Unit,
}

impl SubmissionPayload {
    pub fn from_draft(id: ConsignmentId, draft: &ConsignmentDraft) -> Self {
        Self {
            id,
            source: draft.source.clone(),
            destination: draft.destination.clone(),
            weight: draft.weight,
            dimensions: Dimensions {
                width: draft.width,
                height: draft.height,
                depth: draft.depth,
            },
            units: draft.units,
        }
    }
}

/// Server-assigned record id
///
/// The backend may keep the client id or replace it with its own numeric one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Numeric(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Stored consignment as returned by the submitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsignmentRecord {
    pub id: RecordId,
    pub source: String,
    pub destination: String,
    pub weight: f64,
    pub dimensions: Dimensions,
    pub units: Unit,
}

impl ConsignmentRecord {
    /// Record echoing a payload under a new server id
    pub fn stored(id: RecordId, payload: &SubmissionPayload) -> Self {
        Self {
            id,
            source: payload.source.clone(),
            destination: payload.destination.clone(),
            weight: payload.weight,
            dimensions: payload.dimensions,
            units: payload.units,
        }
    }
}
