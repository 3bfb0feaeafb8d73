//! HTTP Adapters
//!
//! `reqwest` clients for the two backend endpoints:
//! - `GET  {base}/api/locations`
//! - `POST {base}/api/submit-consignment`

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

use super::{ConsignmentSubmitter, LocationProvider};
use crate::config::ApiConfig;
use crate::consignment::error::ApiError;
use crate::consignment::types::{ConsignmentRecord, SubmissionPayload};

pub const LOCATIONS_PATH: &str = "/api/locations";
pub const SUBMIT_PATH: &str = "/api/submit-consignment";

/// Error body returned by the backend on rejection
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Turn a non-success response into `ApiError::Rejected`
async fn rejection(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => "no error message".to_string(),
    };
    ApiError::Rejected { status, message }
}

/// Location provider backed by the locations endpoint
pub struct HttpLocationProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpLocationProvider {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_client(Duration::from_millis(config.timeout_ms))?,
            url: endpoint(&config.base_url, LOCATIONS_PATH),
        })
    }

    async fn request(&self) -> Result<Vec<String>, ApiError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(response.json::<Vec<String>>().await?)
    }
}

#[async_trait]
impl LocationProvider for HttpLocationProvider {
    fn name(&self) -> &'static str {
        "http-locations"
    }

    async fn fetch_locations(&self) -> Result<Vec<String>, ApiError> {
        let result = self.request().await;

        match &result {
            Ok(locations) => debug!(url = %self.url, count = locations.len(), "Fetched locations"),
            Err(e) => error!(url = %self.url, error = %e, "Error fetching locations"),
        }
        result
    }
}

/// Consignment submitter backed by the submit endpoint
pub struct HttpConsignmentSubmitter {
    client: reqwest::Client,
    url: String,
}

impl HttpConsignmentSubmitter {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_client(Duration::from_millis(config.timeout_ms))?,
            url: endpoint(&config.base_url, SUBMIT_PATH),
        })
    }

    async fn request(&self, payload: &SubmissionPayload) -> Result<ConsignmentRecord, ApiError> {
        let response = self.client.post(&self.url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(response.json::<ConsignmentRecord>().await?)
    }
}

#[async_trait]
impl ConsignmentSubmitter for HttpConsignmentSubmitter {
    fn name(&self) -> &'static str {
        "http-submitter"
    }

    async fn submit(&self, payload: &SubmissionPayload) -> Result<ConsignmentRecord, ApiError> {
        let result = self.request(payload).await;

        match &result {
            Ok(record) => debug!(id = %payload.id, record_id = %record.id, "Consignment stored"),
            Err(e) => error!(id = %payload.id, error = %e, "Error submitting consignment"),
        }
        result
    }
}
