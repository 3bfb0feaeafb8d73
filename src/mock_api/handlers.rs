//! Mock endpoint handlers

use std::sync::Arc;
use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::MockApiState;

/// Body of a 400 response
#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

type Rejection = (StatusCode, Json<ErrorMessage>);

fn bad_request(message: &str) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorMessage {
            message: message.to_string(),
        }),
    )
}

/// JavaScript truthiness of an optional JSON value
fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

async fn simulate_latency(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

/// GET /api/locations
pub async fn get_locations(State(state): State<Arc<MockApiState>>) -> Json<Vec<String>> {
    simulate_latency(state.config.locations_delay_ms).await;
    debug!(count = state.config.locations.len(), "Serving locations");
    Json(state.config.locations.clone())
}

/// POST /api/submit-consignment
///
/// Only checks presence: `id` plus truthy source, destination, weight and
/// units. The stored record echoes the body under a server id (epoch millis).
pub async fn submit_consignment(
    State(state): State<Arc<MockApiState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), Rejection> {
    simulate_latency(state.config.submit_delay_ms).await;

    if is_falsy(body.get("id")) {
        return Err(bad_request("Missing id."));
    }

    let missing = ["source", "destination", "weight", "units"]
        .iter()
        .any(|key| is_falsy(body.get(*key)));
    if missing {
        return Err(bad_request("Missing required fields."));
    }

    let server_id = chrono::Utc::now().timestamp_millis();
    let mut record = body;
    record["id"] = Value::from(server_id);

    info!(server_id, "Consignment accepted");
    Ok((StatusCode::CREATED, Json(record)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockServerConfig;
    use serde_json::json;

    fn state() -> State<Arc<MockApiState>> {
        State(Arc::new(MockApiState::new(MockServerConfig {
            locations_delay_ms: 0,
            submit_delay_ms: 0,
            ..MockServerConfig::default()
        })))
    }

    fn valid_body() -> Value {
        json!({
            "id": "CNS-1735000000000-1234",
            "source": "Perth",
            "destination": "Sydney",
            "weight": 80,
            "dimensions": { "width": 4, "height": 4, "depth": 2 },
            "units": "Centimeters"
        })
    }

    #[test]
    fn test_falsy_values() {
        assert!(is_falsy(None));
        assert!(is_falsy(Some(&Value::Null)));
        assert!(is_falsy(Some(&json!(""))));
        assert!(is_falsy(Some(&json!(0))));
        assert!(is_falsy(Some(&json!(0.0))));
        assert!(is_falsy(Some(&json!(false))));

        assert!(!is_falsy(Some(&json!("Perth"))));
        assert!(!is_falsy(Some(&json!(-1))));
        assert!(!is_falsy(Some(&json!([]))));
    }

    #[tokio::test]
    async fn test_locations_served_in_order() {
        let Json(locations) = get_locations(state()).await;
        assert_eq!(locations.len(), 8);
        assert_eq!(locations[0], "Perth");
        assert_eq!(locations[1], "Sydney");
    }

    #[tokio::test]
    async fn test_submit_assigns_server_id() {
        let (status, Json(record)) = submit_consignment(state(), Json(valid_body()))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert!(record["id"].is_i64());
        assert_eq!(record["source"], "Perth");
        assert_eq!(record["dimensions"]["depth"], 2);
    }

    #[tokio::test]
    async fn test_submit_without_id() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("id");

        let (status, Json(err)) = submit_consignment(state(), Json(body))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Missing id.");
    }

    #[tokio::test]
    async fn test_submit_with_falsy_required_field() {
        for (key, value) in [
            ("source", json!("")),
            ("destination", Value::Null),
            ("weight", json!(0)),
            ("units", json!("")),
        ] {
            let mut body = valid_body();
            body[key] = value;

            let (status, Json(err)) = submit_consignment(state(), Json(body))
                .await
                .unwrap_err();
            assert_eq!(status, StatusCode::BAD_REQUEST, "field {}", key);
            assert_eq!(err.message, "Missing required fields.");
        }
    }
}
