//! Mock Consignment Backend
//!
//! Stand-in for the real service during development: serves a fixed
//! location list and accepts consignments after an artificial delay.
//!
//! ```text
//! GET  /api/locations            -> 200 ["Perth", "Sydney", ...]
//! POST /api/submit-consignment   -> 201 {..body, "id": <epoch millis>}
//!                                -> 400 {"message": "Missing id."}
//!                                -> 400 {"message": "Missing required fields."}
//! ```

pub mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::MockServerConfig;

pub const LOCATIONS_ROUTE: &str = "/api/locations";
pub const SUBMIT_ROUTE: &str = "/api/submit-consignment";

/// Shared handler state
pub struct MockApiState {
    pub config: MockServerConfig,
}

impl MockApiState {
    pub fn new(config: MockServerConfig) -> Self {
        Self { config }
    }
}

pub fn router(config: MockServerConfig) -> Router {
    let state = Arc::new(MockApiState::new(config));

    Router::new()
        .route(LOCATIONS_ROUTE, get(handlers::get_locations))
        .route(SUBMIT_ROUTE, post(handlers::submit_consignment))
        .with_state(state)
}

/// Serve on an already bound listener until the task is dropped
pub async fn serve(listener: TcpListener, config: MockServerConfig) -> std::io::Result<()> {
    axum::serve(listener, router(config)).await
}

/// Bind `host:port` from config and serve
pub async fn run_server(config: MockServerConfig) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(%addr, error = %e, "Failed to bind mock API");
            eprintln!(
                "   Hint: Port {} may already be in use. Check with: lsof -i :{}",
                config.port, config.port
            );
            return Err(e);
        }
    };

    info!(%addr, "Mock API listening");
    println!("🚀 Mock API listening on http://{}", addr);
    println!("📂 GET  {}", LOCATIONS_ROUTE);
    println!("📂 POST {}", SUBMIT_ROUTE);

    serve(listener, config).await
}
