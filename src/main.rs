//! Consignment Form - mock backend and demo session
//!
//! ```text
//! consignment_form [--env dev] [--port 3001]          # serve the mock API
//! consignment_form [--env dev] --demo                 # mock API + one form session
//! ```

use std::sync::Arc;

use consignment_form::config::AppConfig;
use consignment_form::consignment::adapters::{
    HttpConsignmentSubmitter, HttpLocationProvider, LogNotifier,
};
use consignment_form::consignment::{ConsignmentForm, FormState, SubmitOutcome, Unit};
use tokio::net::TcpListener;
use tracing::{info, warn};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn use_demo_mode() -> bool {
    std::env::args().any(|a| a == "--demo")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut app_config = AppConfig::load(&env)?;
    if let Some(port) = get_port_override() {
        app_config.mock_server.port = port;
    }
    let _log_guard = consignment_form::logging::init_logging(&app_config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        git = env!("GIT_HASH"),
        "Starting consignment form in {} mode",
        env
    );

    if use_demo_mode() {
        run_demo(app_config).await
    } else {
        consignment_form::mock_api::run_server(app_config.mock_server).await?;
        Ok(())
    }
}

/// One form session against an in-process mock API
async fn run_demo(mut config: AppConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.mock_server.host, config.mock_server.port);
    let listener = TcpListener::bind(&addr).await?;
    let local = listener.local_addr()?;
    config.api.base_url = format!("http://{}", local);

    let server_config = config.mock_server.clone();
    tokio::spawn(async move {
        if let Err(e) = consignment_form::mock_api::serve(listener, server_config).await {
            warn!(error = %e, "Mock API stopped");
        }
    });
    println!("🚀 Mock API on http://{}", local);

    let form = ConsignmentForm::new(
        Arc::new(HttpLocationProvider::new(&config.api)?),
        Arc::new(HttpConsignmentSubmitter::new(&config.api)?),
        Arc::new(LogNotifier),
    );

    let state = form.mount().await?;
    if state != FormState::Ready {
        warn!(%state, "Form not usable");
        return Ok(());
    }

    let draft = form.draft();
    println!("Route: {} -> {}", draft.source, draft.destination);

    form.set_weight(80.0)?;
    form.set_width(4.0)?;
    form.set_height(4.0)?;
    form.set_depth(2.0)?;
    form.set_units(Unit::Millimeters)?;

    let view = form.view();
    println!(
        "Dimensions: {} x {} x {} {}",
        view.draft.width, view.draft.height, view.draft.depth, view.draft.units
    );
    if !view.errors.is_empty() {
        println!("Invalid: {}", view.errors);
        form.set_units(Unit::Centimeters)?;
    }

    match form.submit().await? {
        SubmitOutcome::Succeeded(record) => {
            println!("✅ Stored consignment {}", record.id);
        }
        SubmitOutcome::Failed(e) => {
            println!("❌ Submission failed: {}", e);
        }
    }

    Ok(())
}
