//! # catpointd — catpoint daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise `tracing` logging
//! - Construct the repository, classifier and event bus (adapters)
//! - Construct the alarm controller, injecting adapters via port traits
//! - Register configured sensors and apply the start-up arming status
//! - Log every status event published by the controller
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no alarm logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use catpoint_adapter_http_axum::router;
use catpoint_adapter_http_axum::state::AppState;
use catpoint_adapter_storage_memory::InMemorySecurityRepository;
use catpoint_adapter_virtual::VirtualImageClassifier;
use catpoint_app::event_bus::InProcessEventBus;
use catpoint_app::ports::{EventPublisher, ImageClassifier, SecurityRepository};
use catpoint_app::services::alarm_controller::AlarmController;
use catpoint_domain::event::{Event, EventKind};

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Notifier
    let event_bus = Arc::new(InProcessEventBus::new(256));
    tokio::spawn(log_events(event_bus.subscribe()));

    // Controller
    let controller = AlarmController::new(
        InMemorySecurityRepository::new(),
        VirtualImageClassifier::new(),
        Arc::clone(&event_bus),
    );
    seed(&controller, &config).await?;

    // HTTP
    let app = router::build(AppState::new(controller, event_bus));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "catpointd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("catpointd stopped");
    Ok(())
}

/// Register configured sensors, then apply the configured arming status.
async fn seed<R, C, P>(
    controller: &AlarmController<R, C, P>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: SecurityRepository,
    C: ImageClassifier,
    P: EventPublisher,
{
    for sensor in config.sensors()? {
        tracing::info!(sensor = %sensor.key(), "registering sensor");
        controller.add_sensor(sensor).await?;
    }
    controller
        .set_arming_status(config.security.arming_status)
        .await?;
    Ok(())
}

async fn log_events(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(event) => log_event(&event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "notifier fell behind, events dropped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn log_event(event: &Event) {
    match &event.kind {
        EventKind::AlarmStatusChanged { from, to } => {
            tracing::warn!(event_id = %event.id, %from, %to, "alarm status changed");
        }
        EventKind::ArmingStatusChanged { from, to } => {
            tracing::info!(event_id = %event.id, %from, %to, "arming status changed");
        }
        EventKind::SensorActivationChanged { sensor, active } => {
            tracing::info!(event_id = %event.id, %sensor, active, "sensor changed");
        }
        EventKind::SensorAdded { sensor } => {
            tracing::debug!(event_id = %event.id, %sensor, "sensor added");
        }
        EventKind::SensorRemoved { sensor } => {
            tracing::debug!(event_id = %event.id, %sensor, "sensor removed");
        }
        EventKind::CatDetected { detected } => {
            tracing::info!(event_id = %event.id, detected, "camera verdict");
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown requested");
}
