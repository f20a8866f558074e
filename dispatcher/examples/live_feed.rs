//! Logs simulated sensor events until Ctrl+C.
//!
//! ```text
//! RUST_LOG=info MOTION_SOURCES=motion,activity cargo run --example live_feed
//! ```
//!
//! `MOTION_CONFIG` may point to a JSON dispatcher configuration.

use log::{error, info, warn};
use std::collections::HashSet;
use std::sync::Arc;

use common::{DispatchError, Event, SourceKind};
use motion_dispatcher::{services, DispatcherConfig};
use publisher::listener;

struct EventLogger {
    sources: HashSet<SourceKind>,
}

impl EventLogger {
    fn from_env() -> Self {
        let sources = match std::env::var("MOTION_SOURCES") {
            Ok(list) => list
                .split(',')
                .filter_map(|name| match SourceKind::try_from(name) {
                    Ok(kind) => Some(kind),
                    Err(e) => {
                        warn!("{}", e);
                        None
                    }
                })
                .collect(),
            Err(_) => SourceKind::ALL.into_iter().collect(),
        };
        Self { sources }
    }

    fn log_event(&self, event: Event) {
        if !self.sources.contains(&event.kind()) {
            return;
        }
        match event {
            Event::Motion(sample) => info!(
                "motion: heading {:.1} deg, roll {:.2}, pitch {:.2}, gravity z {:.3}",
                sample.heading(),
                sample.attitude().roll(),
                sample.attitude().pitch(),
                sample.gravity().z()
            ),
            Event::Acceleration(sample) => {
                let acceleration = sample.acceleration();
                info!(
                    "acceleration: x {:.3} y {:.3} z {:.3}",
                    acceleration.x(),
                    acceleration.y(),
                    acceleration.z()
                )
            }
            Event::Activity(sample) => info!("activity: {}", sample),
            Event::Pedometer(sample) => info!("pedometer: {}", sample),
        }
    }

    fn log_error(&self, error: DispatchError) {
        warn!("{} source: {}", error.kind(), error);
    }
}

fn load_config() -> DispatcherConfig {
    let Ok(path) = std::env::var("MOTION_CONFIG") else {
        return DispatcherConfig::default();
    };
    match std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| DispatcherConfig::from_json(&json).map_err(|e| e.to_string()))
    {
        Ok(config) => config,
        Err(e) => {
            error!("Ignoring configuration {}: {}", path, e);
            DispatcherConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let logger = Arc::new(EventLogger::from_env());
    let observer = listener!(logger.log_event, logger.log_error).into_observer();

    let (handle, dispatcher) =
        services::run_simulated_service(load_config(), observer, true, None)
            .expect("Error starting simulated service");

    handle.await.unwrap();
    if let Some(event) = dispatcher.last_pedometer_event() {
        info!("Last pedometer event: {:?} at {:.0}", event.kind, event.date);
    }
}
