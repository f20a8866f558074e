use log::{error, info};
use std::sync::Arc;
use tokio::sync::Notify;

use common::Observer;

use crate::adapters::simulated::simulated_suite;
use crate::dispatcher::MotionDispatcher;
use crate::models::config::DispatcherConfig;
use crate::models::errors::DispatcherError;
pub use crate::models::shutdown::listen_for_shutdown;

/// Starts a dispatcher over simulated sources and forwards everything to `observer`.
///
/// The spawned task keeps `observer` alive, starts the dispatcher and stops it once
/// `run_for_millis` elapses, or on Ctrl+C when no duration is given.
///
/// Returns a tuple containing:
/// - A `tokio::task::JoinHandle<()>` that completes after the dispatcher is stopped.
/// - An `Arc<MotionDispatcher>` for inspecting source state while it runs.
///
/// Must be called inside a tokio runtime. A `NoRuntime` error is returned otherwise, and
/// a `Config` error if `config` does not validate.
pub fn run_simulated_service(
    config: DispatcherConfig,
    observer: Arc<dyn Observer>,
    add_sensor_noise: bool,
    run_for_millis: Option<u64>,
) -> Result<(tokio::task::JoinHandle<()>, Arc<MotionDispatcher>), DispatcherError> {
    let dispatcher = Arc::new(MotionDispatcher::new(
        config,
        simulated_suite(add_sensor_noise)?,
    )?);

    let handle = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move {
            let abort_signal = Arc::new(Notify::new());
            let shutdown = listen_for_shutdown(abort_signal.clone(), run_for_millis);

            dispatcher.start(&observer);
            abort_signal.notified().await;
            dispatcher.stop();
            info!("Simulated service finished");

            if let Err(e) = shutdown.await {
                error!("Error in shutdown listener: {:?}", e);
            }
        }
    });
    Ok((handle, dispatcher))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Event, SourceKind};
    use publisher::Listener;
    use std::sync::Mutex;

    #[test]
    fn test_run_simulated_service_without_runtime() {
        let observer = Listener::events_only(|_event: Event| {}).into_observer();
        let result = run_simulated_service(DispatcherConfig::default(), observer, false, Some(10));
        assert!(matches!(result, Err(DispatcherError::NoRuntime(_))));
    }

    #[tokio::test]
    async fn test_run_simulated_service() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let observer = {
            let received = received.clone();
            Listener::events_only(move |event: Event| received.lock().unwrap().push(event.kind()))
                .into_observer()
        };

        let (handle, dispatcher) =
            run_simulated_service(DispatcherConfig::default(), observer, true, Some(500)).unwrap();
        handle.await.unwrap();

        assert!(!dispatcher.is_active());
        let received = received.lock().unwrap();
        assert!(received.contains(&SourceKind::Motion));
        assert!(received.contains(&SourceKind::Accelerometer));
    }
}
