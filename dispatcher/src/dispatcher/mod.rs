mod inner;
mod delivery;

use log::debug;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use common::{Observer, PedometerEvent, SourceKind};

use self::inner::DispatcherCore;
use crate::models::config::DispatcherConfig;
use crate::models::errors::DispatcherError;
use crate::models::state::SourceState;
use crate::ports::SensorSuite;

/// Drives four sensor sources and forwards their samples to a single observer.
///
/// Every event and error reaches the observer from one serial delivery task, one call
/// at a time. Samples from one source keep their arrival order. `start` and `stop`
/// return immediately and never wait on delivery.
///
/// The observer is held weakly. Once its owner drops it, the next delivery stops
/// every source.
pub struct MotionDispatcher {
    core: Arc<DispatcherCore>,
    worker: JoinHandle<()>,
}

impl MotionDispatcher {
    /// Creates a dispatcher over `sources` and spawns its delivery task.
    ///
    /// Returns `NoRuntime` when called outside a tokio runtime and `Config` if `config`
    /// does not validate.
    pub fn new(config: DispatcherConfig, sources: SensorSuite) -> Result<Self, DispatcherError> {
        config.validate()?;
        let runtime =
            Handle::try_current().map_err(|e| DispatcherError::NoRuntime(e.to_string()))?;

        let (sender, receiver) = mpsc::unbounded_channel();
        let core = Arc::new(DispatcherCore::new(config, sources, sender));
        let worker = delivery::spawn_worker(&runtime, Arc::downgrade(&core), receiver);
        debug!("Motion dispatcher created");

        Ok(Self { core, worker })
    }

    /// Registers `observer`, replacing any previous one, and activates the sources.
    ///
    /// Sources that are already active follow their activation policy: they are either
    /// left running or restarted. Activation failures are reported to the observer as
    /// `SourceError` and leave that source inactive.
    pub fn start(&self, observer: &Arc<dyn Observer>) {
        self.core.start(observer);
    }

    /// Deactivates all sources and discards deliveries that have not reached the observer.
    ///
    /// Safe to call repeatedly or before `start`. A delivery already running on the
    /// delivery task completes.
    pub fn stop(&self) {
        self.core.stop();
    }

    /// Unregisters the observer and stops all sources.
    pub fn clear_observer(&self) {
        self.core.clear_observer();
    }

    pub fn source_state(&self, kind: SourceKind) -> SourceState {
        self.core.source_state(kind)
    }

    /// Returns true while at least one source is active.
    pub fn is_active(&self) -> bool {
        self.core.is_active()
    }

    /// Most recent event from the live pedometer stream.
    pub fn last_pedometer_event(&self) -> Option<PedometerEvent> {
        self.core.last_pedometer_event()
    }

    pub fn config(&self) -> &DispatcherConfig {
        self.core.config()
    }
}

impl Drop for MotionDispatcher {
    fn drop(&mut self) {
        self.core.stop();
        self.worker.abort();
    }
}
