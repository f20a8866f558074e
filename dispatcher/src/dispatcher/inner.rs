use log::{debug, info, trace, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tokio::sync::mpsc::UnboundedSender;

use common::{
    Activation, Clock, DispatchError, Observer, PedometerEvent, SourceFailure, SourceKind,
};
use publisher::{Notification, ObserverSlot};

use super::delivery::{self, Delivery, Payload};
use crate::models::config::DispatcherConfig;
use crate::models::state::{ActivationPolicy, SourceState, SourceStates};
use crate::ports::SensorSuite;

/// State shared between the dispatcher handle and its delivery worker.
pub(crate) struct DispatcherCore {
    config: DispatcherConfig,
    sources: SensorSuite,
    states: SourceStates,
    observer: ObserverSlot,
    epoch: AtomicU64,
    last_pedometer_event: RwLock<Option<PedometerEvent>>,
    lifecycle: Mutex<()>,
    sender: UnboundedSender<Delivery>,
}

impl DispatcherCore {
    pub(crate) fn new(
        config: DispatcherConfig,
        sources: SensorSuite,
        sender: UnboundedSender<Delivery>,
    ) -> Self {
        Self {
            config,
            sources,
            states: SourceStates::new(),
            observer: ObserverSlot::new(),
            epoch: AtomicU64::new(0),
            last_pedometer_event: RwLock::new(None),
            lifecycle: Mutex::new(()),
            sender,
        }
    }

    pub(crate) fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub(crate) fn start(&self, observer: &Arc<dyn Observer>) {
        let _guard = self.lock_lifecycle();
        self.observer.register(observer);
        info!("Starting motion dispatcher");
        for kind in SourceKind::ALL {
            self.start_source(kind);
        }
    }

    pub(crate) fn stop(&self) {
        let _guard = self.lock_lifecycle();
        self.stop_sources();
    }

    pub(crate) fn clear_observer(&self) {
        let _guard = self.lock_lifecycle();
        self.observer.clear();
        self.stop_sources();
    }

    pub(crate) fn source_state(&self, kind: SourceKind) -> SourceState {
        self.states.get(kind)
    }

    pub(crate) fn is_active(&self) -> bool {
        self.states.any_active()
    }

    pub(crate) fn last_pedometer_event(&self) -> Option<PedometerEvent> {
        *self
            .last_pedometer_event
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs on the delivery worker.
    pub(crate) fn deliver(&self, delivery: Delivery) {
        let kind = delivery.payload.kind();
        if delivery.epoch != self.epoch.load(Ordering::SeqCst) {
            trace!("Discarding {} delivery queued before stop", kind);
            return;
        }

        let notification = match delivery.payload {
            Payload::Event(event) => self.observer.notify_event(event),
            Payload::Error(error) => self.observer.notify_error(error),
            Payload::PedometerEvent(event) => {
                trace!("Retaining pedometer {:?} event", event.kind);
                *self
                    .last_pedometer_event
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(event);
                return;
            }
        };

        match notification {
            Notification::Delivered => trace!("Delivered {} payload", kind),
            Notification::Vacant => trace!("No observer registered, dropped {} payload", kind),
            Notification::Released => self.release_sources(kind),
        }
    }

    fn release_sources(&self, kind: SourceKind) {
        let _guard = self.lock_lifecycle();
        // A new observer may have been registered since the failed notification.
        if self.observer.current().is_some() {
            return;
        }
        warn!(
            "Observer dropped while delivering {} payload. Stopping all sources",
            kind
        );
        self.observer.clear();
        self.stop_sources();
    }

    fn lock_lifecycle(&self) -> MutexGuard<'_, ()> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start_source(&self, kind: SourceKind) {
        if let SourceState::Active { subscription } = self.states.get(kind) {
            match self.config.policies.get(kind) {
                ActivationPolicy::SkipIfActive => {
                    debug!("{} source already active ({})", kind, subscription);
                    return;
                }
                ActivationPolicy::Restart => {
                    debug!("Restarting {} source ({})", kind, subscription);
                    self.deactivate_source(kind);
                }
            }
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        match self.activate_source(kind, epoch) {
            Ok(()) => {
                let subscription = self.states.activate(kind);
                debug!("Activated {} source ({})", kind, subscription);
            }
            Err(cause) => {
                warn!("Failed to activate {} source: {}", kind, cause);
                self.report(epoch, DispatchError::SourceError { kind, cause });
            }
        }
    }

    fn activate_source(&self, kind: SourceKind, epoch: u64) -> Result<(), SourceFailure> {
        let sender = self.sender.clone();
        match kind {
            SourceKind::Motion => self.sources.motion.activate(
                Activation::periodic(self.config.motion_interval())
                    .with_reference_frame(self.config.attitude_reference_frame),
                delivery::sample_handler(kind, epoch, sender),
            ),
            SourceKind::Accelerometer => self.sources.accelerometer.activate(
                Activation::periodic(self.config.accelerometer_interval()),
                delivery::sample_handler(kind, epoch, sender),
            ),
            SourceKind::Activity => self.sources.activity.activate(
                Activation::on_change(),
                delivery::sample_handler(kind, epoch, sender),
            ),
            SourceKind::Pedometer => self.activate_pedometer(epoch),
        }
    }

    // The updates stream decides the pedometer state; the live event stream is secondary.
    fn activate_pedometer(&self, epoch: u64) -> Result<(), SourceFailure> {
        let since = Clock::now().rewind(self.config.pedometer_lookback());
        self.sources.pedometer.activate(
            Activation::since(since.as_secs()),
            delivery::sample_handler(SourceKind::Pedometer, epoch, self.sender.clone()),
        )?;

        if let Err(cause) = self.sources.pedometer_events.activate(
            Activation::on_change(),
            delivery::pedometer_event_handler(epoch, self.sender.clone()),
        ) {
            warn!("Failed to activate pedometer event stream: {}", cause);
            self.report(
                epoch,
                DispatchError::SourceError {
                    kind: SourceKind::Pedometer,
                    cause,
                },
            );
        }
        Ok(())
    }

    fn deactivate_source(&self, kind: SourceKind) {
        match kind {
            SourceKind::Motion => self.sources.motion.deactivate(),
            SourceKind::Accelerometer => self.sources.accelerometer.deactivate(),
            SourceKind::Activity => self.sources.activity.deactivate(),
            SourceKind::Pedometer => {
                self.sources.pedometer.deactivate();
                self.sources.pedometer_events.deactivate();
            }
        }
        if let SourceState::Active { subscription } = self.states.deactivate(kind) {
            debug!("Deactivated {} source ({})", kind, subscription);
        }
    }

    // Callers hold the lifecycle lock.
    fn stop_sources(&self) {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        for kind in SourceKind::ALL {
            self.deactivate_source(kind);
        }
        info!("Motion dispatcher stopped (generation {})", epoch);
    }

    fn report(&self, epoch: u64, error: DispatchError) {
        delivery::enqueue(
            &self.sender,
            Delivery {
                epoch,
                payload: Payload::Error(error),
            },
        );
    }
}
