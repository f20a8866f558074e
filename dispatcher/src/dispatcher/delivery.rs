use log::{debug, trace};
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use common::{DispatchError, Event, PedometerEvent, SampleHandler, SourceKind, SourceResult};

use super::inner::DispatcherCore;

/// Work item handed from a source handler to the serial delivery context.
#[derive(Debug)]
pub(crate) struct Delivery {
    /// Stop generation the producing handler was activated in.
    pub(crate) epoch: u64,
    pub(crate) payload: Payload,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Payload {
    Event(Event),
    Error(DispatchError),
    /// Live pedometer event; retained, never forwarded.
    PedometerEvent(PedometerEvent),
}

impl Payload {
    pub(crate) fn kind(&self) -> SourceKind {
        match self {
            Payload::Event(event) => event.kind(),
            Payload::Error(error) => error.kind(),
            Payload::PedometerEvent(_) => SourceKind::Pedometer,
        }
    }
}

/// Maps a raw source callback onto exactly one event or error.
pub(crate) fn normalize<S>(kind: SourceKind, result: SourceResult<S>) -> Payload
where
    S: Into<Event>,
{
    match result {
        Ok(Some(sample)) => Payload::Event(sample.into()),
        Ok(None) => Payload::Error(DispatchError::SourceUnavailable(kind)),
        Err(cause) => Payload::Error(DispatchError::SourceError { kind, cause }),
    }
}

/// Handler registered with a sample source. It only enqueues; delivery happens on the worker.
pub(crate) fn sample_handler<S>(
    kind: SourceKind,
    epoch: u64,
    sender: UnboundedSender<Delivery>,
) -> SampleHandler<S>
where
    S: Into<Event> + 'static,
{
    Arc::new(move |result: SourceResult<S>| {
        let payload = normalize(kind, result);
        enqueue(&sender, Delivery { epoch, payload });
    })
}

/// Handler for the live pedometer event stream. Empty callbacks carry nothing to retain.
pub(crate) fn pedometer_event_handler(
    epoch: u64,
    sender: UnboundedSender<Delivery>,
) -> SampleHandler<PedometerEvent> {
    Arc::new(move |result: SourceResult<PedometerEvent>| {
        let payload = match result {
            Ok(Some(event)) => Payload::PedometerEvent(event),
            Ok(None) => {
                trace!("Ignoring empty pedometer event");
                return;
            }
            Err(cause) => Payload::Error(DispatchError::SourceError {
                kind: SourceKind::Pedometer,
                cause,
            }),
        };
        enqueue(&sender, Delivery { epoch, payload });
    })
}

pub(crate) fn enqueue(sender: &UnboundedSender<Delivery>, delivery: Delivery) {
    let kind = delivery.payload.kind();
    if sender.send(delivery).is_err() {
        trace!("Delivery worker gone, dropping {} callback", kind);
    }
}

/// Spawns the serial delivery context: one task, one delivery at a time, FIFO.
pub(crate) fn spawn_worker(
    runtime: &Handle,
    core: Weak<DispatcherCore>,
    mut receiver: UnboundedReceiver<Delivery>,
) -> JoinHandle<()> {
    runtime.spawn(async move {
        while let Some(delivery) = receiver.recv().await {
            let Some(core) = core.upgrade() else {
                break;
            };
            core.deliver(delivery);
        }
        debug!("Delivery worker finished");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{
        AccelerationSample, ActivitySample, PedometerEventKind, SourceFailure,
    };
    use tokio::sync::mpsc;

    #[test]
    fn test_normalize_sample() {
        let sample = AccelerationSample::new(1.0, [0.501234, 0.0, 0.0]);
        assert_eq!(
            normalize(SourceKind::Accelerometer, Ok(Some(sample.clone()))),
            Payload::Event(Event::Acceleration(sample))
        );
    }

    #[test]
    fn test_normalize_empty_success() {
        assert_eq!(
            normalize::<ActivitySample>(SourceKind::Activity, Ok(None)),
            Payload::Error(DispatchError::SourceUnavailable(SourceKind::Activity))
        );
    }

    #[test]
    fn test_normalize_failure() {
        let payload =
            normalize::<AccelerationSample>(SourceKind::Accelerometer, Err(SourceFailure::Timeout));
        assert_eq!(
            payload,
            Payload::Error(DispatchError::SourceError {
                kind: SourceKind::Accelerometer,
                cause: SourceFailure::Timeout,
            })
        );
    }

    #[test]
    fn test_sample_handler_stamps_epoch() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let handler = sample_handler::<AccelerationSample>(SourceKind::Accelerometer, 7, sender);

        handler(Ok(Some(AccelerationSample::new(0.0, [0.0; 3]))));
        handler(Ok(None));

        let first = receiver.try_recv().unwrap();
        assert_eq!(first.epoch, 7);
        assert_eq!(first.payload.kind(), SourceKind::Accelerometer);
        let second = receiver.try_recv().unwrap();
        assert!(matches!(second.payload, Payload::Error(_)));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_pedometer_event_handler_ignores_empty() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let handler = pedometer_event_handler(0, sender);

        handler(Ok(None));
        assert!(receiver.try_recv().is_err());

        let event = PedometerEvent::new(10.0, PedometerEventKind::Pause);
        handler(Ok(Some(event)));
        assert_eq!(
            receiver.try_recv().unwrap().payload,
            Payload::PedometerEvent(event)
        );

        handler(Err(SourceFailure::NotAuthorized));
        assert_eq!(
            receiver.try_recv().unwrap().payload.kind(),
            SourceKind::Pedometer
        );
    }

    #[test]
    fn test_handler_survives_closed_channel() {
        let (sender, receiver) = mpsc::unbounded_channel();
        drop(receiver);
        let handler = sample_handler::<AccelerationSample>(SourceKind::Accelerometer, 0, sender);
        handler(Err(SourceFailure::Timeout));
    }
}
