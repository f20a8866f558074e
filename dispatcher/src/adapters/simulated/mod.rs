//! Sources that synthesize samples on a timer. Used by the demo and service helpers.

mod gaussian;
mod generators;

use log::{debug, error};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use common::{Activation, Clock, SampleHandler, SensorSource, SourceFailure, SourceKind, SourceResult};

use self::gaussian::GaussianNoise;
use crate::models::errors::DispatcherError;
use crate::ports::SensorSuite;

const GAUSSIAN_SENSOR_MEAN: f64 = 0f64;
const GAUSSIAN_SENSOR_STDEV: f64 = 0.02;
const DEFAULT_PERIOD_MILLIS: u64 = 100;
const ACTIVITY_PERIOD_MILLIS: u64 = 4_000;
const PEDOMETER_PERIOD_MILLIS: u64 = 1_000;
const PEDOMETER_EVENT_PERIOD_MILLIS: u64 = 5_000;

/// Produces the next callback for the current time, or `None` to skip a tick.
pub type Generator<S> = Box<dyn FnMut(&mut StdRng, f64) -> Option<SourceResult<S>> + Send>;

/// Builds a fresh generator for every activation.
pub type GeneratorFactory<S> = Arc<dyn Fn(&Activation) -> Generator<S> + Send + Sync>;

/// Open while the task may call its handler. Closing it waits for any call in progress.
type Gate = Arc<Mutex<bool>>;

struct Running {
    abort_signal: Arc<Notify>,
    gate: Gate,
    handle: JoinHandle<()>,
}

impl Running {
    fn shutdown(self) {
        *self.gate.lock().unwrap_or_else(PoisonError::into_inner) = false;
        self.abort_signal.notify_one();
        self.handle.abort();
    }
}

/// Calls `handler` unless the gate was closed. Returns whether the gate is still open.
fn deliver_through<S>(gate: &Gate, handler: &SampleHandler<S>, result: SourceResult<S>) -> bool {
    let open = gate.lock().unwrap_or_else(PoisonError::into_inner);
    if *open {
        handler(result);
    }
    *open
}

/// Timer-driven [`SensorSource`].
///
/// Each activation spawns one task that ticks at `activation.interval`, or at the
/// source's own period when none is given. Activating again replaces the running task.
/// Once `deactivate` returns, the previous handler is not running and is never called again.
pub struct SimulatedSource<S> {
    kind: SourceKind,
    default_period: Duration,
    factory: GeneratorFactory<S>,
    running: Mutex<Option<Running>>,
}

impl<S> SimulatedSource<S>
where
    S: Send + 'static,
{
    pub fn new(kind: SourceKind, default_period: Duration, factory: GeneratorFactory<S>) -> Self {
        Self {
            kind,
            default_period,
            factory,
            running: Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<S> SensorSource<S> for SimulatedSource<S>
where
    S: Send + 'static,
{
    fn activate(&self, activation: Activation, handler: SampleHandler<S>) -> Result<(), SourceFailure> {
        let runtime = Handle::try_current().map_err(|e| {
            error!("Simulated {} source needs a tokio runtime: {}", self.kind, e);
            SourceFailure::NotAvailable
        })?;

        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = running.take() {
            previous.shutdown();
        }

        let period = activation.interval.unwrap_or(self.default_period);
        let mut generator = (self.factory)(&activation);
        let abort_signal = Arc::new(Notify::new());
        let gate: Gate = Arc::new(Mutex::new(true));
        let handle = runtime.spawn({
            let abort_signal = abort_signal.clone();
            let gate = gate.clone();
            async move {
                let mut rng = StdRng::from_entropy();
                loop {
                    tokio::select! {
                        _ = abort_signal.notified() => {
                            break;
                        }
                        _ = tokio::time::sleep(period) => {
                            let Some(result) = generator(&mut rng, Clock::now().as_secs()) else {
                                continue;
                            };
                            if !deliver_through(&gate, &handler, result) {
                                break;
                            }
                        }
                    }
                }
            }
        });
        debug!("Simulated {} source ticking every {:?}", self.kind, period);

        *running = Some(Running {
            abort_signal,
            gate,
            handle,
        });
        Ok(())
    }

    fn deactivate(&self) {
        let running = self
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(running) = running {
            running.shutdown();
            debug!("Simulated {} source stopped", self.kind);
        }
    }
}

impl<S> Drop for SimulatedSource<S> {
    fn drop(&mut self) {
        let running = self
            .running
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(running) = running {
            running.shutdown();
        }
    }
}

/// Simulated adapters for all four sources.
/// Returns a Simulation error if the noise distribution cannot be built.
pub fn simulated_suite(add_sensor_noise: bool) -> Result<SensorSuite, DispatcherError> {
    let noise = if add_sensor_noise {
        Some(GaussianNoise::new(GAUSSIAN_SENSOR_MEAN, GAUSSIAN_SENSOR_STDEV)?)
    } else {
        None
    };
    let default_period = Duration::from_millis(DEFAULT_PERIOD_MILLIS);

    Ok(SensorSuite {
        motion: Arc::new(SimulatedSource::new(
            SourceKind::Motion,
            default_period,
            generators::motion(noise.clone()),
        )),
        accelerometer: Arc::new(SimulatedSource::new(
            SourceKind::Accelerometer,
            default_period,
            generators::acceleration(noise),
        )),
        activity: Arc::new(SimulatedSource::new(
            SourceKind::Activity,
            Duration::from_millis(ACTIVITY_PERIOD_MILLIS),
            generators::activity(),
        )),
        pedometer: Arc::new(SimulatedSource::new(
            SourceKind::Pedometer,
            Duration::from_millis(PEDOMETER_PERIOD_MILLIS),
            generators::pedometer(),
        )),
        pedometer_events: Arc::new(SimulatedSource::new(
            SourceKind::Pedometer,
            Duration::from_millis(PEDOMETER_EVENT_PERIOD_MILLIS),
            generators::pedometer_events(),
        )),
    })
}
