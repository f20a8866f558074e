use std::sync::Arc;

use common::{
    AccelerationSample, ActivitySample, MotionSample, PedometerEvent, PedometerSample,
    SensorSource,
};

pub type MotionSource = Arc<dyn SensorSource<MotionSample>>;
pub type AccelerometerSource = Arc<dyn SensorSource<AccelerationSample>>;
pub type ActivitySource = Arc<dyn SensorSource<ActivitySample>>;
pub type PedometerSource = Arc<dyn SensorSource<PedometerSample>>;
pub type PedometerEventSource = Arc<dyn SensorSource<PedometerEvent>>;

/// Adapters the dispatcher drives, one per sensor subsystem.
///
/// The pedometer subsystem exposes two subscriptions: windowed step `pedometer`
/// updates and the live `pedometer_events` stream. Both are started and stopped together.
#[derive(Clone)]
pub struct SensorSuite {
    pub motion: MotionSource,
    pub accelerometer: AccelerometerSource,
    pub activity: ActivitySource,
    pub pedometer: PedometerSource,
    pub pedometer_events: PedometerEventSource,
}
