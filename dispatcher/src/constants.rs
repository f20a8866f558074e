pub(crate) const DEFAULT_MOTION_INTERVAL_MILLIS: u64 = 100;
pub(crate) const DEFAULT_ACCELEROMETER_INTERVAL_MILLIS: u64 = 100;
pub(crate) const DEFAULT_PEDOMETER_LOOKBACK_SECS: u64 = 120;
/// Pedometer history is kept for seven days.
pub(crate) const MAX_PEDOMETER_LOOKBACK_SECS: f64 = 7.0 * 24.0 * 3600.0;
