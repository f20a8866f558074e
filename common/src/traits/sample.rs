/// Sample carrying the time (seconds since the unix epoch) it describes.
pub trait TimedSample: Send + Sync + Clone + 'static {
    fn timestamp(&self) -> f64;
}
