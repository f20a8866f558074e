pub mod observer;
pub mod sample;
pub mod source;

pub use crate::traits::observer::Observer;
pub use crate::traits::sample::TimedSample;
pub use crate::traits::source::SensorSource;
