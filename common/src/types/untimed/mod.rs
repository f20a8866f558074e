pub mod attitude;
pub mod xyz;

pub use crate::types::untimed::attitude::Attitude;
pub use crate::types::untimed::xyz::XYZ;
