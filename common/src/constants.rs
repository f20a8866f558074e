pub const N_XYZ_COORDINATES: usize = 3;
pub const N_QUATERNION_COORDINATES: usize = 4;
pub const N_SOURCES: usize = 4;

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const FULL_TURN_DEGREES: f64 = 360.0;
