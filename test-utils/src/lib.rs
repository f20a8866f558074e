//! Helpers shared by the workspace test suites: a recording observer, a manually driven
//! sensor source and a CSV trace loader.

pub mod csv_loader;
pub mod manual_source;
pub mod recording_observer;

pub use manual_source::ManualSource;
pub use recording_observer::RecordingObserver;
