pub mod activation;
pub mod callback;
pub mod clock;
pub mod event;
pub mod samples;
pub mod source_kind;
pub mod untimed;

pub use activation::{Activation, AttitudeReferenceFrame};
pub use callback::{SampleHandler, SourceResult};
pub use clock::Clock;
pub use event::Event;
pub use source_kind::SourceKind;
