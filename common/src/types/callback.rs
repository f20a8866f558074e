use std::sync::Arc;

use crate::errors::SourceFailure;

/// Outcome of a single source callback: a sample, a success without payload, or a failure.
pub type SourceResult<S> = Result<Option<S>, SourceFailure>;

/// Completion handler a source invokes for every physical event.
pub type SampleHandler<S> = Arc<dyn Fn(SourceResult<S>) + Send + Sync>;
