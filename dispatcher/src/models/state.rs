use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::SourceKind;

/// Lifecycle state of one sensor source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceState {
    Inactive,
    /// `subscription` identifies the live activation in logs.
    Active { subscription: Uuid },
}

impl SourceState {
    pub fn is_active(&self) -> bool {
        matches!(self, SourceState::Active { .. })
    }
}

/// What `start` does with a source that is already active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationPolicy {
    /// Leave the running subscription untouched.
    SkipIfActive,
    /// Deactivate the source, then activate it again.
    Restart,
}

/// State table with exactly one entry per [`SourceKind`].
#[derive(Debug)]
pub(crate) struct SourceStates {
    states: DashMap<SourceKind, SourceState>,
}

impl SourceStates {
    pub(crate) fn new() -> Self {
        let states = DashMap::with_capacity(SourceKind::ALL.len());
        for kind in SourceKind::ALL {
            states.insert(kind, SourceState::Inactive);
        }
        Self { states }
    }

    pub(crate) fn get(&self, kind: SourceKind) -> SourceState {
        self.states
            .get(&kind)
            .map(|entry| *entry.value())
            .unwrap_or(SourceState::Inactive)
    }

    /// Marks `kind` active and returns the new subscription id.
    pub(crate) fn activate(&self, kind: SourceKind) -> Uuid {
        let subscription = Uuid::new_v4();
        self.states
            .insert(kind, SourceState::Active { subscription });
        subscription
    }

    /// Marks `kind` inactive and returns the state it was in.
    pub(crate) fn deactivate(&self, kind: SourceKind) -> SourceState {
        self.states
            .insert(kind, SourceState::Inactive)
            .unwrap_or(SourceState::Inactive)
    }

    pub(crate) fn any_active(&self) -> bool {
        self.states.iter().any(|entry| entry.value().is_active())
    }
}
