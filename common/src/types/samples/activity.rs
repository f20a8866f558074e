use serde::{Deserialize, Serialize};
use std::fmt;

use crate::traits::TimedSample;

/// Confidence of an activity estimate, ordered `Low < Medium < High`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityConfidence {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for ActivityConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActivityConfidence::Low => "low",
            ActivityConfidence::Medium => "medium",
            ActivityConfidence::High => "high",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityMode {
    Unknown,
    Stationary,
    Walking,
    Running,
    Cycling,
    Automotive,
}

impl ActivityMode {
    /// Precedence order used to pick the dominant mode.
    pub const ALL: [ActivityMode; 6] = [
        ActivityMode::Unknown,
        ActivityMode::Stationary,
        ActivityMode::Walking,
        ActivityMode::Running,
        ActivityMode::Cycling,
        ActivityMode::Automotive,
    ];

    fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

impl fmt::Display for ActivityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActivityMode::Unknown => "unknown",
            ActivityMode::Stationary => "stationary",
            ActivityMode::Walking => "walking",
            ActivityMode::Running => "running",
            ActivityMode::Cycling => "cycling",
            ActivityMode::Automotive => "automotive",
        })
    }
}

/// Read-only set of activity mode flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<ActivityMode>", into = "Vec<ActivityMode>")]
pub struct ActivityModes(u8);

impl ActivityModes {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn contains(&self, mode: ActivityMode) -> bool {
        self.0 & mode.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ActivityMode> + '_ {
        ActivityMode::ALL
            .into_iter()
            .filter(move |mode| self.contains(*mode))
    }

    /// `Unknown` wins whenever it is set; otherwise the first set mode in precedence order.
    pub fn dominant(&self) -> ActivityMode {
        self.iter().next().unwrap_or(ActivityMode::Unknown)
    }
}

impl FromIterator<ActivityMode> for ActivityModes {
    fn from_iter<I: IntoIterator<Item = ActivityMode>>(iter: I) -> Self {
        Self(iter.into_iter().fold(0, |bits, mode| bits | mode.bit()))
    }
}

impl From<Vec<ActivityMode>> for ActivityModes {
    fn from(value: Vec<ActivityMode>) -> Self {
        value.into_iter().collect()
    }
}

impl From<ActivityModes> for Vec<ActivityMode> {
    fn from(value: ActivityModes) -> Self {
        value.iter().collect()
    }
}

/// Activity classification snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySample {
    start_date: f64,
    confidence: ActivityConfidence,
    modes: ActivityModes,
}

impl ActivitySample {
    pub fn new(start_date: f64, confidence: ActivityConfidence, modes: ActivityModes) -> Self {
        Self {
            start_date,
            confidence,
            modes,
        }
    }

    pub fn start_date(&self) -> f64 {
        self.start_date
    }

    pub fn confidence(&self) -> ActivityConfidence {
        self.confidence
    }

    pub fn modes(&self) -> ActivityModes {
        self.modes
    }

    pub fn dominant_mode(&self) -> ActivityMode {
        self.modes.dominant()
    }
}

impl TimedSample for ActivitySample {
    fn timestamp(&self) -> f64 {
        self.start_date
    }
}

impl fmt::Display for ActivitySample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modes: Vec<String> = self.modes.iter().map(|mode| mode.to_string()).collect();
        write!(f, "{}: {}", self.confidence, modes.join(" - "))
    }
}
