use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::N_SOURCES;

/// The four independent sensor sources a dispatcher drives.
///
/// # Examples
///
/// ```
/// use common::SourceKind;
///
/// assert_eq!(usize::from(SourceKind::Activity), 2);
/// assert_eq!(SourceKind::try_from("pedometer"), Ok(SourceKind::Pedometer));
/// assert_eq!(SourceKind::Accelerometer.to_string(), "accelerometer");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Motion,
    Accelerometer,
    Activity,
    Pedometer,
}

impl SourceKind {
    pub const ALL: [SourceKind; N_SOURCES] = [
        SourceKind::Motion,
        SourceKind::Accelerometer,
        SourceKind::Activity,
        SourceKind::Pedometer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Motion => "motion",
            SourceKind::Accelerometer => "accelerometer",
            SourceKind::Activity => "activity",
            SourceKind::Pedometer => "pedometer",
        }
    }
}

impl From<&SourceKind> for usize {
    fn from(value: &SourceKind) -> Self {
        match value {
            SourceKind::Motion => 0,
            SourceKind::Accelerometer => 1,
            SourceKind::Activity => 2,
            SourceKind::Pedometer => 3,
        }
    }
}

impl From<SourceKind> for usize {
    fn from(value: SourceKind) -> Self {
        usize::from(&value)
    }
}

impl TryFrom<&str> for SourceKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower_case_value = value.trim().to_lowercase();

        if lower_case_value.starts_with("mot") {
            Ok(Self::Motion)
        } else if lower_case_value.starts_with("acc") {
            Ok(Self::Accelerometer)
        } else if lower_case_value.starts_with("act") {
            Ok(Self::Activity)
        } else if lower_case_value.starts_with("ped") || lower_case_value.starts_with("step") {
            Ok(Self::Pedometer)
        } else {
            Err(format!("Unknown source {}", value))
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
