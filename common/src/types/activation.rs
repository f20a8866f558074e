use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reference frame used to express device attitude.
///
/// Frames with an arbitrary X axis carry no heading; sources report a negative
/// heading for them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttitudeReferenceFrame {
    XArbitraryZVertical,
    XArbitraryCorrectedZVertical,
    #[default]
    XMagneticNorthZVertical,
    XTrueNorthZVertical,
}

impl AttitudeReferenceFrame {
    pub fn has_heading(&self) -> bool {
        matches!(
            self,
            AttitudeReferenceFrame::XMagneticNorthZVertical
                | AttitudeReferenceFrame::XTrueNorthZVertical
        )
    }
}

/// Parameters a source is activated with.
///
/// - `interval`: sampling period for periodic sources.
/// - `since`: timestamp (seconds) from which a windowed source replays history.
/// - `reference_frame`: attitude frame for device motion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Activation {
    pub interval: Option<Duration>,
    pub since: Option<f64>,
    pub reference_frame: Option<AttitudeReferenceFrame>,
}

impl Activation {
    /// Activation for sources that push whenever their state changes.
    pub fn on_change() -> Self {
        Self::default()
    }

    pub fn periodic(interval: Duration) -> Self {
        Self {
            interval: Some(interval),
            ..Self::default()
        }
    }

    pub fn since(timestamp: f64) -> Self {
        Self {
            since: Some(timestamp),
            ..Self::default()
        }
    }

    pub fn with_reference_frame(mut self, reference_frame: AttitudeReferenceFrame) -> Self {
        self.reference_frame = Some(reference_frame);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_with_frame() {
        let activation = Activation::periodic(Duration::from_millis(100))
            .with_reference_frame(AttitudeReferenceFrame::XArbitraryZVertical);
        assert_eq!(activation.interval, Some(Duration::from_millis(100)));
        assert_eq!(activation.since, None);
        assert_eq!(
            activation.reference_frame,
            Some(AttitudeReferenceFrame::XArbitraryZVertical)
        );
    }

    #[test]
    fn test_since() {
        let activation = Activation::since(42.0);
        assert_eq!(activation.since, Some(42.0));
        assert_eq!(activation.interval, None);
    }

    #[test]
    fn test_frames_with_heading() {
        assert!(AttitudeReferenceFrame::XMagneticNorthZVertical.has_heading());
        assert!(AttitudeReferenceFrame::XTrueNorthZVertical.has_heading());
        assert!(!AttitudeReferenceFrame::XArbitraryZVertical.has_heading());
        assert!(!AttitudeReferenceFrame::XArbitraryCorrectedZVertical.has_heading());
    }
}
