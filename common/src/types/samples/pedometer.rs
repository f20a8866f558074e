use serde::{Deserialize, Serialize};
use std::fmt;

use crate::traits::TimedSample;
use crate::types::Clock;

/// Step and floor counts accumulated over `[start_date, end_date]`.
///
/// Optional metrics are only present when the underlying hardware can estimate
/// them. Paces are in seconds per meter, cadence in steps per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PedometerSample {
    start_date: f64,
    end_date: f64,
    number_of_steps: u32,
    distance: Option<f64>,
    floors_ascended: Option<u32>,
    floors_descended: Option<u32>,
    current_pace: Option<f64>,
    current_cadence: Option<f64>,
    average_active_pace: Option<f64>,
}

impl PedometerSample {
    pub fn new(start_date: f64, end_date: f64, number_of_steps: u32) -> Self {
        Self {
            start_date,
            end_date,
            number_of_steps,
            ..Self::default()
        }
    }

    /// Starts a sample whose optional metrics are filled in by the builder.
    pub fn builder(start_date: f64, end_date: f64, number_of_steps: u32) -> PedometerSampleBuilder {
        PedometerSampleBuilder {
            sample: Self::new(start_date, end_date, number_of_steps),
        }
    }

    pub fn start_date(&self) -> f64 {
        self.start_date
    }

    pub fn end_date(&self) -> f64 {
        self.end_date
    }

    pub fn number_of_steps(&self) -> u32 {
        self.number_of_steps
    }

    /// Meters.
    pub fn distance(&self) -> Option<f64> {
        self.distance
    }

    pub fn floors_ascended(&self) -> Option<u32> {
        self.floors_ascended
    }

    pub fn floors_descended(&self) -> Option<u32> {
        self.floors_descended
    }

    pub fn current_pace(&self) -> Option<f64> {
        self.current_pace
    }

    pub fn current_cadence(&self) -> Option<f64> {
        self.current_cadence
    }

    pub fn average_active_pace(&self) -> Option<f64> {
        self.average_active_pace
    }

    pub fn duration_secs(&self) -> f64 {
        (self.end_date - self.start_date).max(0.0)
    }
}

#[derive(Clone, Debug)]
pub struct PedometerSampleBuilder {
    sample: PedometerSample,
}

impl PedometerSampleBuilder {
    pub fn distance(mut self, meters: f64) -> Self {
        self.sample.distance = Some(meters);
        self
    }

    pub fn floors(mut self, ascended: u32, descended: u32) -> Self {
        self.sample.floors_ascended = Some(ascended);
        self.sample.floors_descended = Some(descended);
        self
    }

    pub fn floors_ascended(mut self, floors: u32) -> Self {
        self.sample.floors_ascended = Some(floors);
        self
    }

    pub fn floors_descended(mut self, floors: u32) -> Self {
        self.sample.floors_descended = Some(floors);
        self
    }

    pub fn current_pace(mut self, secs_per_meter: f64) -> Self {
        self.sample.current_pace = Some(secs_per_meter);
        self
    }

    pub fn current_cadence(mut self, steps_per_sec: f64) -> Self {
        self.sample.current_cadence = Some(steps_per_sec);
        self
    }

    pub fn average_active_pace(mut self, secs_per_meter: f64) -> Self {
        self.sample.average_active_pace = Some(secs_per_meter);
        self
    }

    pub fn build(self) -> PedometerSample {
        self.sample
    }
}

impl TimedSample for PedometerSample {
    fn timestamp(&self) -> f64 {
        self.end_date
    }
}

fn count_or_dashes(value: Option<u32>) -> String {
    value.map_or_else(|| "--".to_string(), |count| count.to_string())
}

impl fmt::Display for PedometerSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "from {} to {}, {} step(s), floors {} down | {} up",
            Clock::from_secs(self.start_date).time_of_day(),
            Clock::from_secs(self.end_date).time_of_day(),
            self.number_of_steps,
            count_or_dashes(self.floors_descended),
            count_or_dashes(self.floors_ascended),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PedometerEventKind {
    Pause,
    Resume,
}

/// Transition reported by the live pedometer event stream.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PedometerEvent {
    pub date: f64,
    pub kind: PedometerEventKind,
}

impl PedometerEvent {
    pub fn new(date: f64, kind: PedometerEventKind) -> Self {
        Self { date, kind }
    }
}

impl TimedSample for PedometerEvent {
    fn timestamp(&self) -> f64 {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_optional_metrics() {
        let sample = PedometerSample::new(100.0, 160.0, 72);
        assert_eq!(sample.number_of_steps(), 72);
        assert_eq!(sample.duration_secs(), 60.0);
        assert!(sample.distance().is_none());
        assert!(sample.floors_ascended().is_none());
        assert!(sample.current_cadence().is_none());
    }

    #[test]
    fn test_display_with_missing_floors() {
        let sample = PedometerSample::builder(3600.0, 3723.0, 12)
            .floors_ascended(2)
            .build();
        assert_eq!(
            sample.to_string(),
            "from 01:00:00 to 01:02:03, 12 step(s), floors -- down | 2 up"
        );
    }

    #[test]
    fn test_builder_sets_optional_metrics() {
        let sample = PedometerSample::builder(0.0, 10.0, 18)
            .distance(13.5)
            .floors(1, 0)
            .current_cadence(1.8)
            .current_pace(0.74)
            .build();

        assert_eq!(sample.start_date(), 0.0);
        assert_eq!(sample.end_date(), 10.0);
        assert_eq!(sample.distance(), Some(13.5));
        assert_eq!(sample.floors_ascended(), Some(1));
        assert_eq!(sample.floors_descended(), Some(0));
        assert_eq!(sample.current_cadence(), Some(1.8));
        assert_eq!(sample.current_pace(), Some(0.74));
        assert!(sample.average_active_pace().is_none());
    }

    #[test]
    fn test_timestamp_is_end_of_interval() {
        let sample = PedometerSample::new(1.0, 5.0, 0);
        assert_eq!(sample.timestamp(), 5.0);
        let event = PedometerEvent::new(3.0, PedometerEventKind::Pause);
        assert_eq!(event.timestamp(), 3.0);
    }
}
