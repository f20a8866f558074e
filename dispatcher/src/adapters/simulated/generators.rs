use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;

use common::{
    AccelerationSample, Activation, ActivityConfidence, ActivityMode, ActivitySample, Attitude,
    MagneticField, MagneticFieldAccuracy, MotionSample, PedometerEvent, PedometerEventKind,
    PedometerSample, SourceResult, XYZ,
};

use super::gaussian::{perturb, GaussianNoise};
use super::{Generator, GeneratorFactory};
use common::constants::FULL_TURN_DEGREES;

const YAW_RATE_DEGREES_PER_SEC: f64 = 15.0;
const EARTH_FIELD_MICROTESLA: [f64; 3] = [22.0, 0.0, -42.0];
const WALKING_CADENCE_STEPS_PER_SEC: f64 = 1.8;
const STRIDE_METERS: f64 = 0.75;
const FLOOR_CLIMB_PROBABILITY: f64 = 0.05;
const ACTIVITY_CYCLE: [ActivityMode; 4] = [
    ActivityMode::Stationary,
    ActivityMode::Walking,
    ActivityMode::Running,
    ActivityMode::Walking,
];

fn gravity() -> XYZ {
    XYZ::new([0.0, 0.0, -1.0])
}

/// Device lying flat and turning slowly about the vertical axis.
///
/// Reference frames without a heading report `-1.0`.
pub(crate) fn motion(noise: Option<GaussianNoise>) -> GeneratorFactory<MotionSample> {
    Arc::new(move |activation: &Activation| -> Generator<MotionSample> {
        let noise = noise.clone();
        let has_heading = activation
            .reference_frame
            .map(|frame| frame.has_heading())
            .unwrap_or(false);
        let mut origin: Option<f64> = None;

        Box::new(move |rng: &mut StdRng, now: f64| -> Option<SourceResult<MotionSample>> {
            let elapsed = now - *origin.get_or_insert(now);
            let heading = (elapsed * YAW_RATE_DEGREES_PER_SEC).rem_euclid(FULL_TURN_DEGREES);
            let attitude = Attitude::from_euler_angles(0.0, 0.0, -heading.to_radians());

            let sample = MotionSample::builder(now)
                .attitude(attitude)
                .rotation_rate(perturb(
                    noise.as_ref(),
                    rng,
                    XYZ::new([0.0, 0.0, -YAW_RATE_DEGREES_PER_SEC.to_radians()]),
                ))
                .gravity(attitude.to_device_frame(gravity()))
                .user_acceleration(perturb(noise.as_ref(), rng, XYZ::default()))
                .magnetic_field(MagneticField {
                    field: attitude.to_device_frame(XYZ::new(EARTH_FIELD_MICROTESLA)),
                    accuracy: MagneticFieldAccuracy::High,
                })
                .heading(if has_heading { heading } else { -1.0 })
                .build();
            Some(Ok(Some(sample)))
        })
    })
}

/// Raw accelerometer at rest: gravity along -Z plus optional noise.
pub(crate) fn acceleration(noise: Option<GaussianNoise>) -> GeneratorFactory<AccelerationSample> {
    Arc::new(move |_activation: &Activation| -> Generator<AccelerationSample> {
        let noise = noise.clone();
        Box::new(move |rng: &mut StdRng, now: f64| -> Option<SourceResult<AccelerationSample>> {
            let acceleration = perturb(noise.as_ref(), rng, gravity());
            Some(Ok(Some(AccelerationSample::from_xyz(now, acceleration))))
        })
    })
}

/// Walks through a fixed activity cycle, one transition per tick.
pub(crate) fn activity() -> GeneratorFactory<ActivitySample> {
    Arc::new(|_activation: &Activation| -> Generator<ActivitySample> {
        let mut step = 0usize;
        Box::new(move |rng: &mut StdRng, now: f64| -> Option<SourceResult<ActivitySample>> {
            let mode = ACTIVITY_CYCLE[step % ACTIVITY_CYCLE.len()];
            step += 1;
            let confidence = match rng.gen_range(0..3) {
                0 => ActivityConfidence::Low,
                1 => ActivityConfidence::Medium,
                _ => ActivityConfidence::High,
            };
            let modes = [mode].into_iter().collect();
            Some(Ok(Some(ActivitySample::new(now, confidence, modes))))
        })
    })
}

/// Cumulative step counts since `activation.since`.
pub(crate) fn pedometer() -> GeneratorFactory<PedometerSample> {
    Arc::new(|activation: &Activation| -> Generator<PedometerSample> {
        let since = activation.since;
        let mut floors_ascended = 0u32;
        Box::new(move |rng: &mut StdRng, now: f64| -> Option<SourceResult<PedometerSample>> {
            let start_date = since.unwrap_or(now);
            let number_of_steps =
                ((now - start_date).max(0.0) * WALKING_CADENCE_STEPS_PER_SEC) as u32;
            if rng.gen_bool(FLOOR_CLIMB_PROBABILITY) {
                floors_ascended += 1;
            }

            let pace = 1.0 / (WALKING_CADENCE_STEPS_PER_SEC * STRIDE_METERS);
            let sample = PedometerSample::builder(start_date, now, number_of_steps)
                .distance(number_of_steps as f64 * STRIDE_METERS)
                .floors(floors_ascended, 0)
                .current_cadence(WALKING_CADENCE_STEPS_PER_SEC)
                .current_pace(pace)
                .average_active_pace(pace)
                .build();
            Some(Ok(Some(sample)))
        })
    })
}

/// Alternates pause and resume, starting with pause.
pub(crate) fn pedometer_events() -> GeneratorFactory<PedometerEvent> {
    Arc::new(|_activation: &Activation| -> Generator<PedometerEvent> {
        let mut paused = false;
        Box::new(move |_rng: &mut StdRng, now: f64| -> Option<SourceResult<PedometerEvent>> {
            paused = !paused;
            let kind = if paused {
                PedometerEventKind::Pause
            } else {
                PedometerEventKind::Resume
            };
            Some(Ok(Some(PedometerEvent::new(now, kind))))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{AttitudeReferenceFrame, TimedSample};
    use rand::SeedableRng;
    use std::time::Duration;

    fn drain<S>(
        factory: &GeneratorFactory<S>,
        activation: &Activation,
        timestamps: &[f64],
    ) -> Vec<SourceResult<S>> {
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator = factory(activation);
        timestamps
            .iter()
            .filter_map(|now| generator(&mut rng, *now))
            .collect()
    }

    fn samples<S>(results: Vec<SourceResult<S>>) -> Vec<S> {
        results
            .into_iter()
            .map(|result| result.unwrap().unwrap())
            .collect()
    }

    #[test]
    fn test_motion_heading_rotates() {
        let activation = Activation::periodic(Duration::from_millis(100))
            .with_reference_frame(AttitudeReferenceFrame::XMagneticNorthZVertical);
        let motion = samples(drain(&motion(None), &activation, &[100.0, 101.0, 103.0]));

        assert_eq!(motion[0].heading(), 0.0);
        assert!((motion[1].heading() - 15.0).abs() < 1e-9);
        assert!((motion[2].heading() - 45.0).abs() < 1e-9);
        assert!((motion[2].gravity() - gravity()).magnitude() < 1e-9);
        assert!(motion.iter().all(|sample| sample.has_heading()));
    }

    #[test]
    fn test_motion_without_heading() {
        let activation = Activation::periodic(Duration::from_millis(100))
            .with_reference_frame(AttitudeReferenceFrame::XArbitraryZVertical);
        let motion = samples(drain(&motion(None), &activation, &[1.0, 2.0]));
        assert!(motion.iter().all(|sample| sample.heading() < 0.0));
    }

    #[test]
    fn test_acceleration_at_rest() {
        let activation = Activation::periodic(Duration::from_millis(100));
        let acceleration = samples(drain(&acceleration(None), &activation, &[5.0]));
        assert_eq!(acceleration[0].acceleration(), gravity());
        assert_eq!(acceleration[0].timestamp(), 5.0);
    }

    #[test]
    fn test_activity_cycle() {
        let activity = samples(drain(
            &activity(),
            &Activation::on_change(),
            &[1.0, 2.0, 3.0, 4.0, 5.0],
        ));
        let modes: Vec<ActivityMode> = activity.iter().map(|s| s.dominant_mode()).collect();
        assert_eq!(
            modes,
            vec![
                ActivityMode::Stationary,
                ActivityMode::Walking,
                ActivityMode::Running,
                ActivityMode::Walking,
                ActivityMode::Stationary,
            ]
        );
    }

    #[test]
    fn test_pedometer_counts_from_lookback() {
        let pedometer = samples(drain(&pedometer(), &Activation::since(0.0), &[10.0, 20.0]));
        assert_eq!(pedometer[0].start_date(), 0.0);
        assert_eq!(pedometer[0].number_of_steps(), 18);
        assert_eq!(pedometer[1].number_of_steps(), 36);
        assert_eq!(pedometer[1].distance(), Some(27.0));
        assert_eq!(pedometer[1].floors_descended(), Some(0));
    }

    #[test]
    fn test_pedometer_events_alternate() {
        let events = samples(drain(
            &pedometer_events(),
            &Activation::on_change(),
            &[1.0, 2.0, 3.0],
        ));
        let kinds: Vec<PedometerEventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PedometerEventKind::Pause,
                PedometerEventKind::Resume,
                PedometerEventKind::Pause
            ]
        );
    }
}
