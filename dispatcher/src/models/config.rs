use serde::{Deserialize, Serialize};
use std::time::Duration;

use common::{AttitudeReferenceFrame, SourceKind};

use crate::constants::{
    DEFAULT_ACCELEROMETER_INTERVAL_MILLIS, DEFAULT_MOTION_INTERVAL_MILLIS,
    DEFAULT_PEDOMETER_LOOKBACK_SECS, MAX_PEDOMETER_LOOKBACK_SECS,
};
use crate::models::errors::ConfigError;
use crate::models::state::ActivationPolicy;

/// Activation policy per source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationPolicies {
    pub motion: ActivationPolicy,
    pub accelerometer: ActivationPolicy,
    pub activity: ActivationPolicy,
    pub pedometer: ActivationPolicy,
}

impl ActivationPolicies {
    pub fn get(&self, kind: SourceKind) -> ActivationPolicy {
        match kind {
            SourceKind::Motion => self.motion,
            SourceKind::Accelerometer => self.accelerometer,
            SourceKind::Activity => self.activity,
            SourceKind::Pedometer => self.pedometer,
        }
    }

    /// Applies `policy` to every source.
    pub fn uniform(policy: ActivationPolicy) -> Self {
        Self {
            motion: policy,
            accelerometer: policy,
            activity: policy,
            pedometer: policy,
        }
    }
}

impl Default for ActivationPolicies {
    fn default() -> Self {
        Self {
            motion: ActivationPolicy::SkipIfActive,
            accelerometer: ActivationPolicy::SkipIfActive,
            activity: ActivationPolicy::Restart,
            pedometer: ActivationPolicy::Restart,
        }
    }
}

/// Dispatcher configuration.
///
/// # Examples
///
/// ```
/// use motion_dispatcher::DispatcherConfig;
///
/// let config = DispatcherConfig::from_json(r#"{ "motion_interval_millis": 50 }"#).unwrap();
/// assert_eq!(config.motion_interval().as_millis(), 50);
/// assert_eq!(config.accelerometer_interval().as_millis(), 100);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    pub motion_interval_millis: u64,
    pub accelerometer_interval_millis: u64,
    /// History replayed by the pedometer updates stream on start.
    pub pedometer_lookback_secs: f64,
    pub attitude_reference_frame: AttitudeReferenceFrame,
    pub policies: ActivationPolicies,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            motion_interval_millis: DEFAULT_MOTION_INTERVAL_MILLIS,
            accelerometer_interval_millis: DEFAULT_ACCELEROMETER_INTERVAL_MILLIS,
            pedometer_lookback_secs: DEFAULT_PEDOMETER_LOOKBACK_SECS as f64,
            attitude_reference_frame: AttitudeReferenceFrame::default(),
            policies: ActivationPolicies::default(),
        }
    }
}

impl DispatcherConfig {
    /// Parses and validates a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DispatcherConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.motion_interval_millis == 0 {
            return Err(ConfigError::ZeroInterval(SourceKind::Motion));
        }
        if self.accelerometer_interval_millis == 0 {
            return Err(ConfigError::ZeroInterval(SourceKind::Accelerometer));
        }
        if !(0.0..=MAX_PEDOMETER_LOOKBACK_SECS).contains(&self.pedometer_lookback_secs) {
            return Err(ConfigError::InvalidLookback(self.pedometer_lookback_secs));
        }
        Ok(())
    }

    pub fn motion_interval(&self) -> Duration {
        Duration::from_millis(self.motion_interval_millis)
    }

    pub fn accelerometer_interval(&self) -> Duration {
        Duration::from_millis(self.accelerometer_interval_millis)
    }

    /// Look-back clamped to `[0, 7 days]`. An unset or NaN value falls back to the default.
    pub fn pedometer_lookback(&self) -> Duration {
        let secs = self
            .pedometer_lookback_secs
            .clamp(0.0, MAX_PEDOMETER_LOOKBACK_SECS);
        Duration::try_from_secs_f64(secs)
            .unwrap_or(Duration::from_secs(DEFAULT_PEDOMETER_LOOKBACK_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatcherConfig::default();
        assert_eq!(config.motion_interval(), Duration::from_millis(100));
        assert_eq!(config.accelerometer_interval(), Duration::from_millis(100));
        assert_eq!(config.pedometer_lookback(), Duration::from_secs(120));
        assert_eq!(
            config.attitude_reference_frame,
            AttitudeReferenceFrame::XMagneticNorthZVertical
        );
        assert_eq!(
            config.policies.get(SourceKind::Activity),
            ActivationPolicy::Restart
        );
        assert_eq!(
            config.policies.get(SourceKind::Motion),
            ActivationPolicy::SkipIfActive
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = DispatcherConfig::from_json(
            r#"{
                "accelerometer_interval_millis": 20,
                "attitude_reference_frame": "x_arbitrary_z_vertical",
                "policies": { "activity": "skip_if_active" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.accelerometer_interval(), Duration::from_millis(20));
        assert_eq!(config.motion_interval(), Duration::from_millis(100));
        assert_eq!(
            config.attitude_reference_frame,
            AttitudeReferenceFrame::XArbitraryZVertical
        );
        assert_eq!(config.policies.activity, ActivationPolicy::SkipIfActive);
        assert_eq!(config.policies.pedometer, ActivationPolicy::Restart);
    }

    #[test]
    fn test_from_json_rejects_zero_interval() {
        let result = DispatcherConfig::from_json(r#"{ "motion_interval_millis": 0 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::ZeroInterval(SourceKind::Motion))
        ));
    }

    #[test]
    fn test_from_json_rejects_negative_lookback() {
        let result = DispatcherConfig::from_json(r#"{ "pedometer_lookback_secs": -5.0 }"#);
        assert!(matches!(result, Err(ConfigError::InvalidLookback(_))));
    }

    #[test]
    fn test_from_json_rejects_lookback_beyond_history() {
        let result = DispatcherConfig::from_json(r#"{ "pedometer_lookback_secs": 1e20 }"#);
        assert!(matches!(result, Err(ConfigError::InvalidLookback(v)) if v == 1e20));

        let week = DispatcherConfig::from_json(r#"{ "pedometer_lookback_secs": 604800 }"#).unwrap();
        assert_eq!(week.pedometer_lookback(), Duration::from_secs(604_800));
    }

    #[test]
    fn test_unvalidated_lookback_does_not_panic() {
        let mut config = DispatcherConfig::default();
        config.pedometer_lookback_secs = 1e20;
        assert_eq!(config.pedometer_lookback(), Duration::from_secs(604_800));

        config.pedometer_lookback_secs = f64::NAN;
        assert_eq!(config.pedometer_lookback(), Duration::from_secs(120));

        config.pedometer_lookback_secs = -1.0;
        assert_eq!(config.pedometer_lookback(), Duration::ZERO);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            DispatcherConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_uniform_policies() {
        let policies = ActivationPolicies::uniform(ActivationPolicy::Restart);
        for kind in SourceKind::ALL {
            assert_eq!(policies.get(kind), ActivationPolicy::Restart);
        }
    }
}
