//! Mock PWM implementation for testing

use std::io;
use std::path::PathBuf;

use crate::platform::{
    Result,
    error::{PlatformError, PwmError},
    traits::PwmInterface,
};

/// One attribute write seen by the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockWrite {
    Period(u64),
    Duty(u64),
    Enable(bool),
}

/// Mock PWM implementation
///
/// Records every write in order. With [`MockPwm::fail_writes`] set, writes
/// return an error but the requested values are still tracked, matching the
/// sysfs driver. With [`MockPwm::enforce_duty_limit`] set, writes that would
/// leave the hardware duty above the hardware period are refused the way the
/// kernel refuses them.
#[derive(Debug, Default)]
pub struct MockPwm {
    period: u64,
    duty: u64,
    enabled: bool,
    fail_writes: bool,
    enforce_duty_limit: bool,
    hw_period: u64,
    hw_duty: u64,
    writes: Vec<MockWrite>,
}

impl MockPwm {
    /// Create a new mock PWM
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write report a failure
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Refuse writes that would leave duty above period
    pub fn enforce_duty_limit(&mut self, enforce: bool) {
        self.enforce_duty_limit = enforce;
    }

    /// Writes that reached the mock hardware, oldest first
    pub fn writes(&self) -> &[MockWrite] {
        &self.writes
    }

    /// Period and duty the mock hardware accepted
    pub fn hardware(&self) -> (u64, u64) {
        (self.hw_period, self.hw_duty)
    }

    fn record(&mut self, write: MockWrite, attribute: &str) -> Result<()> {
        let rejected = match write {
            MockWrite::Period(period) => self.enforce_duty_limit && self.hw_duty > period,
            MockWrite::Duty(duty) => self.enforce_duty_limit && duty > self.hw_period,
            MockWrite::Enable(_) => false,
        };
        if self.fail_writes || rejected {
            return Err(PlatformError::Pwm(PwmError::AttributeWrite {
                path: PathBuf::from(attribute),
                kind: io::ErrorKind::InvalidInput,
            }));
        }
        match write {
            MockWrite::Period(period) => self.hw_period = period,
            MockWrite::Duty(duty) => self.hw_duty = duty,
            MockWrite::Enable(_) => {}
        }
        self.writes.push(write);
        Ok(())
    }
}

impl PwmInterface for MockPwm {
    fn set_period(&mut self, period: u64) -> Result<()> {
        self.period = period;
        self.record(MockWrite::Period(period), "period")
    }

    fn period(&self) -> u64 {
        self.period
    }

    fn set_duty(&mut self, duty: u64) -> Result<()> {
        self.duty = duty;
        self.record(MockWrite::Duty(duty), "duty_cycle")
    }

    fn duty(&self) -> u64 {
        self.duty
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.enabled = enabled;
        self.record(MockWrite::Enable(enabled), "enable")
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::traits::PwmConfig;

    #[test]
    fn test_mock_pwm_records_writes() {
        let mut pwm = MockPwm::new();
        assert_eq!(pwm.period(), 0);
        assert_eq!(pwm.duty(), 0);

        pwm.set_period(20_000_000).unwrap();
        pwm.set_duty(1_500_000).unwrap();
        pwm.set_enabled(true).unwrap();

        assert_eq!(
            pwm.writes(),
            &[
                MockWrite::Period(20_000_000),
                MockWrite::Duty(1_500_000),
                MockWrite::Enable(true),
            ]
        );
        assert!(pwm.is_enabled());
    }

    #[test]
    fn test_mock_pwm_failure_still_tracks_request() {
        let mut pwm = MockPwm::new();
        pwm.fail_writes(true);

        assert!(pwm.set_duty(1_200_000).is_err());
        assert_eq!(pwm.duty(), 1_200_000);
        assert!(pwm.writes().is_empty());
    }

    #[test]
    fn test_apply_writes_period_before_duty() {
        let mut pwm = MockPwm::new();
        pwm.apply(&PwmConfig::default()).unwrap();

        assert_eq!(
            pwm.writes(),
            &[MockWrite::Period(20_000_000), MockWrite::Duty(1_500_000)]
        );
    }

    #[test]
    fn test_apply_reports_first_error() {
        let mut pwm = MockPwm::new();
        pwm.fail_writes(true);

        let err = pwm.apply(&PwmConfig::default()).unwrap_err();
        assert!(matches!(
            err.as_pwm(),
            Some(PwmError::AttributeWrite { path, .. }) if path == &PathBuf::from("period")
        ));
        assert_eq!(pwm.duty(), 1_500_000);
    }

    #[test]
    fn test_apply_shrinking_period_writes_duty_first() {
        let mut pwm = MockPwm::new();
        pwm.enforce_duty_limit(true);
        pwm.apply(&PwmConfig::default()).unwrap();

        let narrow = PwmConfig {
            period: 1_000_000,
            duty: 500_000,
        };
        pwm.apply(&narrow).unwrap();

        assert_eq!(
            &pwm.writes()[2..],
            &[MockWrite::Duty(500_000), MockWrite::Period(1_000_000)]
        );
        assert_eq!(pwm.hardware(), (1_000_000, 500_000));
        assert_eq!((pwm.period(), pwm.duty()), (1_000_000, 500_000));
    }

    #[test]
    fn test_apply_growing_period_writes_period_first() {
        let mut pwm = MockPwm::new();
        pwm.enforce_duty_limit(true);
        pwm.apply(&PwmConfig {
            period: 1_000_000,
            duty: 500_000,
        })
        .unwrap();

        pwm.apply(&PwmConfig::default()).unwrap();

        assert_eq!(
            &pwm.writes()[2..],
            &[MockWrite::Period(20_000_000), MockWrite::Duty(1_500_000)]
        );
        assert_eq!(pwm.hardware(), (20_000_000, 1_500_000));
    }

    #[test]
    fn test_duty_limit_rejects_duty_above_period() {
        let mut pwm = MockPwm::new();
        pwm.enforce_duty_limit(true);
        pwm.set_period(1_000_000).unwrap();

        assert!(pwm.set_duty(2_000_000).is_err());
        assert_eq!(pwm.duty(), 2_000_000);
        assert_eq!(pwm.hardware(), (1_000_000, 0));
    }
}
