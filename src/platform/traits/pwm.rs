//! PWM interface trait
//!
//! This module defines the PWM output interface that servo managers program
//! against. Values are in the controller's native time unit (nanoseconds for
//! the Linux PWM class).

use crate::platform::Result;

/// PWM configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmConfig {
    /// PWM period in nanoseconds
    pub period: u64,
    /// Initial duty cycle in nanoseconds
    pub duty: u64,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            period: 20_000_000, // 50 Hz for servos
            duty: 1_500_000,    // servo neutral
        }
    }
}

/// PWM interface trait
///
/// # Safety Invariants
///
/// - Only one owner per PWM channel
/// - No concurrent access to the same PWM channel from multiple contexts
/// - Duty cycle must not exceed the period; the kernel enforces this, not
///   the implementation
///
/// The getters return the last *requested* values. They are updated even
/// when the underlying write fails, so they cannot be used to detect write
/// failures; inspect the returned `Result` instead.
pub trait PwmInterface {
    /// Set PWM period
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Pwm` if the write did not reach the hardware.
    /// The requested value is recorded either way.
    fn set_period(&mut self, period: u64) -> Result<()>;

    /// Last requested period (0 until first set)
    fn period(&self) -> u64;

    /// Set PWM duty cycle
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Pwm` if the write did not reach the hardware.
    /// The requested value is recorded either way.
    fn set_duty(&mut self, duty: u64) -> Result<()>;

    /// Last requested duty cycle (0 until first set)
    fn duty(&self) -> u64;

    /// Enable or disable the output
    fn set_enabled(&mut self, enabled: bool) -> Result<()>;

    /// Last requested enable state
    fn is_enabled(&self) -> bool;

    /// Apply period and duty from `config`
    ///
    /// The kernel rejects any write that would leave duty above period, so
    /// the order depends on the direction of the change: when the new period
    /// is below the current duty, duty goes first; otherwise period goes
    /// first. Both writes are attempted; the first error is returned.
    fn apply(&mut self, config: &PwmConfig) -> Result<()> {
        if duty_first(config.period, self.duty()) {
            let duty = self.set_duty(config.duty);
            let period = self.set_period(config.period);
            duty.and(period)
        } else {
            let period = self.set_period(config.period);
            let duty = self.set_duty(config.duty);
            period.and(duty)
        }
    }
}

/// Whether duty must be written before period.
///
/// True when `new_period` is shorter than `current_duty`; writing the period
/// first would then leave duty above period and the kernel would refuse it.
pub fn duty_first(new_period: u64, current_duty: u64) -> bool {
    new_period < current_duty
}
