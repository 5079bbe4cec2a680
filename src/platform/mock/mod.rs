//! Mock platform implementation for testing
//!
//! This module provides an in-memory [`PwmInterface`](crate::platform::PwmInterface)
//! so servo managers can be unit tested without a sysfs tree.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "mock")]
//! # {
//! use servo_pwm::platform::mock::{MockPwm, MockWrite};
//! use servo_pwm::PwmInterface;
//!
//! let mut pwm = MockPwm::new();
//! pwm.set_period(20_000_000).unwrap();
//! assert_eq!(pwm.writes(), &[MockWrite::Period(20_000_000)]);
//! # }
//! ```

#![cfg(any(test, feature = "mock"))]

mod pwm;

pub use pwm::{MockPwm, MockWrite};
