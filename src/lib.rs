//! servo_pwm - Servo PWM channel driver for Linux sysfs
//!
//! This library drives a hardware steering/throttle servo through the kernel's
//! sysfs PWM class interface (`/sys/class/pwm`). It discovers the PWM
//! controller for the board, exports a channel, and writes the channel's
//! period and duty cycle attributes.
//!
//! Calibration math, messaging and LED control belong to the servo manager
//! that consumes this crate.

// Platform abstraction layer (PWM trait, sysfs backend, mock)
pub mod platform;

// Core systems (injected logging)
pub mod core;

pub use crate::core::logging::{
    FacadeLogger, LogEntry, LogLevel, Logger, MemoryLogger, SharedLogger, StderrLogger,
};
pub use platform::sysfs::{ChannelState, SysfsConfig, SysfsPwm};
pub use platform::{PlatformError, PwmError, PwmInterface, Result};
