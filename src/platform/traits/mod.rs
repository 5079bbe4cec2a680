//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod pwm;

// Re-export trait interfaces
pub use pwm::{duty_first, PwmConfig, PwmInterface};
