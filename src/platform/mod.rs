//! Platform abstraction layer
//!
//! This module provides the PWM abstraction used by servo managers and its
//! Linux sysfs implementation.

pub mod error;
pub mod sysfs;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, PwmError, Result};
pub use traits::{PwmConfig, PwmInterface};
