//! Platform error types
//!
//! This module defines error types for platform operations.

use std::io;
use std::path::PathBuf;

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Platform-level errors
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// PWM operation failed
    #[error("PWM error: {0}")]
    Pwm(#[from] PwmError),

    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// Filesystem access outside of a single attribute write failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl PlatformError {
    /// Returns the PWM-specific error, if this is one.
    pub fn as_pwm(&self) -> Option<&PwmError> {
        match self {
            PlatformError::Pwm(e) => Some(e),
            _ => None,
        }
    }
}

/// PWM-specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PwmError {
    /// No `pwmchip*` entry under the class root belongs to the configured device
    #[error("no PWM controller for device {device_id} under {}", class_root.display())]
    ControllerNotFound {
        device_id: String,
        class_root: PathBuf,
    },

    /// Attribute file missing or not writable
    #[error("failed to open {}: {kind}", path.display())]
    AttributeOpen { path: PathBuf, kind: io::ErrorKind },

    /// Kernel rejected the value written to the attribute
    #[error("failed to write {}: {kind}", path.display())]
    AttributeWrite { path: PathBuf, kind: io::ErrorKind },
}
