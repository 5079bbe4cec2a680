//! Sysfs PWM backend configuration

use std::path::{Path, PathBuf};

use crate::platform::{PlatformError, Result};

/// Default mount point of the kernel PWM class
pub const DEFAULT_CLASS_ROOT: &str = "/sys/class/pwm";

/// PCI address of the PWM block on the DeepRacer compute board
pub const DEFAULT_DEVICE_ID: &str = "0000:00:17.0";

/// Where to look for the PWM controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsConfig {
    /// Directory holding the `pwmchip*` entries
    pub class_root: PathBuf,
    /// Platform device identifier the controller must belong to
    pub device_id: String,
    /// Pinned controller directory; skips discovery when set
    pub controller: Option<PathBuf>,
}

impl Default for SysfsConfig {
    fn default() -> Self {
        Self {
            class_root: PathBuf::from(DEFAULT_CLASS_ROOT),
            device_id: DEFAULT_DEVICE_ID.to_string(),
            controller: None,
        }
    }
}

impl SysfsConfig {
    pub fn with_class_root(mut self, class_root: impl Into<PathBuf>) -> Self {
        self.class_root = class_root.into();
        self
    }

    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = device_id.into();
        self
    }

    /// Pin the controller directory instead of discovering it.
    pub fn with_controller(mut self, controller: impl AsRef<Path>) -> Self {
        self.controller = Some(controller.as_ref().to_path_buf());
        self
    }

    /// Check that discovery has something to match against.
    pub fn validate(&self) -> Result<()> {
        if self.controller.is_some() {
            return Ok(());
        }
        if self.device_id.trim().is_empty() {
            return Err(PlatformError::InvalidConfig("device_id must not be empty"));
        }
        if self.class_root.as_os_str().is_empty() {
            return Err(PlatformError::InvalidConfig("class_root must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_deepracer_board() {
        let config = SysfsConfig::default();
        assert_eq!(config.class_root, PathBuf::from("/sys/class/pwm"));
        assert_eq!(config.device_id, "0000:00:17.0");
        assert!(config.controller.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_device_id_rejected() {
        let config = SysfsConfig::default().with_device_id("  ");
        assert!(matches!(
            config.validate(),
            Err(PlatformError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_pinned_controller_skips_device_check() {
        let config = SysfsConfig::default()
            .with_device_id("")
            .with_controller("/sys/class/pwm/pwmchip1");
        assert!(config.validate().is_ok());
        assert_eq!(
            config.controller.as_deref(),
            Some(Path::new("/sys/class/pwm/pwmchip1"))
        );
    }
}
