//! PWM controller discovery
//!
//! The kernel creates one `pwmchip<N>` entry per PWM block it enumerates,
//! and `N` depends on probe order. The order is not guaranteed to be stable
//! across boots or kernel versions, so the controller is found by the
//! platform device it belongs to rather than by index:
//!
//! ```text
//! /sys/class/pwm/pwmchip1 -> ../../devices/pci0000:00/0000:00:17.0/pwm/pwmchip1
//! ```

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use super::config::SysfsConfig;
use crate::core::logging::Logger;
use crate::platform::{PwmError, Result};
use crate::{log_debug, log_error, log_info, log_warn};

const CHIP_PREFIX: &str = "pwmchip";

/// Find the controller directory for `config.device_id`.
///
/// Returns `config.controller` unchanged when it is pinned. Otherwise every
/// `pwmchip<N>` entry under `config.class_root` is checked in ascending `N`
/// and the first one whose link target (or `device` link target) contains
/// the device id as a path component wins.
///
/// # Errors
///
/// - `PlatformError::InvalidConfig` if the config cannot be matched against
/// - `PlatformError::Io` if the class root cannot be listed
/// - [`PwmError::ControllerNotFound`] if no entry belongs to the device
pub fn resolve_controller(config: &SysfsConfig, logger: &dyn Logger) -> Result<PathBuf> {
    config.validate()?;

    if let Some(controller) = &config.controller {
        log_info!(logger, "Using pinned PWM controller {}", controller.display());
        return Ok(controller.clone());
    }

    let mut chips = Vec::new();
    for entry in fs::read_dir(&config.class_root)? {
        let entry = entry?;
        if let Some(index) = chip_index(&entry.file_name()) {
            chips.push((index, entry.path()));
        }
    }
    chips.sort_by_key(|(index, _)| *index);

    let mut matches = chips
        .into_iter()
        .filter(|(_, path)| belongs_to_device(path, &config.device_id));

    let Some((_, controller)) = matches.next() else {
        log_error!(
            logger,
            "No PWM controller for device {} under {}",
            config.device_id,
            config.class_root.display()
        );
        return Err(PwmError::ControllerNotFound {
            device_id: config.device_id.clone(),
            class_root: config.class_root.clone(),
        }
        .into());
    };

    for (_, other) in matches {
        log_warn!(
            logger,
            "Ignoring additional controller {} for device {}",
            other.display(),
            config.device_id
        );
    }

    log_debug!(
        logger,
        "Resolved device {} to {}",
        config.device_id,
        controller.display()
    );
    Ok(controller)
}

/// Parse `N` out of a `pwmchip<N>` entry name.
fn chip_index(name: &OsStr) -> Option<u32> {
    name.to_str()?.strip_prefix(CHIP_PREFIX)?.parse().ok()
}

fn belongs_to_device(chip: &Path, device_id: &str) -> bool {
    link_mentions(chip, device_id) || link_mentions(&chip.join("device"), device_id)
}

fn link_mentions(link: &Path, device_id: &str) -> bool {
    fs::read_link(link)
        .map(|target| {
            target
                .components()
                .any(|c| c.as_os_str() == OsStr::new(device_id))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::logging::{LogLevel, MemoryLogger};
    use crate::platform::PlatformError;
    use std::os::unix::fs::symlink;

    /// Lay out `devices/<dev>/pwm/pwmchip<n>` and link it from `class/`.
    fn add_chip(root: &Path, device: &str, index: u32) {
        let name = format!("pwmchip{}", index);
        let target = root.join("devices").join(device).join("pwm").join(&name);
        fs::create_dir_all(&target).unwrap();
        fs::create_dir_all(root.join("class")).unwrap();
        symlink(&target, root.join("class").join(&name)).unwrap();
    }

    fn config_for(root: &Path) -> SysfsConfig {
        SysfsConfig::default().with_class_root(root.join("class"))
    }

    #[test]
    fn test_chip_index() {
        assert_eq!(chip_index(OsStr::new("pwmchip0")), Some(0));
        assert_eq!(chip_index(OsStr::new("pwmchip12")), Some(12));
        assert_eq!(chip_index(OsStr::new("pwmchip")), None);
        assert_eq!(chip_index(OsStr::new("export")), None);
    }

    #[test]
    fn test_matches_device_not_index() {
        let root = tempfile::tempdir().unwrap();
        add_chip(root.path(), "0000:00:1a.0", 0);
        add_chip(root.path(), "0000:00:17.0", 1);
        add_chip(root.path(), "0000:00:1b.0", 2);

        let controller =
            resolve_controller(&config_for(root.path()), &MemoryLogger::new()).unwrap();

        assert_eq!(controller, root.path().join("class").join("pwmchip1"));
    }

    #[test]
    fn test_enumeration_order_change() {
        let root = tempfile::tempdir().unwrap();
        add_chip(root.path(), "0000:00:17.0", 0);
        add_chip(root.path(), "0000:00:1a.0", 1);

        let controller =
            resolve_controller(&config_for(root.path()), &MemoryLogger::new()).unwrap();

        assert_eq!(controller, root.path().join("class").join("pwmchip0"));
    }

    #[test]
    fn test_device_link_fallback() {
        let root = tempfile::tempdir().unwrap();
        let class = root.path().join("class");
        let chip = class.join("pwmchip3");
        let device = root.path().join("devices").join("0000:00:17.0");
        fs::create_dir_all(&chip).unwrap();
        fs::create_dir_all(&device).unwrap();
        symlink(&device, chip.join("device")).unwrap();

        let controller =
            resolve_controller(&config_for(root.path()), &MemoryLogger::new()).unwrap();

        assert_eq!(controller, chip);
    }

    #[test]
    fn test_partial_id_does_not_match() {
        let root = tempfile::tempdir().unwrap();
        add_chip(root.path(), "0000:00:17.01", 0);

        let err = resolve_controller(&config_for(root.path()), &MemoryLogger::new()).unwrap_err();

        assert!(matches!(
            err.as_pwm(),
            Some(PwmError::ControllerNotFound { .. })
        ));
    }

    #[test]
    fn test_no_match_is_reported() {
        let root = tempfile::tempdir().unwrap();
        add_chip(root.path(), "0000:00:1a.0", 0);
        let logger = MemoryLogger::new();

        let err = resolve_controller(&config_for(root.path()), &logger).unwrap_err();

        assert_eq!(
            err.as_pwm(),
            Some(&PwmError::ControllerNotFound {
                device_id: "0000:00:17.0".to_string(),
                class_root: root.path().join("class"),
            })
        );
        assert!(logger.contains(LogLevel::Error, "0000:00:17.0"));
    }

    #[test]
    fn test_missing_class_root_is_io_error() {
        let root = tempfile::tempdir().unwrap();
        let err = resolve_controller(&config_for(root.path()), &MemoryLogger::new()).unwrap_err();
        assert!(matches!(err, PlatformError::Io(_)));
    }

    #[test]
    fn test_duplicate_match_takes_lowest_index() {
        let root = tempfile::tempdir().unwrap();
        add_chip(root.path(), "0000:00:17.0", 4);
        add_chip(root.path(), "0000:00:17.0", 2);
        let logger = MemoryLogger::new();

        let controller = resolve_controller(&config_for(root.path()), &logger).unwrap();

        assert_eq!(controller, root.path().join("class").join("pwmchip2"));
        assert!(logger.contains(LogLevel::Warn, "pwmchip4"));
    }

    #[test]
    fn test_pinned_controller_skips_discovery() {
        let config = SysfsConfig::default()
            .with_class_root("/does/not/exist")
            .with_controller("/sys/class/pwm/pwmchip1");

        let controller = resolve_controller(&config, &MemoryLogger::new()).unwrap();

        assert_eq!(controller, PathBuf::from("/sys/class/pwm/pwmchip1"));
    }
}
