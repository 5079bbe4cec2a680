//! Sysfs PWM channel driver
//!
//! One [`SysfsPwm`] owns one hardware channel for the lifetime of the
//! process. Construction exports the channel if a previous run has not
//! already done so; after that every setter is exactly one attribute write.
//!
//! ## Requested vs. confirmed state
//!
//! `period()`, `duty()` and `is_enabled()` return what this process last
//! asked for. The hardware is never read back, and the tracked value is
//! updated even when the write fails. Check the `Result` of the setter to
//! find out whether the value reached the kernel.

use std::path::{Path, PathBuf};

use super::attribute::write_attribute;
use super::config::SysfsConfig;
use super::resolver::resolve_controller;
use crate::core::logging::SharedLogger;
use crate::log_info;
use crate::platform::{PwmInterface, Result};

/// Channel lifecycle, derived from the filesystem and the setters used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// `pwm<ch>/` does not exist yet
    Unexported,
    /// `pwm<ch>/` exists, nothing written by this driver
    Exported,
    /// Period or duty cycle has been requested at least once
    Configured,
}

/// PWM channel driven through `/sys/class/pwm`
pub struct SysfsPwm {
    channel: u32,
    controller: PathBuf,
    period: u64,
    duty: u64,
    enabled: bool,
    configured: bool,
    logger: SharedLogger,
}

impl SysfsPwm {
    /// Resolve the controller from `config` and export `channel`.
    ///
    /// # Errors
    ///
    /// Fails only when the controller cannot be resolved. A failed export
    /// write is logged and the channel is treated as exported; the kernel
    /// is not asked to confirm it.
    pub fn new(channel: u32, config: &SysfsConfig, logger: SharedLogger) -> Result<Self> {
        let controller = resolve_controller(config, &*logger)?;
        Ok(Self::with_controller(controller, channel, logger))
    }

    /// Export `channel` on an already known controller directory.
    pub fn with_controller(
        controller: impl Into<PathBuf>,
        channel: u32,
        logger: SharedLogger,
    ) -> Self {
        let pwm = Self {
            channel,
            controller: controller.into(),
            period: 0,
            duty: 0,
            enabled: false,
            configured: false,
            logger,
        };
        pwm.export();
        pwm
    }

    fn export(&self) {
        log_info!(self.logger, "Servo syspath: {}", self.controller.display());

        if self.is_exported() {
            log_info!(
                self.logger,
                "Servo channel {} has already been exported",
                self.channel
            );
            return;
        }

        let export = self.controller.join("export");
        if write_attribute(&export, u64::from(self.channel), &*self.logger).is_ok() {
            log_info!(self.logger, "Exported servo channel {}", self.channel);
        }
    }

    /// Hardware channel number
    pub fn channel(&self) -> u32 {
        self.channel
    }

    /// Controller directory resolved at construction
    pub fn controller_path(&self) -> &Path {
        &self.controller
    }

    /// `<controller>/pwm<channel>`
    pub fn channel_path(&self) -> PathBuf {
        self.controller.join(format!("pwm{}", self.channel))
    }

    /// Re-checks the filesystem on every call.
    pub fn is_exported(&self) -> bool {
        self.channel_path().is_dir()
    }

    /// Current lifecycle state.
    ///
    /// Export state is read from the filesystem, not from the optimistic
    /// transition taken at construction: if the kernel has not created
    /// `pwm<ch>/` the channel reports `Unexported` even after a successful
    /// export write.
    pub fn state(&self) -> ChannelState {
        if !self.is_exported() {
            ChannelState::Unexported
        } else if self.configured {
            ChannelState::Configured
        } else {
            ChannelState::Exported
        }
    }

    /// Write the channel period.
    pub fn set_period(&mut self, period: u64) -> Result<()> {
        self.period = period;
        self.configured = true;
        self.write("period", period)
    }

    /// Last requested period, 0 until first set
    pub fn period(&self) -> u64 {
        self.period
    }

    /// Write the channel duty cycle.
    ///
    /// The kernel rejects a duty cycle above the current period; the driver
    /// passes the value through unchecked.
    pub fn set_duty(&mut self, duty: u64) -> Result<()> {
        self.duty = duty;
        self.configured = true;
        self.write("duty_cycle", duty)
    }

    /// Last requested duty cycle, 0 until first set
    pub fn duty(&self) -> u64 {
        self.duty
    }

    /// Start or stop driving the output.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.enabled = enabled;
        self.write("enable", u64::from(enabled))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn write(&self, attribute: &str, value: u64) -> Result<()> {
        let path = self.channel_path().join(attribute);
        write_attribute(&path, value, &*self.logger)
    }
}

impl std::fmt::Debug for SysfsPwm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SysfsPwm")
            .field("channel", &self.channel)
            .field("controller", &self.controller)
            .field("period", &self.period)
            .field("duty", &self.duty)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl PwmInterface for SysfsPwm {
    fn set_period(&mut self, period: u64) -> Result<()> {
        SysfsPwm::set_period(self, period)
    }

    fn period(&self) -> u64 {
        SysfsPwm::period(self)
    }

    fn set_duty(&mut self, duty: u64) -> Result<()> {
        SysfsPwm::set_duty(self, duty)
    }

    fn duty(&self) -> u64 {
        SysfsPwm::duty(self)
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        SysfsPwm::set_enabled(self, enabled)
    }

    fn is_enabled(&self) -> bool {
        SysfsPwm::is_enabled(self)
    }
}
