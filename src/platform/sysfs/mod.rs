//! Linux sysfs PWM backend
//!
//! Drives PWM channels through the kernel's PWM class interface:
//!
//! ```text
//! <class_root>/pwmchip<N>/export            <- channel id
//! <class_root>/pwmchip<N>/pwm<ch>/period    <- ns
//! <class_root>/pwmchip<N>/pwm<ch>/duty_cycle
//! <class_root>/pwmchip<N>/pwm<ch>/enable
//! ```
//!
//! The kernel only creates `pwm<ch>/` after the channel id has been written
//! to `export`.

pub mod attribute;
pub mod config;
pub mod pwm;
pub mod resolver;

pub use attribute::write_attribute;
pub use config::SysfsConfig;
pub use pwm::{ChannelState, SysfsPwm};
pub use resolver::resolve_controller;
