//! Drive a servo PWM channel from the command line.
//!
//! Resolves the PWM controller, exports the channel if needed and applies
//! the requested attribute writes. Useful for checking servo wiring and
//! calibration endpoints without the servo manager running.
//!
//! Usage:
//!   servo_pwmctl [OPTIONS]
//!
//! Options:
//!   -c, --channel <N>        PWM channel (default: 0)
//!   --class-root <DIR>       PWM class directory (default: /sys/class/pwm)
//!   --device <ID>            Platform device id (default: 0000:00:17.0)
//!   --controller <DIR>       Use this pwmchip directory, skip discovery
//!   --period <NS>            Write the period
//!   --duty <NS>              Write the duty cycle
//!   --enable / --disable     Write the enable flag
//!   -v, --verbose            Show debug messages

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use servo_pwm::platform::traits::duty_first;
use servo_pwm::{LogLevel, SharedLogger, StderrLogger, SysfsConfig, SysfsPwm};

struct Args {
    channel: u32,
    config: SysfsConfig,
    period: Option<u64>,
    duty: Option<u64>,
    enable: Option<bool>,
    verbose: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        channel: 0,
        config: SysfsConfig::default(),
        period: None,
        duty: None,
        enable: None,
        verbose: false,
    };

    let raw: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "-c" | "--channel" => {
                i += 1;
                args.channel = parse_arg(&raw, i, "channel");
            }
            "--class-root" => {
                i += 1;
                args.config.class_root = PathBuf::from(value_arg(&raw, i, "class-root"));
            }
            "--device" => {
                i += 1;
                args.config.device_id = value_arg(&raw, i, "device").to_string();
            }
            "--controller" => {
                i += 1;
                args.config.controller = Some(PathBuf::from(value_arg(&raw, i, "controller")));
            }
            "--period" => {
                i += 1;
                args.period = Some(parse_arg(&raw, i, "period"));
            }
            "--duty" => {
                i += 1;
                args.duty = Some(parse_arg(&raw, i, "duty"));
            }
            "--enable" => args.enable = Some(true),
            "--disable" => args.enable = Some(false),
            "-v" | "--verbose" => args.verbose = true,
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    args
}

fn value_arg<'a>(raw: &'a [String], i: usize, name: &str) -> &'a str {
    raw.get(i).map(String::as_str).unwrap_or_else(|| {
        eprintln!("Error: --{name} requires a value");
        process::exit(1);
    })
}

fn parse_arg<T: std::str::FromStr>(raw: &[String], i: usize, name: &str) -> T {
    value_arg(raw, i, name).parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid value for --{name}");
        process::exit(1);
    })
}

/// Duty cycle currently programmed in the channel, if readable.
fn read_current_duty(pwm: &SysfsPwm) -> Option<u64> {
    fs::read_to_string(pwm.channel_path().join("duty_cycle"))
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn print_usage() {
    eprintln!(
        "Usage: servo_pwmctl [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 -c, --channel <N>        PWM channel (default: 0)\n\
         \x20 --class-root <DIR>       PWM class directory (default: /sys/class/pwm)\n\
         \x20 --device <ID>            Platform device id (default: 0000:00:17.0)\n\
         \x20 --controller <DIR>       Use this pwmchip directory, skip discovery\n\
         \x20 --period <NS>            Write the period\n\
         \x20 --duty <NS>              Write the duty cycle\n\
         \x20 --enable / --disable     Write the enable flag\n\
         \x20 -v, --verbose            Show debug messages\n\
         \x20 -h, --help               Show this help"
    );
}

fn main() {
    let args = parse_args();

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let logger: SharedLogger = Arc::new(StderrLogger::new(level));

    let mut pwm = match SysfsPwm::new(args.channel, &args.config, logger) {
        Ok(pwm) => pwm,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    // A fresh driver has no history, so order against what the kernel holds
    let current_duty = read_current_duty(&pwm).unwrap_or(0);
    let mut failed = false;
    match (args.period, args.duty) {
        (Some(period), Some(duty)) if duty_first(period, current_duty) => {
            failed |= pwm.set_duty(duty).is_err();
            failed |= pwm.set_period(period).is_err();
        }
        (period, duty) => {
            if let Some(period) = period {
                failed |= pwm.set_period(period).is_err();
            }
            if let Some(duty) = duty {
                failed |= pwm.set_duty(duty).is_err();
            }
        }
    }
    if let Some(enable) = args.enable {
        failed |= pwm.set_enabled(enable).is_err();
    }

    println!(
        "channel {} on {}: period={} duty={} enabled={}",
        pwm.channel(),
        pwm.controller_path().display(),
        pwm.period(),
        pwm.duty(),
        pwm.is_enabled()
    );

    if failed {
        process::exit(1);
    }
}
