//! Raw sysfs attribute writes

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::core::logging::Logger;
use crate::platform::{PwmError, Result};
use crate::{log_error, log_warn};

/// Write `value` as decimal text to the attribute at `path`.
///
/// The file is opened write-only, written with a single `write` call and
/// closed when it goes out of scope. Nothing is retried. Failures are logged
/// through `logger` and returned, so callers may either ignore the result
/// (best-effort actuation) or escalate it.
///
/// # Errors
///
/// - [`PwmError::AttributeOpen`] if the attribute does not exist or is not
///   writable. Nothing is written.
/// - [`PwmError::AttributeWrite`] if the kernel rejected the value, e.g. a
///   duty cycle larger than the period.
pub fn write_attribute(path: &Path, value: u64, logger: &dyn Logger) -> Result<()> {
    let mut file = match OpenOptions::new().write(true).truncate(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            log_error!(logger, "Failed to open: {} ({})", path.display(), e);
            return Err(PwmError::AttributeOpen {
                path: path.to_path_buf(),
                kind: e.kind(),
            }
            .into());
        }
    };

    let text = value.to_string();
    match file.write(text.as_bytes()) {
        Ok(written) if written < text.len() => {
            log_warn!(
                logger,
                "Short write to {}: {} of {} bytes",
                path.display(),
                written,
                text.len()
            );
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(e) => {
            log_error!(logger, "Failed to write {} to {}: {}", text, path.display(), e);
            Err(PwmError::AttributeWrite {
                path: path.to_path_buf(),
                kind: e.kind(),
            }
            .into())
        }
    }
}
