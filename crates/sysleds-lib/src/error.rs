//! Unified error type for the sysleds-lib crate.
//!
//! [`LightsError`] covers both failure classes a light operation can hit:
//! an unknown light identifier at open time, and a control-file open/write
//! failure. [`LightsError::status`] maps either one to the integer status
//! convention used by host loaders (0 = success, negative errno on failure).

use std::fmt;
use std::path::PathBuf;

/// `EINVAL` on Linux.
pub const EINVAL: i32 = 22;
/// `EIO` on Linux. Used when an I/O error carries no OS error number.
pub const EIO: i32 = 5;

/// Unified error type for sysleds-lib operations.
#[derive(Debug)]
pub enum LightsError {
    /// `open` was called with a name that is not one of the six light identifiers.
    InvalidLight(String),
    /// A control file could not be opened or written.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Standard I/O error (config persistence).
    Io(std::io::Error),
    /// Configuration validation error.
    Config(String),
    /// Color parsing error.
    Color(String),
}

impl LightsError {
    /// Host status code for this error: `-EINVAL` for an unknown light,
    /// the negated OS error number for I/O failures.
    pub fn status(&self) -> i32 {
        match self {
            LightsError::InvalidLight(_) | LightsError::Config(_) | LightsError::Color(_) => {
                -EINVAL
            }
            LightsError::Write { source, .. } | LightsError::Io(source) => {
                -source.raw_os_error().unwrap_or(EIO)
            }
        }
    }
}

impl fmt::Display for LightsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightsError::InvalidLight(name) => write!(f, "Unknown light: {name:?}"),
            LightsError::Write { path, source } => {
                write!(f, "Failed to write {}: {source}", path.display())
            }
            LightsError::Io(e) => write!(f, "I/O error: {e}"),
            LightsError::Config(e) => write!(f, "Config error: {e}"),
            LightsError::Color(e) => write!(f, "Color error: {e}"),
        }
    }
}

impl std::error::Error for LightsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LightsError::Write { source, .. } => Some(source),
            LightsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LightsError {
    fn from(e: std::io::Error) -> Self {
        LightsError::Io(e)
    }
}

/// Crate-level Result alias using [`LightsError`].
pub type Result<T> = std::result::Result<T, LightsError>;

/// Collapse an operation result into a host status code (0 on success).
pub fn status_of<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.status(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn write_error(kind: io::Error) -> LightsError {
        LightsError::Write {
            path: "/sys/class/leds/red/brightness".into(),
            source: kind,
        }
    }

    #[test]
    fn invalid_light_is_einval() {
        let e = LightsError::InvalidLight("flashlight".into());
        assert_eq!(e.status(), -22);
    }

    #[test]
    fn write_error_uses_negated_errno() {
        // ENOENT
        let e = write_error(io::Error::from_raw_os_error(2));
        assert_eq!(e.status(), -2);
        // EACCES
        let e = write_error(io::Error::from_raw_os_error(13));
        assert_eq!(e.status(), -13);
    }

    #[test]
    fn write_error_without_errno_is_eio() {
        let e = write_error(io::Error::new(io::ErrorKind::WriteZero, "short write"));
        assert_eq!(e.status(), -EIO);
    }

    #[test]
    fn status_of_ok_is_zero() {
        let ok: Result<()> = Ok(());
        assert_eq!(status_of(&ok), 0);
        let err: Result<()> = Err(LightsError::InvalidLight("x".into()));
        assert_eq!(status_of(&err), -EINVAL);
    }

    #[test]
    fn from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let e: LightsError = io_err.into();
        assert!(matches!(e, LightsError::Io(_)));
    }

    #[test]
    fn display_invalid_light() {
        let e = LightsError::InvalidLight("torch".into());
        assert_eq!(e.to_string(), "Unknown light: \"torch\"");
    }

    #[test]
    fn display_write_error_names_path() {
        let e = write_error(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let msg = e.to_string();
        assert!(msg.contains("/sys/class/leds/red/brightness"), "{msg}");
        assert!(msg.contains("denied"), "{msg}");
    }

    #[test]
    fn display_config_error() {
        let e = LightsError::Config("bad root".into());
        assert_eq!(e.to_string(), "Config error: bad root");
    }

    #[test]
    fn source_chains_write_error() {
        let e = write_error(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let source = std::error::Error::source(&e).unwrap();
        assert!(source.to_string().contains("denied"));
    }

    #[test]
    fn source_none_for_string_variants() {
        let e = LightsError::Color("test".into());
        assert!(std::error::Error::source(&e).is_none());
    }
}
