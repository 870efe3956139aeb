//! Configuration: TOML file in the platform config directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sysfs::DEFAULT_LEDS_ROOT;

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str = "# sysleds configuration\n\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// LED class directory holding the control files. Default: "/sys/class/leds".
    #[serde(default = "default_leds_root")]
    pub leds_root: PathBuf,
}

fn default_leds_root() -> PathBuf {
    PathBuf::from(DEFAULT_LEDS_ROOT)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            leds_root: default_leds_root(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `leds_root` is empty.
    EmptyRoot,
    /// `leds_root` is not an absolute path.
    RelativeRoot(PathBuf),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyRoot => write!(f, "leds_root cannot be empty"),
            ValidationError::RelativeRoot(p) => {
                write!(f, "leds_root must be an absolute path: {}", p.display())
            }
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sysleds"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Save config to the default platform path.
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config directory",
            ));
        };
        self.save_to(&path)
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.leds_root.as_os_str().is_empty() {
            errors.push(ValidationError::EmptyRoot);
        } else if !self.leds_root.is_absolute() {
            errors.push(ValidationError::RelativeRoot(self.leds_root.clone()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
