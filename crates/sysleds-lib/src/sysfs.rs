//! LED class control files: the file set, the sink trait, and the sysfs backend.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{LightsError, Result};

/// Default LED class directory.
pub const DEFAULT_LEDS_ROOT: &str = "/sys/class/leds";

// ── Control files ──

/// One color channel of the RGB indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// LED class directory name.
    pub fn led_name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

/// A single kernel-exposed LED attribute that accepts a decimal integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlFile {
    LcdBacklight,
    /// Keyboard backlight LED. Also drives the button illumination.
    KeyboardBacklight,
    BatteryLed,
    Brightness(Channel),
    DelayOn(Channel),
    DelayOff(Channel),
}

impl ControlFile {
    pub const ALL: [ControlFile; 12] = [
        ControlFile::LcdBacklight,
        ControlFile::KeyboardBacklight,
        ControlFile::BatteryLed,
        ControlFile::Brightness(Channel::Red),
        ControlFile::DelayOn(Channel::Red),
        ControlFile::DelayOff(Channel::Red),
        ControlFile::Brightness(Channel::Green),
        ControlFile::DelayOn(Channel::Green),
        ControlFile::DelayOff(Channel::Green),
        ControlFile::Brightness(Channel::Blue),
        ControlFile::DelayOn(Channel::Blue),
        ControlFile::DelayOff(Channel::Blue),
    ];

    /// LED directory under the class root.
    pub fn led_name(self) -> &'static str {
        match self {
            ControlFile::LcdBacklight => "lcd-backlight",
            ControlFile::KeyboardBacklight => "keyboard-backlight",
            ControlFile::BatteryLed => "battery-led",
            ControlFile::Brightness(c) | ControlFile::DelayOn(c) | ControlFile::DelayOff(c) => {
                c.led_name()
            }
        }
    }

    /// Attribute file name inside the LED directory.
    pub fn attribute(self) -> &'static str {
        match self {
            ControlFile::DelayOn(_) => "delay_on",
            ControlFile::DelayOff(_) => "delay_off",
            _ => "brightness",
        }
    }

    /// Path relative to the LED class root, e.g. `red/delay_on`.
    pub fn relative_path(self) -> PathBuf {
        Path::new(self.led_name()).join(self.attribute())
    }
}

impl fmt::Display for ControlFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.led_name(), self.attribute())
    }
}

// ── Trait ──

/// Destination for control-file writes.
pub trait LedSink {
    /// Write `value` as decimal text followed by a newline.
    fn write_int(&self, file: ControlFile, value: i32) -> Result<()>;
}

// ── sysfs backend ──

/// Writes control files under an LED class root (normally `/sys/class/leds`).
///
/// Each write is one open/write/close; nothing is buffered, created or retried.
#[derive(Debug)]
pub struct SysfsWriter {
    root: PathBuf,
    /// Set after the first open failure has been reported at `warn` level.
    warned: AtomicBool,
}

impl Default for SysfsWriter {
    fn default() -> Self {
        Self::new(DEFAULT_LEDS_ROOT)
    }
}

impl SysfsWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SysfsWriter {
            root: root.into(),
            warned: AtomicBool::new(false),
        }
    }

    /// Absolute path of a control file.
    pub fn path(&self, file: ControlFile) -> PathBuf {
        self.root.join(file.relative_path())
    }
}

impl LedSink for SysfsWriter {
    fn write_int(&self, file: ControlFile, value: i32) -> Result<()> {
        let path = self.path(file);
        let mut handle = match OpenOptions::new()
            .read(true)
            .write(true)
            .truncate(true)
            .open(&path)
        {
            Ok(f) => f,
            Err(source) => {
                if self.warned.swap(true, Ordering::Relaxed) {
                    log::debug!("failed to open {}: {source}", path.display());
                } else {
                    log::warn!("failed to open {}: {source}", path.display());
                }
                return Err(LightsError::Write { path, source });
            }
        };
        if let Err(source) = handle.write_all(format!("{value}\n").as_bytes()) {
            return Err(LightsError::Write { path, source });
        }
        log::trace!("{} <- {value}", path.display());
        Ok(())
    }
}

// ── Mock sink ──

pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    /// A write recorded by [`MockSink`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedWrite {
        pub file: ControlFile,
        pub value: i32,
        /// Name of the writing thread, if it had one.
        pub thread: Option<String>,
    }

    /// In-memory sink for tests. Records every write in order; selected files
    /// can be made to fail with a given OS error number.
    #[derive(Debug, Default)]
    pub struct MockSink {
        writes: Mutex<Vec<RecordedWrite>>,
        failures: Mutex<HashMap<ControlFile, i32>>,
    }

    fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
        m.lock().unwrap_or_else(PoisonError::into_inner)
    }

    impl MockSink {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every write to `file` fail with `errno`. Failed writes are still recorded.
        pub fn fail(&self, file: ControlFile, errno: i32) {
            lock(&self.failures).insert(file, errno);
        }

        /// All writes so far, as `(file, value)` pairs.
        pub fn writes(&self) -> Vec<(ControlFile, i32)> {
            lock(&self.writes)
                .iter()
                .map(|w| (w.file, w.value))
                .collect()
        }

        /// All writes so far, including the writing thread.
        pub fn records(&self) -> Vec<RecordedWrite> {
            lock(&self.writes).clone()
        }

        /// Last value written to `file`.
        pub fn value_of(&self, file: ControlFile) -> Option<i32> {
            lock(&self.writes)
                .iter()
                .rev()
                .find(|w| w.file == file)
                .map(|w| w.value)
        }
    }

    impl LedSink for MockSink {
        fn write_int(&self, file: ControlFile, value: i32) -> Result<()> {
            lock(&self.writes).push(RecordedWrite {
                file,
                value,
                thread: std::thread::current().name().map(str::to_string),
            });
            // Give other writers a chance to run between writes.
            std::thread::yield_now();
            match lock(&self.failures).get(&file) {
                Some(&errno) => Err(LightsError::Write {
                    path: Path::new("mock://").join(file.relative_path()),
                    source: std::io::Error::from_raw_os_error(errno),
                }),
                None => Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_root(dir: &Path) {
        for file in ControlFile::ALL {
            let path = dir.join(file.relative_path());
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, "").unwrap();
        }
    }

    #[test]
    fn control_paths_match_kernel_layout() {
        let w = SysfsWriter::default();
        let paths: Vec<String> = ControlFile::ALL
            .iter()
            .map(|&f| w.path(f).display().to_string())
            .collect();
        assert_eq!(
            paths,
            [
                "/sys/class/leds/lcd-backlight/brightness",
                "/sys/class/leds/keyboard-backlight/brightness",
                "/sys/class/leds/battery-led/brightness",
                "/sys/class/leds/red/brightness",
                "/sys/class/leds/red/delay_on",
                "/sys/class/leds/red/delay_off",
                "/sys/class/leds/green/brightness",
                "/sys/class/leds/green/delay_on",
                "/sys/class/leds/green/delay_off",
                "/sys/class/leds/blue/brightness",
                "/sys/class/leds/blue/delay_on",
                "/sys/class/leds/blue/delay_off",
            ]
        );
    }

    #[test]
    fn display_is_relative_path() {
        assert_eq!(ControlFile::DelayOff(Channel::Green).to_string(), "green/delay_off");
        assert_eq!(ControlFile::LcdBacklight.to_string(), "lcd-backlight/brightness");
    }

    #[test]
    fn write_int_writes_decimal_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        make_root(dir.path());
        let w = SysfsWriter::new(dir.path());

        w.write_int(ControlFile::LcdBacklight, 255).unwrap();
        let text = std::fs::read_to_string(dir.path().join("lcd-backlight/brightness")).unwrap();
        assert_eq!(text, "255\n");

        w.write_int(ControlFile::DelayOn(Channel::Red), -1).unwrap();
        let text = std::fs::read_to_string(dir.path().join("red/delay_on")).unwrap();
        assert_eq!(text, "-1\n");
    }

    #[test]
    fn write_int_replaces_longer_value() {
        let dir = tempfile::tempdir().unwrap();
        make_root(dir.path());
        let w = SysfsWriter::new(dir.path());

        w.write_int(ControlFile::LcdBacklight, 255).unwrap();
        w.write_int(ControlFile::LcdBacklight, 0).unwrap();
        let text = std::fs::read_to_string(dir.path().join("lcd-backlight/brightness")).unwrap();
        assert_eq!(text, "0\n");

        w.write_int(ControlFile::DelayOff(Channel::Blue), 1000).unwrap();
        w.write_int(ControlFile::DelayOff(Channel::Blue), 5).unwrap();
        let text = std::fs::read_to_string(dir.path().join("blue/delay_off")).unwrap();
        assert_eq!(text, "5\n");
    }

    #[test]
    fn write_int_does_not_create_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let w = SysfsWriter::new(dir.path());

        let err = w.write_int(ControlFile::BatteryLed, 255).unwrap_err();
        assert_eq!(err.status(), -2, "missing file should map to -ENOENT");
        assert!(!dir.path().join("battery-led/brightness").exists());
    }

    #[test]
    fn write_int_fails_every_time_after_first_warning() {
        let dir = tempfile::tempdir().unwrap();
        let w = SysfsWriter::new(dir.path());

        assert!(w.write_int(ControlFile::BatteryLed, 1).is_err());
        assert!(w.warned.load(Ordering::Relaxed));
        // Throttled logging must not change the outcome.
        assert!(w.write_int(ControlFile::BatteryLed, 1).is_err());
        assert!(w.write_int(ControlFile::LcdBacklight, 1).is_err());
    }

    #[test]
    fn mock_records_and_fails() {
        let sink = mock::MockSink::new();
        sink.fail(ControlFile::BatteryLed, 13);

        sink.write_int(ControlFile::LcdBacklight, 10).unwrap();
        let err = sink.write_int(ControlFile::BatteryLed, 255).unwrap_err();
        assert_eq!(err.status(), -13);

        assert_eq!(
            sink.writes(),
            vec![(ControlFile::LcdBacklight, 10), (ControlFile::BatteryLed, 255)]
        );
        assert_eq!(sink.value_of(ControlFile::BatteryLed), Some(255));
        assert_eq!(sink.value_of(ControlFile::KeyboardBacklight), None);
    }
}
