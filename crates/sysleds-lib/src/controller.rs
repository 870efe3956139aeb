//! Light controller: opens per-light handles and serializes their writes.
//!
//! A [`LightController`] owns the sink and the single lock. Every
//! [`LightDevice`] borrows its controller, so all handles opened from one
//! controller share one critical section.

use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::Config;
use crate::error::{LightsError, Result};
use crate::led::{RgbIndicator, RgbPolicy, RgbSource};
use crate::state::LightState;
use crate::sysfs::{Channel, ControlFile, LedSink, SysfsWriter};

/// Value written to single-color LEDs when lit.
const LED_FULL: i32 = 255;

const RGB_FILES: [ControlFile; 9] = [
    ControlFile::Brightness(Channel::Red),
    ControlFile::Brightness(Channel::Green),
    ControlFile::Brightness(Channel::Blue),
    ControlFile::DelayOn(Channel::Red),
    ControlFile::DelayOff(Channel::Red),
    ControlFile::DelayOn(Channel::Green),
    ControlFile::DelayOff(Channel::Green),
    ControlFile::DelayOn(Channel::Blue),
    ControlFile::DelayOff(Channel::Blue),
];

// ── Light identifiers ──

/// The six logical lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightId {
    Backlight,
    Keyboard,
    Buttons,
    Battery,
    Notifications,
    Attention,
}

impl LightId {
    /// All lights, in identifier match order.
    pub const ALL: [LightId; 6] = [
        LightId::Backlight,
        LightId::Keyboard,
        LightId::Buttons,
        LightId::Battery,
        LightId::Notifications,
        LightId::Attention,
    ];

    /// The identifier string a host passes to `open`.
    pub fn as_str(self) -> &'static str {
        match self {
            LightId::Backlight => "backlight",
            LightId::Keyboard => "keyboard",
            LightId::Buttons => "buttons",
            LightId::Battery => "battery",
            LightId::Notifications => "notifications",
            LightId::Attention => "attention",
        }
    }

    /// Control files this light writes.
    pub fn control_files(self) -> &'static [ControlFile] {
        match self {
            LightId::Backlight => &[ControlFile::LcdBacklight],
            LightId::Keyboard => &[],
            LightId::Buttons => &[ControlFile::KeyboardBacklight],
            LightId::Battery => &[ControlFile::BatteryLed],
            LightId::Notifications | LightId::Attention => &RGB_FILES,
        }
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LightId {
    type Err = LightsError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self> {
        LightId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| LightsError::InvalidLight(s.to_string()))
    }
}

// ── Controller ──

pub struct LightController<S> {
    sink: S,
    rgb: Mutex<RgbIndicator>,
}

impl LightController<SysfsWriter> {
    /// Controller writing under the configured LED class root.
    ///
    /// RGB arbitration state lives in the controller, so it only spans
    /// requests made through this one instance.
    pub fn from_config(config: &Config) -> Self {
        LightController::new(SysfsWriter::new(&config.leds_root), RgbPolicy::default())
    }
}

impl<S: LedSink> LightController<S> {
    pub fn new(sink: S, policy: RgbPolicy) -> Self {
        LightController {
            sink,
            rgb: Mutex::new(RgbIndicator::new(policy)),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn rgb_policy(&self) -> RgbPolicy {
        self.lock().policy()
    }

    /// Open a handle by identifier string.
    ///
    /// Returns `Err(InvalidLight)` for anything but the six exact identifiers.
    pub fn open(&self, name: &str) -> Result<LightDevice<'_, S>> {
        let id = name.parse::<LightId>()?;
        log::debug!("opened light {id}");
        Ok(self.open_id(id))
    }

    pub fn open_id(&self, id: LightId) -> LightDevice<'_, S> {
        LightDevice {
            controller: self,
            id,
        }
    }

    // The guarded state stays consistent between writes, so a panic while
    // holding the lock leaves nothing to repair.
    fn lock(&self) -> MutexGuard<'_, RgbIndicator> {
        self.rgb.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, id: LightId, state: &LightState) -> Result<()> {
        log::debug!(
            "{id}: color={:#08x} flash={} on={} off={}",
            state.rgb24(),
            state.flash_mode,
            state.flash_on_ms,
            state.flash_off_ms
        );
        match id {
            LightId::Keyboard => Ok(()),
            LightId::Backlight => {
                let _guard = self.lock();
                self.sink
                    .write_int(ControlFile::LcdBacklight, i32::from(state.brightness()))
            }
            LightId::Buttons => {
                let _guard = self.lock();
                self.sink
                    .write_int(ControlFile::KeyboardBacklight, on_off(state))
            }
            LightId::Battery => {
                let _guard = self.lock();
                self.sink.write_int(ControlFile::BatteryLed, on_off(state))
            }
            LightId::Notifications => self.apply_rgb(RgbSource::Notification, state),
            LightId::Attention => self.apply_rgb(RgbSource::Attention, state),
        }
    }

    fn apply_rgb(&self, source: RgbSource, state: &LightState) -> Result<()> {
        let mut rgb = self.lock();
        let shown = rgb.submit(source, state);
        shown.write_to(&self.sink)
    }
}

fn on_off(state: &LightState) -> i32 {
    if state.is_lit() { LED_FULL } else { 0 }
}

// ── Handles ──

/// A handle bound to one light for its whole lifetime.
pub struct LightDevice<'c, S> {
    controller: &'c LightController<S>,
    id: LightId,
}

impl<S: LedSink> LightDevice<'_, S> {
    pub fn id(&self) -> LightId {
        self.id
    }

    /// Apply a light state. On failure, returns the first failing write;
    /// the remaining writes of the sequence are still attempted.
    pub fn set_light(&self, state: &LightState) -> Result<()> {
        self.controller.apply(self.id, state)
    }

    /// Release the handle. Always succeeds.
    pub fn close(self) -> Result<()> {
        log::debug!("closed light {}", self.id);
        Ok(())
    }
}

impl<S> fmt::Debug for LightDevice<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightDevice").field("id", &self.id).finish()
    }
}
