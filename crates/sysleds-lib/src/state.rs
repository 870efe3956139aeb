//! Light state requests as supplied by the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::led;

/// How a light should flash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashMode {
    /// Steady on (or off, if the color is black).
    #[default]
    None,
    /// Software-timed blink using the requested on/off durations.
    Timed,
    /// Blink timing delegated to the LED hardware.
    Hardware,
}

impl fmt::Display for FlashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashMode::None => write!(f, "none"),
            FlashMode::Timed => write!(f, "timed"),
            FlashMode::Hardware => write!(f, "hardware"),
        }
    }
}

impl FromStr for FlashMode {
    type Err = crate::LightsError;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(FlashMode::None),
            "timed" => Ok(FlashMode::Timed),
            "hardware" => Ok(FlashMode::Hardware),
            other => Err(crate::LightsError::Config(format!(
                "Invalid flash mode: {other} (use none, timed or hardware)"
            ))),
        }
    }
}

/// Where the brightness request came from. Accepted, not acted upon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrightnessMode {
    #[default]
    User,
    Sensor,
}

/// A request to put one light into a given state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    /// Packed `0xAARRGGBB`. The alpha byte is ignored.
    pub color: u32,
    pub flash_mode: FlashMode,
    pub flash_on_ms: i32,
    pub flash_off_ms: i32,
    pub brightness_mode: BrightnessMode,
}

impl LightState {
    /// Steady color, no flashing.
    pub fn solid(color: u32) -> Self {
        LightState {
            color,
            ..LightState::default()
        }
    }

    /// Software-timed blink.
    pub fn timed(color: u32, on_ms: i32, off_ms: i32) -> Self {
        LightState {
            color,
            flash_mode: FlashMode::Timed,
            flash_on_ms: on_ms,
            flash_off_ms: off_ms,
            brightness_mode: BrightnessMode::User,
        }
    }

    /// The 24 significant color bits, `0x00RRGGBB`.
    pub fn rgb24(&self) -> u32 {
        self.color & led::RGB_MASK
    }

    pub fn is_lit(&self) -> bool {
        led::is_lit(self.color)
    }

    /// Single-channel brightness derived from the color.
    pub fn brightness(&self) -> u8 {
        led::rgb_to_brightness(self.color)
    }

    /// Red, green and blue components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        led::split_rgb(self.color)
    }

    /// Blink on/off durations in milliseconds: the requested values for
    /// `Timed` and `Hardware`, `(0, 0)` for steady light.
    pub fn flash_timing(&self) -> (i32, i32) {
        match self.flash_mode {
            FlashMode::Timed | FlashMode::Hardware => (self.flash_on_ms, self.flash_off_ms),
            FlashMode::None => (0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_off_and_steady() {
        let s = LightState::default();
        assert_eq!(s.color, 0);
        assert_eq!(s.flash_mode, FlashMode::None);
        assert!(!s.is_lit());
    }

    #[test]
    fn flash_timing_timed_and_hardware_pass_through() {
        let s = LightState::timed(0x00FF_0000, 100, 200);
        assert_eq!(s.flash_timing(), (100, 200));
        let s = LightState {
            flash_mode: FlashMode::Hardware,
            ..s
        };
        assert_eq!(s.flash_timing(), (100, 200));
    }

    #[test]
    fn flash_timing_none_is_zero_regardless_of_durations() {
        let s = LightState {
            flash_mode: FlashMode::None,
            ..LightState::timed(0x00FF_0000, 500, 500)
        };
        assert_eq!(s.flash_timing(), (0, 0));
    }

    #[test]
    fn alpha_only_color_is_not_lit() {
        let s = LightState::solid(0xFF00_0000);
        assert!(!s.is_lit());
        assert_eq!(s.rgb24(), 0);
        assert_eq!(s.brightness(), 0);
    }

    #[test]
    fn rgb_splits_low_bytes() {
        assert_eq!(LightState::solid(0xAB11_2233).rgb(), (0x11, 0x22, 0x33));
    }

    #[test]
    fn flash_mode_parse() {
        assert_eq!("none".parse::<FlashMode>().unwrap(), FlashMode::None);
        assert_eq!("Timed".parse::<FlashMode>().unwrap(), FlashMode::Timed);
        assert_eq!(" hardware ".parse::<FlashMode>().unwrap(), FlashMode::Hardware);
        assert!("strobe".parse::<FlashMode>().is_err());
    }

    #[test]
    fn flash_mode_display_matches_parse() {
        for mode in [FlashMode::None, FlashMode::Timed, FlashMode::Hardware] {
            assert_eq!(mode.to_string().parse::<FlashMode>().unwrap(), mode);
        }
    }
}
