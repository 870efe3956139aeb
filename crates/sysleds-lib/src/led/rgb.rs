//! The shared RGB indicator: one physical LED, two logical lights.
//!
//! Notification and attention both drive the same red/green/blue control
//! files. [`RgbIndicator`] remembers the latest request from each source and
//! decides which one is shown according to an [`RgbPolicy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::WriteSequence;
use crate::error::Result;
use crate::state::LightState;
use crate::sysfs::{Channel, ControlFile, LedSink};

/// Which request wins when both sources have one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RgbPolicy {
    /// A lit attention request is shown; notification shows otherwise.
    #[default]
    AttentionFirst,
    /// Whatever was submitted last is shown.
    LastWrite,
}

impl fmt::Display for RgbPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RgbPolicy::AttentionFirst => write!(f, "attention-first"),
            RgbPolicy::LastWrite => write!(f, "last-write"),
        }
    }
}

impl FromStr for RgbPolicy {
    type Err = crate::LightsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "attention-first" => Ok(RgbPolicy::AttentionFirst),
            "last-write" => Ok(RgbPolicy::LastWrite),
            other => Err(crate::LightsError::Config(format!(
                "Invalid rgb_policy: {other} (use attention-first or last-write)"
            ))),
        }
    }
}

/// Logical light feeding the RGB indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RgbSource {
    Notification,
    Attention,
}

/// What the RGB control files should hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RgbRequest {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub on_ms: i32,
    pub off_ms: i32,
}

impl RgbRequest {
    pub fn from_state(state: &LightState) -> Self {
        let (red, green, blue) = state.rgb();
        let (on_ms, off_ms) = state.flash_timing();
        RgbRequest {
            red,
            green,
            blue,
            on_ms,
            off_ms,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.red != 0 || self.green != 0 || self.blue != 0
    }

    /// Blinks only when both durations are positive.
    pub fn blinks(&self) -> bool {
        self.on_ms > 0 && self.off_ms > 0
    }

    fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    /// Write the request: the three brightness files, then all six delay
    /// files (the blink durations, or zeros for steady light).
    pub fn write_to<S: LedSink + ?Sized>(&self, sink: &S) -> Result<()> {
        let mut seq = WriteSequence::new(sink);
        for channel in Channel::ALL {
            seq.write(ControlFile::Brightness(channel), i32::from(self.channel(channel)));
        }
        let (on, off) = if self.blinks() {
            (self.on_ms, self.off_ms)
        } else {
            (0, 0)
        };
        for channel in Channel::ALL {
            seq.write(ControlFile::DelayOn(channel), on);
            seq.write(ControlFile::DelayOff(channel), off);
        }
        seq.finish()
    }
}

/// Arbitration state for the RGB indicator.
#[derive(Debug, Default)]
pub struct RgbIndicator {
    policy: RgbPolicy,
    notification: RgbRequest,
    attention: RgbRequest,
}

impl RgbIndicator {
    pub fn new(policy: RgbPolicy) -> Self {
        RgbIndicator {
            policy,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> RgbPolicy {
        self.policy
    }

    /// Record a request from `source` and return the request to show.
    pub fn submit(&mut self, source: RgbSource, state: &LightState) -> RgbRequest {
        let request = RgbRequest::from_state(state);
        match source {
            RgbSource::Notification => self.notification = request,
            RgbSource::Attention => self.attention = request,
        }
        match self.policy {
            RgbPolicy::LastWrite => request,
            RgbPolicy::AttentionFirst => self.effective(),
        }
    }

    /// The request currently winning under the attention-first rule.
    pub fn effective(&self) -> RgbRequest {
        if self.attention.is_lit() {
            self.attention
        } else {
            self.notification
        }
    }
}
