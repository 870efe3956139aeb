//! LED control: color helpers, the shared RGB indicator, and write sequencing.

mod color;
mod rgb;

pub use color::{RGB_MASK, format_color, is_lit, parse_color, rgb_to_brightness, split_rgb};
pub use rgb::{RgbIndicator, RgbPolicy, RgbRequest, RgbSource};

use crate::error::{LightsError, Result};
use crate::sysfs::{ControlFile, LedSink};

/// A best-effort run of control-file writes.
///
/// Every write is attempted even after a failure; [`finish`](Self::finish)
/// reports the first failure. Earlier files are left as written.
pub(crate) struct WriteSequence<'a, S: ?Sized> {
    sink: &'a S,
    first_error: Option<LightsError>,
}

impl<'a, S: LedSink + ?Sized> WriteSequence<'a, S> {
    pub(crate) fn new(sink: &'a S) -> Self {
        WriteSequence {
            sink,
            first_error: None,
        }
    }

    pub(crate) fn write(&mut self, file: ControlFile, value: i32) {
        if let Err(e) = self.sink.write_int(file, value) {
            if self.first_error.is_some() {
                log::debug!("additional write failure: {e}");
            } else {
                self.first_error = Some(e);
            }
        }
    }

    pub(crate) fn finish(self) -> Result<()> {
        match self.first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sysfs::Channel;
    use crate::sysfs::mock::MockSink;

    #[test]
    fn sequence_reports_first_failure_and_continues() {
        let sink = MockSink::new();
        sink.fail(ControlFile::Brightness(Channel::Red), 2);
        sink.fail(ControlFile::Brightness(Channel::Blue), 13);

        let mut seq = WriteSequence::new(&sink);
        seq.write(ControlFile::Brightness(Channel::Red), 1);
        seq.write(ControlFile::Brightness(Channel::Green), 2);
        seq.write(ControlFile::Brightness(Channel::Blue), 3);
        let err = seq.finish().unwrap_err();

        assert_eq!(err.status(), -2, "first failure (red) should be reported");
        assert_eq!(sink.writes().len(), 3, "all writes should be attempted");
    }

    #[test]
    fn empty_sequence_is_ok() {
        let sink = MockSink::new();
        assert!(WriteSequence::new(&sink).finish().is_ok());
    }
}
