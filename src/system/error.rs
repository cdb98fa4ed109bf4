//! Controller errors
//!
//! The control loops themselves have no error paths. The only failure the
//! crate reports is a calibration that ran past its configured timeout.

use core::fmt;

use embassy_time::Duration;

/// Errors reported by [`crate::Rover::run`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The scanner did not reach its hard stop within the given time
    CalibrationTimeout(Duration),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CalibrationTimeout(timeout) => write!(
                f,
                "scanner hard stop not found within {} ms",
                timeout.as_millis()
            ),
        }
    }
}
