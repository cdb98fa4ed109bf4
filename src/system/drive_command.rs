//! Drive Command Module
//!
//! Commands for the two drive motors. A command is built and consumed within
//! one iteration of a control loop and executed as a whole under the motor
//! lock (see [`crate::system::motor_lock`]).

use embassy_time::Duration;

/// Power pair for the left and right drive motors
///
/// Negative power drives forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorPowers {
    pub left: i16,
    pub right: i16,
}

impl MotorPowers {
    /// Both motors off
    pub const STOP: Self = Self::new(0, 0);

    pub const fn new(left: i16, right: i16) -> Self {
        Self { left, right }
    }

    /// Straight ahead at `power`
    pub const fn forward(power: i16) -> Self {
        Self::new(-power, -power)
    }

    /// Straight back at `power`
    pub const fn backward(power: i16) -> Self {
        Self::new(power, power)
    }

    /// Turn in place to the left
    pub const fn pivot_left(power: i16) -> Self {
        Self::new(power, -power)
    }

    /// Turn in place to the right
    pub const fn pivot_right(power: i16) -> Self {
        Self::new(-power, power)
    }
}

/// Drive command
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Apply the powers and return at once
    Run(MotorPowers),
    /// Apply the powers, hold them for `hold`, then apply `then` if given.
    /// There is no stop between the two.
    Timed {
        powers: MotorPowers,
        hold: Duration,
        then: Option<MotorPowers>,
    },
}
