//! Hardware boundary
//!
//! Traits the board support code implements for the motors and sensors the
//! controller drives. All calls are treated as total: a faulty sensor shows up
//! as an implausible number, a stalled motor as a call that never returns.
//!
//! Power values are signed. Negative drives the rover forward, positive drives
//! it backward. The observed range is -600..=600.

use embassy_time::Duration;

/// One of the two drive motors
pub trait DriveMotor {
    /// Applies `power` immediately
    fn set_power(&mut self, power: i16);
}

/// The motor rotating the sonar mount, with an encoder
#[allow(async_fn_in_trait)]
pub trait ScannerMotor {
    /// Runs the motor continuously at `power`
    fn set_power(&mut self, power: i16);

    /// Rotates to the absolute encoder `position` and returns once it is
    /// reached or `max_time` has passed. Never retries.
    async fn rotate_abs(&mut self, position: i32, max_time: Duration);

    /// Makes the current position encoder count zero
    fn reset_encoder(&mut self);
}

/// Forward-facing distance sensor on the scanner mount
#[allow(async_fn_in_trait)]
pub trait DistanceSensor {
    /// Single-shot distance read in centimeters
    async fn read_distance(&mut self) -> f32;
}

/// Binary bump sensor
#[allow(async_fn_in_trait)]
pub trait ContactSensor {
    /// Single-shot read, `true` while the bumper is pressed
    async fn is_pressed(&mut self) -> bool;
}
