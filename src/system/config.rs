//! Rover Configuration
//!
//! Every tuning constant of the controller, with defaults for a LEGO
//! ultrasonic sensor on an encoder motor, two drive motors and two touch
//! sensors.
//!
//! # Thresholds
//! - Safe distance (35): anything beyond this straight ahead means cruise
//! - Critical distance (20): below this on the right side (and not wider on
//!   the left) the rover is boxed in and withdraws
//!
//! # Usage
//! ```rust
//! use embassy_time::Duration;
//! use sonar_rover::RoverConfig;
//!
//! let config = RoverConfig::default()
//!     .with_motor_power(400)
//!     .with_calibration_timeout(Duration::from_secs(10));
//! assert_eq!(config.creep_power(), 200);
//! ```

use embassy_time::Duration;

/// Full drive power
const MOTOR_POWER: i16 = 600;

/// Encoder counts between two neighbouring scan angles
const SCANNER_STEP: i32 = 180;

/// Encoder counts from the hard stop to the logical zero (straight ahead)
const CALIBRATION_OFFSET: i32 = 930;

/// Forward clearance that allows cruising
const SAFE_DISTANCE: f32 = 35.0;

/// Side clearance below which the rover is considered trapped
const CRITICAL_DISTANCE: f32 = 20.0;

/// How long a pivot lasts before creeping
const ROTATION_TIME: Duration = Duration::from_millis(1000);

/// How long the trapped withdraw lasts
const WITHDRAW_TIME: Duration = Duration::from_millis(3000);

/// How long the bump withdraw lasts
const COLLISION_WITHDRAW_TIME: Duration = Duration::from_millis(3000);

/// Point reads averaged into one distance sample
const SAMPLES_PER_READING: u8 = 5;

/// Delay after every point read
const SAMPLE_INTERVAL: Duration = Duration::from_millis(10);

/// Upper bound for one scanner move during a sweep
const SCAN_MOVE_TIME: Duration = Duration::from_millis(1000);

/// Scanner power while seeking the hard stop
const CALIBRATION_SEEK_POWER: i16 = -300;

/// A read below this means the sensor faces its own housing at the hard stop
const CALIBRATION_STOP_DISTANCE: f32 = 10.0;

/// Delay between reads while seeking the hard stop
const CALIBRATION_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Upper bound for the move from the hard stop to the calibration offset
const CALIBRATION_MOVE_TIME: Duration = Duration::from_millis(300);

/// Number of power increments of a remote key ramp
const REMOTE_RAMP_STEPS: u8 = 10;

/// Delay between two remote ramp increments
const REMOTE_RAMP_INTERVAL: Duration = Duration::from_millis(10);

/// Controller configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoverConfig {
    /// Full drive power, applied with the sign of the direction
    pub motor_power: i16,
    /// Encoder counts between neighbouring scan angles
    pub scanner_step: i32,
    /// Encoder counts from the hard stop to the logical zero
    pub calibration_offset: i32,
    /// Forward clearance that allows cruising
    pub safe_distance: f32,
    /// Side clearance below which the rover withdraws
    pub critical_distance: f32,
    /// Pivot duration
    pub rotation_time: Duration,
    /// Trapped withdraw duration
    pub withdraw_time: Duration,
    /// Bump withdraw duration
    pub collision_withdraw_time: Duration,
    /// Point reads averaged per distance sample
    pub samples_per_reading: u8,
    /// Delay after each point read
    pub sample_interval: Duration,
    /// Bound for each scanner move in a sweep
    pub scan_move_time: Duration,
    /// Scanner power while seeking the hard stop
    pub calibration_seek_power: i16,
    /// Hard stop detection threshold
    pub calibration_stop_distance: f32,
    /// Delay between reads while seeking
    pub calibration_poll_interval: Duration,
    /// Bound for the move to the calibration offset
    pub calibration_move_time: Duration,
    /// Give up seeking after this long. `None` seeks forever.
    ///
    /// Counted in poll intervals only: a sensor read that never returns
    /// never trips it.
    pub calibration_timeout: Option<Duration>,
    /// Remote ramp increments
    pub remote_ramp_steps: u8,
    /// Delay between remote ramp increments
    pub remote_ramp_interval: Duration,
    /// Whether the remote control capability is available
    pub remote_control: bool,
}

impl Default for RoverConfig {
    fn default() -> Self {
        Self {
            motor_power: MOTOR_POWER,
            scanner_step: SCANNER_STEP,
            calibration_offset: CALIBRATION_OFFSET,
            safe_distance: SAFE_DISTANCE,
            critical_distance: CRITICAL_DISTANCE,
            rotation_time: ROTATION_TIME,
            withdraw_time: WITHDRAW_TIME,
            collision_withdraw_time: COLLISION_WITHDRAW_TIME,
            samples_per_reading: SAMPLES_PER_READING,
            sample_interval: SAMPLE_INTERVAL,
            scan_move_time: SCAN_MOVE_TIME,
            calibration_seek_power: CALIBRATION_SEEK_POWER,
            calibration_stop_distance: CALIBRATION_STOP_DISTANCE,
            calibration_poll_interval: CALIBRATION_POLL_INTERVAL,
            calibration_move_time: CALIBRATION_MOVE_TIME,
            calibration_timeout: None,
            remote_ramp_steps: REMOTE_RAMP_STEPS,
            remote_ramp_interval: REMOTE_RAMP_INTERVAL,
            remote_control: true,
        }
    }
}

impl RoverConfig {
    pub fn with_motor_power(mut self, power: i16) -> Self {
        self.motor_power = power;
        self
    }

    pub fn with_scanner_step(mut self, step: i32) -> Self {
        self.scanner_step = step;
        self
    }

    pub fn with_calibration_offset(mut self, offset: i32) -> Self {
        self.calibration_offset = offset;
        self
    }

    pub fn with_distances(mut self, safe: f32, critical: f32) -> Self {
        self.safe_distance = safe;
        self.critical_distance = critical;
        self
    }

    pub fn with_calibration_timeout(mut self, timeout: Duration) -> Self {
        self.calibration_timeout = Some(timeout);
        self
    }

    pub fn with_remote_control(mut self, enabled: bool) -> Self {
        self.remote_control = enabled;
        self
    }

    /// Power used to creep straight after a pivot
    pub fn creep_power(&self) -> i16 {
        self.motor_power / 2
    }
}
