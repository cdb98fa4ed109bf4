//! Scanner Calibration
//!
//! Establishes the scanner's logical zero before anything else runs.
//!
//! # Sequence
//! 1. `Seeking`: run the mount towards its hard stop and read the sonar every
//!    10 ms. A reading below 10 cm means the sensor is looking at the robot's
//!    own housing, which only happens at the stop.
//! 2. `ZeroFound`: stop the mount and zero the encoder there.
//! 3. `Offset`: move to the configured calibration offset.
//! 4. `Done`: zero the encoder again so the offset is the new logical zero.
//!
//! Because the reference is the mechanical stop, the resulting zero does not
//! depend on where the mount was resting at power up.
//!
//! Without a `calibration_timeout` the seek never gives up: a dead sensor or
//! motor keeps the rover standing still, which is the intended failure mode.

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::system::config::RoverConfig;
use crate::system::error::Error;
use crate::system::hardware::{DistanceSensor, ScannerMotor};
use crate::task::arc_scan::ArcScanner;

/// Calibration progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationState {
    /// Running towards the hard stop
    Seeking,
    /// Parked at the hard stop with the encoder zeroed
    ZeroFound,
    /// Moved to the calibration offset
    Offset,
    /// Offset is the logical zero
    Done,
}

/// Calibration state machine, advanced one step at a time
pub struct Calibration<'a> {
    config: &'a RoverConfig,
    state: CalibrationState,
    motor_running: bool,
    seeking_for: Duration,
}

impl<'a> Calibration<'a> {
    pub fn new(config: &'a RoverConfig) -> Self {
        Self {
            config,
            state: CalibrationState::Seeking,
            motor_running: false,
            seeking_for: Duration::from_ticks(0),
        }
    }

    pub fn state(&self) -> CalibrationState {
        self.state
    }

    /// Performs the work of the current state and returns the next one.
    /// While seeking, one step is a single sonar poll.
    pub async fn step<S, U, D>(
        &mut self,
        scanner: &mut ArcScanner<S, U, D>,
    ) -> Result<CalibrationState, Error>
    where
        S: ScannerMotor,
        U: DistanceSensor,
        D: DelayNs,
    {
        self.state = match self.state {
            CalibrationState::Seeking => self.seek(scanner).await?,
            CalibrationState::ZeroFound => {
                scanner
                    .rotate_to(self.config.calibration_offset, self.config.calibration_move_time)
                    .await;
                CalibrationState::Offset
            }
            CalibrationState::Offset => {
                scanner.zero_encoder();
                info!("Scanner calibrated");
                CalibrationState::Done
            }
            CalibrationState::Done => CalibrationState::Done,
        };
        Ok(self.state)
    }

    async fn seek<S, U, D>(
        &mut self,
        scanner: &mut ArcScanner<S, U, D>,
    ) -> Result<CalibrationState, Error>
    where
        S: ScannerMotor,
        U: DistanceSensor,
        D: DelayNs,
    {
        if !self.motor_running {
            info!("Seeking scanner hard stop");
            scanner.run_motor(self.config.calibration_seek_power);
            self.motor_running = true;
        }

        let distance = scanner.sampler().read_once().await;
        let poll = self.config.calibration_poll_interval;
        scanner.sampler().wait(poll).await;
        // elapsed seek time, in poll intervals
        self.seeking_for += poll;

        if distance < self.config.calibration_stop_distance {
            scanner.run_motor(0);
            self.motor_running = false;
            scanner.zero_encoder();
            debug!("Hard stop found after {} ms", self.seeking_for.as_millis());
            return Ok(CalibrationState::ZeroFound);
        }

        if let Some(timeout) = self.config.calibration_timeout {
            if self.seeking_for >= timeout {
                scanner.run_motor(0);
                self.motor_running = false;
                error!("Scanner hard stop not found, giving up");
                return Err(Error::CalibrationTimeout(timeout));
            }
        }

        Ok(CalibrationState::Seeking)
    }
}

/// Runs the whole calibration sequence
pub async fn calibrate<S, U, D>(
    scanner: &mut ArcScanner<S, U, D>,
    config: &RoverConfig,
) -> Result<(), Error>
where
    S: ScannerMotor,
    U: DistanceSensor,
    D: DelayNs,
{
    let mut calibration = Calibration::new(config);
    while calibration.step(scanner).await? != CalibrationState::Done {}
    Ok(())
}
