//! Motor Arbitration
//!
//! The two drive motors form one shared resource behind a single async mutex.
//! Every write to either motor happens while the lock is held, and a
//! multi-step command (pivot then creep, withdraw then stop) is executed under
//! one acquisition, so no other loop can slip a write in between.
//!
//! The lock gives mutual exclusion only: no ordering, no priority and no
//! timeout. A command that never completes holds the motors forever.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embedded_hal_async::delay::DelayNs;

use crate::system::drive_command::{Command, MotorPowers};
use crate::system::hardware::DriveMotor;
use crate::task::pause;

/// Left and right drive motors, only reachable through [`MotorLock`]
pub struct DriveMotors<L, R> {
    left: L,
    right: R,
}

impl<L: DriveMotor, R: DriveMotor> DriveMotors<L, R> {
    /// Writes both powers, right motor first
    pub fn apply(&mut self, powers: MotorPowers) {
        self.right.set_power(powers.right);
        self.left.set_power(powers.left);
    }

    pub fn stop(&mut self) {
        self.apply(MotorPowers::STOP);
    }

    /// Runs a complete command, including its hold and trailing powers
    pub async fn execute<D: DelayNs>(&mut self, command: &Command, delay: &mut D) {
        match *command {
            Command::Run(powers) => self.apply(powers),
            Command::Timed { powers, hold, then } => {
                self.apply(powers);
                pause(delay, hold).await;
                if let Some(then) = then {
                    self.apply(then);
                }
            }
        }
    }
}

/// Mutual exclusion around the drive motors
pub struct MotorLock<M: RawMutex, L, R> {
    motors: Mutex<M, DriveMotors<L, R>>,
}

impl<M: RawMutex, L: DriveMotor, R: DriveMotor> MotorLock<M, L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self {
            motors: Mutex::new(DriveMotors { left, right }),
        }
    }

    /// Waits until the motors are free and takes them
    pub async fn lock(&self) -> MutexGuard<'_, M, DriveMotors<L, R>> {
        self.motors.lock().await
    }

    /// Takes the motors, runs `command` to completion and releases them
    pub async fn execute<D: DelayNs>(&self, command: &Command, delay: &mut D) {
        self.lock().await.execute(command, delay).await;
    }
}
