//! Collision Reflex
//!
//! Polls both bump sensors and backs off when either one is pressed.
//!
//! # Reflex
//! - Each wheel is driven backwards at full power only if its own side's
//!   bumper is pressed, so a hit on the right swings the right side away
//! - The withdraw is held for the collision withdraw time under the motor lock
//! - No stop follows the hold: the next poll, or the next navigation command,
//!   decides what the motors do after that
//!
//! The reflex does not preempt navigation. A bump during a pivot waits for the
//! pivot to finish and release the lock.

use core::convert::Infallible;

use embassy_futures::yield_now;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::system::config::RoverConfig;
use crate::system::drive_command::{Command, MotorPowers};
use crate::system::hardware::{ContactSensor, DriveMotor};
use crate::system::motor_lock::MotorLock;
use crate::system::override_gate::OverrideGate;

/// Which bumpers are pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Contact {
    pub left: bool,
    pub right: bool,
}

impl Contact {
    pub fn any(&self) -> bool {
        self.left || self.right
    }

    /// Withdraw for the pressed side(s)
    pub fn withdraw(&self, config: &RoverConfig) -> Command {
        let side = |pressed: bool| if pressed { config.motor_power } else { 0 };
        Command::Timed {
            powers: MotorPowers::new(side(self.left), side(self.right)),
            hold: config.collision_withdraw_time,
            then: None,
        }
    }
}

/// Left and right bump sensors
pub struct Bumpers<BL, BR> {
    left: BL,
    right: BR,
}

impl<BL: ContactSensor, BR: ContactSensor> Bumpers<BL, BR> {
    pub fn new(left: BL, right: BR) -> Self {
        Self { left, right }
    }

    pub async fn poll(&mut self) -> Contact {
        Contact {
            left: self.left.is_pressed().await,
            right: self.right.is_pressed().await,
        }
    }
}

/// Collision reflex loop
pub async fn collision_reflex<M, L, R, BL, BR, H>(
    bumpers: &mut Bumpers<BL, BR>,
    motors: &MotorLock<M, L, R>,
    gate: &OverrideGate,
    config: &RoverConfig,
    mut delay: H,
) -> Infallible
where
    M: RawMutex,
    L: DriveMotor,
    R: DriveMotor,
    BL: ContactSensor,
    BR: ContactSensor,
    H: DelayNs,
{
    info!("Collision reflex started");
    loop {
        if gate.is_active() {
            yield_now().await;
            continue;
        }

        let contact = bumpers.poll().await;
        if !contact.any() {
            yield_now().await;
            continue;
        }

        let command = contact.withdraw(config);
        let mut guard = motors.lock().await;
        if gate.is_active() {
            continue;
        }
        info!("Collision: left {}, right {}", contact.left, contact.right);
        guard.execute(&command, &mut delay).await;
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embassy_futures::select::select;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    use super::*;
    use crate::sim::{until, FakeBumper, Recorder, VirtualDelay, Write};

    #[test]
    fn right_bump_drives_only_the_right_wheel() {
        let config = RoverConfig::default();
        let rec = Recorder::new();
        let motors: MotorLock<NoopRawMutex, _, _> = MotorLock::new(rec.left(), rec.right());
        let (left, right) = (FakeBumper::new(), FakeBumper::new());
        right.press(true);
        let mut bumpers = Bumpers::new(left, right);
        let gate = OverrideGate::new();

        block_on(select(
            collision_reflex(
                &mut bumpers,
                &motors,
                &gate,
                &config,
                VirtualDelay::new().recording(&rec),
            ),
            until(|| rec.entries().len() >= 3),
        ));

        assert_eq!(
            rec.entries(),
            vec![Write::Right(600), Write::Left(0), Write::Hold(3000)]
        );
    }

    #[test]
    fn both_bumps_back_straight_off_without_a_stop() {
        let config = RoverConfig::default();
        let contact = Contact {
            left: true,
            right: true,
        };

        assert_eq!(
            contact.withdraw(&config),
            Command::Timed {
                powers: MotorPowers::new(600, 600),
                hold: config.collision_withdraw_time,
                then: None,
            }
        );
    }

    #[test]
    fn idle_bumpers_leave_the_motors_alone() {
        let config = RoverConfig::default();
        let rec = Recorder::new();
        let motors: MotorLock<NoopRawMutex, _, _> = MotorLock::new(rec.left(), rec.right());
        let mut bumpers = Bumpers::new(FakeBumper::new(), FakeBumper::new());
        let gate = OverrideGate::new();
        let mut polls = 0;

        block_on(select(
            collision_reflex(&mut bumpers, &motors, &gate, &config, VirtualDelay::new()),
            until(|| {
                polls += 1;
                polls > 100
            }),
        ));

        assert!(rec.entries().is_empty());
    }

    #[test]
    fn override_ignores_bumps() {
        let config = RoverConfig::default();
        let rec = Recorder::new();
        let motors: MotorLock<NoopRawMutex, _, _> = MotorLock::new(rec.left(), rec.right());
        let (left, right) = (FakeBumper::new(), FakeBumper::new());
        left.press(true);
        right.press(true);
        let mut bumpers = Bumpers::new(left, right);
        let gate = OverrideGate::new();
        gate.set(true);
        let mut polls = 0;

        block_on(select(
            collision_reflex(&mut bumpers, &motors, &gate, &config, VirtualDelay::new()),
            until(|| {
                polls += 1;
                polls > 100
            }),
        ));

        assert!(rec.entries().is_empty());
    }
}
