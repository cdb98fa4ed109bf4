//! Obstacle Avoidance Navigation
//!
//! Scans the arc, picks a heading and drives it, forever.
//!
//! # Decision Table
//! With `forward`, `left` and `right` the minima of the centre, left and right
//! three readings of a profile:
//! 1. `forward > safe_distance`: cruise straight
//! 2. `forward` beats both sides: cruise straight, ahead is still the best way
//! 3. `left > right`: pivot left for the rotation time, then creep at half power
//! 4. `right > critical_distance`: pivot right, then creep
//! 5. Otherwise the rover is boxed in: withdraw backwards, then stop
//!
//! Comparisons are strict. On an exact left/right tie the right side wins if
//! it is above the critical distance.
//!
//! Each command runs under the motor lock from its first write to its last,
//! and the lock is released before the next sweep starts.

use core::convert::Infallible;

use embassy_futures::yield_now;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::system::config::RoverConfig;
use crate::system::drive_command::{Command, MotorPowers};
use crate::system::hardware::{DistanceSensor, DriveMotor, ScannerMotor};
use crate::system::motor_lock::MotorLock;
use crate::system::override_gate::OverrideGate;
use crate::system::profile::DistanceProfile;
use crate::task::arc_scan::ArcScanner;

/// Heading chosen for one profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decision {
    /// Straight ahead at full power
    Cruise,
    /// Turn in place to the left, then creep
    PivotLeft,
    /// Turn in place to the right, then creep
    PivotRight,
    /// Back off, then stop
    Withdraw,
}

/// Applies the decision table to a profile
pub fn decide(profile: &DistanceProfile, config: &RoverConfig) -> Decision {
    let forward = profile.forward();
    if forward > config.safe_distance {
        return Decision::Cruise;
    }

    let left = profile.left();
    let right = profile.right();
    if forward > left && forward > right {
        Decision::Cruise
    } else if left > right {
        Decision::PivotLeft
    } else if right > config.critical_distance {
        Decision::PivotRight
    } else {
        Decision::Withdraw
    }
}

impl Decision {
    /// Drive command carrying out the decision
    pub fn command(self, config: &RoverConfig) -> Command {
        let power = config.motor_power;
        let creep = Some(MotorPowers::forward(config.creep_power()));
        match self {
            Decision::Cruise => Command::Run(MotorPowers::forward(power)),
            Decision::PivotLeft => Command::Timed {
                powers: MotorPowers::pivot_left(power),
                hold: config.rotation_time,
                then: creep,
            },
            Decision::PivotRight => Command::Timed {
                powers: MotorPowers::pivot_right(power),
                hold: config.rotation_time,
                then: creep,
            },
            Decision::Withdraw => Command::Timed {
                powers: MotorPowers::backward(power),
                hold: config.withdraw_time,
                then: Some(MotorPowers::STOP),
            },
        }
    }
}

/// Navigation loop
///
/// Skips its whole body while the override gate is active. The gate is read
/// again once the motor lock is held, so a sweep that was already running when
/// override started never reaches the motors.
pub async fn navigate<M, L, R, S, U, D, H>(
    scanner: &mut ArcScanner<S, U, D>,
    motors: &MotorLock<M, L, R>,
    gate: &OverrideGate,
    config: &RoverConfig,
    mut delay: H,
) -> Infallible
where
    M: RawMutex,
    L: DriveMotor,
    R: DriveMotor,
    S: ScannerMotor,
    U: DistanceSensor,
    D: DelayNs,
    H: DelayNs,
{
    info!("Navigation started");
    loop {
        if gate.is_active() {
            yield_now().await;
            continue;
        }

        let profile = scanner.scan_arc().await;
        let decision = decide(&profile, config);
        let command = decision.command(config);

        let mut guard = motors.lock().await;
        if gate.is_active() {
            continue;
        }
        debug!(
            "Navigation: {:?} (forward {}, left {}, right {})",
            decision,
            profile.forward(),
            profile.left(),
            profile.right()
        );
        guard.execute(&command, &mut delay).await;
    }
}
