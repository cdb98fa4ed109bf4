//! Remote Control
//!
//! Manual driving over the remote control channel. The channel registers the
//! UI through [`RemoteControl::configure`] and forwards its key and button
//! callbacks here.
//!
//! # Controls
//! - "Remote" button: toggles the override gate. Entering override zeroes
//!   both drive motors.
//! - Arrow keys, while override is active: pressing ramps the power up in ten
//!   equal increments, 10 ms apart, straight (up/down) or turning in place
//!   (left/right). Releasing any key zeroes both motors.
//!
//! All motor writes go through the motor lock. Entering override while a
//! navigation or collision command is running zeroes the motors as soon as
//! that command completes.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::system::config::RoverConfig;
use crate::system::drive_command::MotorPowers;
use crate::system::event::{
    Action, ButtonEvent, Key, KeyEvent, RemoteUi, REMOTE_BUTTON_ID, REMOTE_BUTTON_LABEL,
};
use crate::system::hardware::DriveMotor;
use crate::system::motor_lock::MotorLock;
use crate::system::override_gate::OverrideGate;
use crate::task::pause;

/// Motor powers for a key held at ramp level `power`
fn key_powers(key: Key, power: i16) -> Option<MotorPowers> {
    match key {
        Key::Up => Some(MotorPowers::forward(power)),
        Key::Down => Some(MotorPowers::backward(power)),
        Key::Left => Some(MotorPowers::pivot_left(power)),
        Key::Right => Some(MotorPowers::pivot_right(power)),
        Key::Other(_) => None,
    }
}

/// Remote control capability, borrowed from a [`crate::Rover`]
pub struct RemoteControl<'a, M: RawMutex, L, R, D> {
    motors: &'a MotorLock<M, L, R>,
    gate: &'a OverrideGate,
    config: &'a RoverConfig,
    delay: D,
}

impl<'a, M, L, R, D> RemoteControl<'a, M, L, R, D>
where
    M: RawMutex,
    L: DriveMotor,
    R: DriveMotor,
    D: DelayNs,
{
    pub fn new(
        motors: &'a MotorLock<M, L, R>,
        gate: &'a OverrideGate,
        config: &'a RoverConfig,
        delay: D,
    ) -> Self {
        Self {
            motors,
            gate,
            config,
            delay,
        }
    }

    /// Registers the override toggle with the remote UI
    pub fn configure(&self, ui: &mut impl RemoteUi) {
        ui.add_button(REMOTE_BUTTON_ID, REMOTE_BUTTON_LABEL);
    }

    pub async fn on_key_event(&mut self, event: KeyEvent) {
        if !self.gate.is_active() {
            return;
        }

        match event.action {
            Action::Pressed => {
                if key_powers(event.key, 0).is_none() {
                    return;
                }
                let steps = self.config.remote_ramp_steps.max(1);
                let increment = self.config.motor_power / i16::from(steps);
                let mut power = increment;
                let mut motors = self.motors.lock().await;
                for _ in 0..steps {
                    if let Some(powers) = key_powers(event.key, power) {
                        motors.apply(powers);
                    }
                    power = power.saturating_add(increment);
                    pause(&mut self.delay, self.config.remote_ramp_interval).await;
                }
            }
            Action::Released => self.motors.lock().await.stop(),
        }
    }

    pub async fn on_button_event(&mut self, event: ButtonEvent<'_>) {
        if event.id != REMOTE_BUTTON_ID || event.action != Action::Pressed {
            return;
        }

        let active = self.gate.toggle();
        info!("Remote override: {}", active);
        if active {
            self.motors.lock().await.stop();
        }
    }
}
