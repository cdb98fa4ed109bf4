//! Rover
//!
//! Owns the shared state of the controller (motor lock, override gate,
//! configuration) and runs the control loops on it.
//!
//! # Startup
//! 1. Calibrate the scanner; nothing drives until this completes
//! 2. Run navigation and the collision reflex concurrently, forever
//!
//! Both loops borrow the same [`MotorLock`] and [`OverrideGate`]. The remote
//! control capability borrows them too, so the firmware typically keeps the
//! rover in a `static` and hands `&'static Rover` to its tasks:
//!
//! ```rust,ignore
//! #[embassy_executor::task]
//! async fn autonomy(rover: &'static Rover<CriticalSectionRawMutex, Left, Right>, hw: Hardware) {
//!     let bumpers = Bumpers::new(hw.bump_left, hw.bump_right);
//!     if let Err(e) = rover.run(hw.scanner, hw.sonar, bumpers, Delay).await {
//!         error!("{}", e);
//!     }
//! }
//! ```

use core::convert::Infallible;

use embassy_futures::join::join;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::system::config::RoverConfig;
use crate::system::error::Error;
use crate::system::hardware::{ContactSensor, DistanceSensor, DriveMotor, ScannerMotor};
use crate::system::motor_lock::MotorLock;
use crate::system::override_gate::OverrideGate;
use crate::task::arc_scan::ArcScanner;
use crate::task::calibrate::calibrate;
use crate::task::collision_reflex::{collision_reflex, Bumpers};
use crate::task::navigate::navigate;
use crate::task::remote_control::RemoteControl;

/// Controller state shared by all loops
pub struct Rover<M: RawMutex, L, R> {
    motors: MotorLock<M, L, R>,
    gate: OverrideGate,
    config: RoverConfig,
}

impl<M: RawMutex, L: DriveMotor, R: DriveMotor> Rover<M, L, R> {
    pub fn new(left: L, right: R, config: RoverConfig) -> Self {
        Self {
            motors: MotorLock::new(left, right),
            gate: OverrideGate::new(),
            config,
        }
    }

    pub fn config(&self) -> &RoverConfig {
        &self.config
    }

    pub fn override_gate(&self) -> &OverrideGate {
        &self.gate
    }

    pub fn motors(&self) -> &MotorLock<M, L, R> {
        &self.motors
    }

    /// Remote control capability, `None` when disabled in the configuration
    pub fn remote<D: DelayNs>(&self, delay: D) -> Option<RemoteControl<'_, M, L, R, D>> {
        self.config
            .remote_control
            .then(|| RemoteControl::new(&self.motors, &self.gate, &self.config, delay))
    }

    /// Calibrates the scanner, then runs navigation and the collision reflex.
    ///
    /// Only returns if calibration fails, which requires a calibration timeout
    /// to be configured.
    pub async fn run<S, U, BL, BR, D>(
        &self,
        scanner_motor: S,
        sonar: U,
        mut bumpers: Bumpers<BL, BR>,
        delay: D,
    ) -> Result<Infallible, Error>
    where
        S: ScannerMotor,
        U: DistanceSensor,
        BL: ContactSensor,
        BR: ContactSensor,
        D: DelayNs + Clone,
    {
        let mut scanner = ArcScanner::new(scanner_motor, sonar, delay.clone(), &self.config);
        calibrate(&mut scanner, &self.config).await?;

        info!("Starting autonomous loops");
        let (never, _) = join(
            navigate(
                &mut scanner,
                &self.motors,
                &self.gate,
                &self.config,
                delay.clone(),
            ),
            collision_reflex(&mut bumpers, &self.motors, &self.gate, &self.config, delay),
        )
        .await;
        Ok(never)
    }
}
