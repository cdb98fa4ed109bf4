//! Arc Scanner
//!
//! Sweeps the sonar mount left to right through seven stops centred on the
//! calibrated zero, `-3 * step` up to `+3 * step`, and samples the distance at
//! each stop. The resulting [`DistanceProfile`] is indexed in sweep order, so
//! index 0 is the leftmost bearing and index 3 straight ahead.
//!
//! A sweep costs roughly 7 x (move time + 50 ms of sampling), which bounds how
//! fast the navigation loop can react.

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::system::config::RoverConfig;
use crate::system::hardware::{DistanceSensor, ScannerMotor};
use crate::system::profile::{DistanceProfile, CENTER, SCAN_POINTS};
use crate::task::distance_sample::DistanceSampler;

/// Encoder targets of one sweep, in visiting order
pub fn scan_angles(step: i32) -> [i32; SCAN_POINTS] {
    core::array::from_fn(|i| (i as i32 - CENTER as i32) * step)
}

/// Sonar on its rotating mount
pub struct ArcScanner<S, U, D> {
    motor: S,
    sampler: DistanceSampler<U, D>,
    step: i32,
    move_time: Duration,
    /// Last commanded encoder position
    pose: i32,
}

impl<S: ScannerMotor, U: DistanceSensor, D: DelayNs> ArcScanner<S, U, D> {
    pub fn new(motor: S, sensor: U, delay: D, config: &RoverConfig) -> Self {
        Self {
            motor,
            sampler: DistanceSampler::new(sensor, delay, config),
            step: config.scanner_step,
            move_time: config.scan_move_time,
            pose: 0,
        }
    }

    /// Sweeps the arc once and returns the seven averaged distances
    pub async fn scan_arc(&mut self) -> DistanceProfile {
        let mut readings = [0.0; SCAN_POINTS];
        for (reading, angle) in readings.iter_mut().zip(scan_angles(self.step)) {
            self.rotate_to(angle, self.move_time).await;
            *reading = self.sampler.sample().await;
        }
        trace!("scan: {:?}", readings);
        DistanceProfile::new(readings)
    }

    /// Current encoder position relative to the logical zero
    pub fn pose(&self) -> i32 {
        self.pose
    }

    pub(crate) async fn rotate_to(&mut self, position: i32, max_time: Duration) {
        self.motor.rotate_abs(position, max_time).await;
        self.pose = position;
    }

    pub(crate) fn run_motor(&mut self, power: i16) {
        self.motor.set_power(power);
    }

    pub(crate) fn zero_encoder(&mut self) {
        self.motor.reset_encoder();
        self.pose = 0;
    }

    pub(crate) fn sampler(&mut self) -> &mut DistanceSampler<U, D> {
        &mut self.sampler
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;
    use crate::sim::{MountHandle, VirtualDelay};

    #[test]
    fn angles_are_centred_and_increasing() {
        let angles = scan_angles(180);
        assert_eq!(angles, [-540, -360, -180, 0, 180, 360, 540]);
        assert!(angles.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(angles[SCAN_POINTS - 1] - angles[0], 6 * 180);
    }

    #[test]
    fn sweep_visits_every_angle_left_to_right() {
        // Well clear of the hard stop; distance grows with the bearing
        let mount = MountHandle::at(2000, |angle| 100.0 + angle as f32 / 10.0);
        let mut scanner = ArcScanner::new(
            mount.motor(),
            mount.sonar(),
            VirtualDelay::new(),
            &RoverConfig::default(),
        );

        let profile = block_on(scanner.scan_arc());

        assert_eq!(mount.targets(), scan_angles(180).to_vec());
        assert_eq!(
            profile.readings(),
            &[46.0, 64.0, 82.0, 100.0, 118.0, 136.0, 154.0]
        );
        assert_eq!(scanner.pose(), 540);
    }

    #[test]
    fn custom_step_spans_six_steps() {
        let mount = MountHandle::at(2000, |_| 80.0);
        let config = RoverConfig::default().with_scanner_step(100);
        let mut scanner = ArcScanner::new(mount.motor(), mount.sonar(), VirtualDelay::new(), &config);

        block_on(scanner.scan_arc());

        let targets = mount.targets();
        assert_eq!(targets.len(), SCAN_POINTS);
        assert_eq!(targets[SCAN_POINTS - 1] - targets[0], 600);
    }
}
