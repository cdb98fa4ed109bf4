//! Distance Sampler
//!
//! Single ultrasonic reads are noisy and sometimes bimodal, so every distance
//! the controller acts on is the mean of several consecutive point reads.
//!
//! # Sampling
//! - 5 reads by default, each followed by a 10 ms delay
//! - Arithmetic mean, no outlier rejection
//! - No error path: a sensor reporting 0 or saturating is averaged like any
//!   other value and left for the navigation thresholds to absorb

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::system::config::RoverConfig;
use crate::system::hardware::DistanceSensor;
use crate::task::pause;

/// Averages point reads from the distance sensor
pub struct DistanceSampler<U, D> {
    sensor: U,
    delay: D,
    samples: u8,
    interval: Duration,
}

impl<U: DistanceSensor, D: DelayNs> DistanceSampler<U, D> {
    pub fn new(sensor: U, delay: D, config: &RoverConfig) -> Self {
        Self {
            sensor,
            delay,
            samples: config.samples_per_reading.max(1),
            interval: config.sample_interval,
        }
    }

    /// Mean of the configured number of consecutive reads
    pub async fn sample(&mut self) -> f32 {
        let mut sum = 0.0;
        for _ in 0..self.samples {
            sum += self.sensor.read_distance().await;
            pause(&mut self.delay, self.interval).await;
        }
        sum / f32::from(self.samples)
    }

    /// One raw read, no averaging and no delay
    pub async fn read_once(&mut self) -> f32 {
        self.sensor.read_distance().await
    }

    /// Waits on the sampler's own delay provider
    pub async fn wait(&mut self, duration: Duration) {
        pause(&mut self.delay, duration).await;
    }
}
