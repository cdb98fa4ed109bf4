//! Control loops and the rover that runs them
pub mod arc_scan;
pub mod calibrate;
pub mod collision_reflex;
pub mod distance_sample;
pub mod navigate;
pub mod remote_control;
pub mod rover;

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

/// Waits for `duration` on the given delay provider
pub(crate) async fn pause<D: DelayNs>(delay: &mut D, duration: Duration) {
    let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    delay.delay_ms(ms).await;
}
