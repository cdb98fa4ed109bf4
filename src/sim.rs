//! Simulated hardware for unit tests
//!
//! Drive motors write into a shared [`Recorder`], the scanner mount is a
//! small physical model with a hard stop at position 0, and [`VirtualDelay`]
//! advances a virtual clock and yields once so joined loops interleave.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embassy_futures::yield_now;
use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::system::hardware::{ContactSensor, DistanceSensor, DriveMotor, ScannerMotor};

/// One observed drive motor write or hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Write {
    Left(i16),
    Right(i16),
    Hold(u32),
}

/// Shared log of drive motor writes
#[derive(Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<Write>>>);

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left(&self) -> FakeMotor {
        FakeMotor {
            left: true,
            rec: self.clone(),
        }
    }

    pub fn right(&self) -> FakeMotor {
        FakeMotor {
            left: false,
            rec: self.clone(),
        }
    }

    pub fn entries(&self) -> Vec<Write> {
        self.0.borrow().clone()
    }

    /// Motor writes only, holds dropped
    pub fn writes(&self) -> Vec<Write> {
        self.0
            .borrow()
            .iter()
            .copied()
            .filter(|w| !matches!(w, Write::Hold(_)))
            .collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, write: Write) {
        self.0.borrow_mut().push(write);
    }
}

pub struct FakeMotor {
    left: bool,
    rec: Recorder,
}

impl DriveMotor for FakeMotor {
    fn set_power(&mut self, power: i16) {
        self.rec.push(if self.left {
            Write::Left(power)
        } else {
            Write::Right(power)
        });
    }
}

/// Delay that only advances a virtual clock
#[derive(Clone, Default)]
pub struct VirtualDelay {
    now_ms: Rc<Cell<u64>>,
    rec: Option<Recorder>,
}

impl VirtualDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also logs every delay as a hold into `rec`
    pub fn recording(mut self, rec: &Recorder) -> Self {
        self.rec = Some(rec.clone());
        self
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    async fn advance(&mut self, ms: u32) {
        self.now_ms.set(self.now_ms.get() + u64::from(ms));
        if let Some(rec) = &self.rec {
            rec.push(Write::Hold(ms));
        }
        yield_now().await;
    }
}

impl DelayNs for VirtualDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.advance(ns / 1_000_000).await;
    }

    async fn delay_us(&mut self, us: u32) {
        self.advance(us / 1_000).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.advance(ms).await;
    }
}

/// Physical model of the scanner mount
pub struct Mount {
    /// Position in encoder counts from the hard stop
    pub physical: i32,
    /// Physical position of encoder count zero
    pub origin: i32,
    pub power: i16,
    /// Counts travelled per sensor read while driven towards the stop
    pub seek_rate: i32,
    /// Every `rotate_abs` target, in call order
    pub targets: Vec<i32>,
    /// Distance seen at a logical position away from the hard stop
    pub scene: fn(i32) -> f32,
    /// When set, the sensor never sees its housing
    pub blind: bool,
}

impl Mount {
    pub fn logical(&self) -> i32 {
        self.physical - self.origin
    }
}

#[derive(Clone)]
pub struct MountHandle(pub Rc<RefCell<Mount>>);

impl MountHandle {
    /// Mount resting at `physical` with encoder zero at the same place
    pub fn at(physical: i32, scene: fn(i32) -> f32) -> Self {
        Self(Rc::new(RefCell::new(Mount {
            physical,
            origin: physical,
            power: 0,
            seek_rate: 45,
            targets: Vec::new(),
            scene,
            blind: false,
        })))
    }

    pub fn motor(&self) -> FakeScanner {
        FakeScanner(self.clone())
    }

    pub fn sonar(&self) -> FakeSonar {
        FakeSonar(self.clone())
    }

    pub fn targets(&self) -> Vec<i32> {
        self.0.borrow().targets.clone()
    }
}

pub struct FakeScanner(MountHandle);

impl ScannerMotor for FakeScanner {
    fn set_power(&mut self, power: i16) {
        self.0 .0.borrow_mut().power = power;
    }

    async fn rotate_abs(&mut self, position: i32, _max_time: Duration) {
        let mut mount = self.0 .0.borrow_mut();
        mount.targets.push(position);
        mount.physical = (mount.origin + position).max(0);
    }

    fn reset_encoder(&mut self) {
        let mut mount = self.0 .0.borrow_mut();
        mount.origin = mount.physical;
    }
}

pub struct FakeSonar(MountHandle);

impl DistanceSensor for FakeSonar {
    async fn read_distance(&mut self) -> f32 {
        let mut mount = self.0 .0.borrow_mut();
        if mount.power < 0 {
            mount.physical = (mount.physical - mount.seek_rate).max(0);
        }
        if mount.physical == 0 && !mount.blind {
            5.0
        } else {
            (mount.scene)(mount.logical())
        }
    }
}

/// Sonar replaying fixed readings, repeating the last one
pub struct ScriptedSonar {
    readings: Vec<f32>,
    next: usize,
}

impl ScriptedSonar {
    pub fn new(readings: &[f32]) -> Self {
        Self {
            readings: readings.to_vec(),
            next: 0,
        }
    }
}

impl DistanceSensor for ScriptedSonar {
    async fn read_distance(&mut self) -> f32 {
        let reading = self.readings[self.next.min(self.readings.len() - 1)];
        self.next += 1;
        reading
    }
}

/// Bump sensor whose state the test flips
#[derive(Clone, Default)]
pub struct FakeBumper(Rc<Cell<bool>>);

impl FakeBumper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, pressed: bool) {
        self.0.set(pressed);
    }
}

impl ContactSensor for FakeBumper {
    async fn is_pressed(&mut self) -> bool {
        self.0.get()
    }
}

/// Polls until `done` holds, yielding in between
pub async fn until(mut done: impl FnMut() -> bool) {
    while !done() {
        yield_now().await;
    }
}
