//! Remote Override Gate
//!
//! Process-wide flag suspending both autonomous loops while the rover is
//! driven remotely. Written by the remote control event handler, read by the
//! navigation and collision loops at the top of every iteration and again
//! once they hold the motor lock.

use core::sync::atomic::{AtomicBool, Ordering};

/// Override flag, inactive at startup
#[derive(Debug, Default)]
pub struct OverrideGate {
    active: AtomicBool,
}

impl OverrideGate {
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
        }
    }

    /// Whether remote driving currently suspends the autonomous loops
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn set(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    /// Flips the flag and returns the new state
    pub fn toggle(&self) -> bool {
        !self.active.fetch_xor(true, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive() {
        assert!(!OverrideGate::new().is_active());
    }

    #[test]
    fn toggle_reports_new_state() {
        let gate = OverrideGate::new();
        assert!(gate.toggle());
        assert!(gate.is_active());
        assert!(!gate.toggle());
        assert!(!gate.is_active());
    }
}
