//! Reactive obstacle-avoiding rover controller
//!
//! Sweeps a sonar on a rotating mount across a forward arc, picks a heading
//! that avoids obstacles and backs off reflexively when a bumper is pressed.
//!
//! # Architecture
//! - `system`: shared types and synchronized state (configuration, drive
//!   commands, the motor lock, the override gate, hardware traits)
//! - `task`: the async control loops (calibration, navigation, collision
//!   reflex, remote control) and the [`task::rover::Rover`] that runs them
//!
//! The firmware owns the executor and the board; it implements the traits in
//! [`system::hardware`], builds a [`task::rover::Rover`] and awaits
//! [`task::rover::Rover::run`] from one of its tasks.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

/// Shared types and synchronized state
pub mod system;
/// Control loops
pub mod task;

#[cfg(test)]
mod sim;

pub use system::config::RoverConfig;
pub use system::error::Error;
pub use task::rover::Rover;
