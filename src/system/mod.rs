//! Core system components for rover operation
pub mod config;
pub mod drive_command;
pub mod error;
pub mod event;
pub mod hardware;
pub mod motor_lock;
pub mod override_gate;
pub mod profile;
