//! Remote Control Events
//!
//! Events delivered by the remote control channel. The channel itself lives
//! outside this crate; it forwards its callbacks to
//! [`crate::task::remote_control::RemoteControl`].

/// Identifier of the remote override toggle button
pub const REMOTE_BUTTON_ID: &str = "Remote";

/// Label shown on the remote override toggle button
pub const REMOTE_BUTTON_LABEL: &str = "Remote control";

/// Key or button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    Pressed,
    Released,
}

/// Directional keys of the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Any other key code, ignored
    Other(u16),
}

/// Key event from the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub key: Key,
    pub action: Action,
}

impl KeyEvent {
    pub const fn pressed(key: Key) -> Self {
        Self {
            key,
            action: Action::Pressed,
        }
    }

    pub const fn released(key: Key) -> Self {
        Self {
            key,
            action: Action::Released,
        }
    }
}

/// Button event from the remote UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent<'a> {
    pub id: &'a str,
    pub action: Action,
}

/// Remote UI the controller registers its controls with
pub trait RemoteUi {
    /// Adds a button identified by `id` showing `label`
    fn add_button(&mut self, id: &'static str, label: &'static str);
}
