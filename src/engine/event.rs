//! # Semantic Event Types
//!
//! The closed event vocabulary delivered to subscribers: press/release
//! edges for buttons and triggers, movement for sticks.
//!
//! Event names are typed ([`EventName`]) rather than free strings, but the
//! string vocabulary is still available through `Display`/`FromStr` so
//! hosts can register by name (`"button_a_pressed"`, `"dpad_up_released"`,
//! `"left_trigger_pressed"`, `"right_stick_moved"`, ...).

use std::fmt;
use std::str::FromStr;

use crate::engine::mapping::{Button, Side};
use crate::error::{JoypadError, Result};

/// A named, decoded occurrence delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    ButtonPressed(Button),
    ButtonReleased(Button),
    TriggerPressed(Side),
    TriggerReleased(Side),
    StickMoved(Side),
}

impl EventName {
    /// The complete event vocabulary, in stable order.
    #[must_use]
    pub fn all() -> Vec<EventName> {
        let mut names = Vec::with_capacity(Button::ALL.len() * 2 + 6);
        for button in Button::ALL {
            names.push(EventName::ButtonPressed(button));
            names.push(EventName::ButtonReleased(button));
        }
        for side in [Side::Left, Side::Right] {
            names.push(EventName::TriggerPressed(side));
            names.push(EventName::TriggerReleased(side));
        }
        for side in [Side::Left, Side::Right] {
            names.push(EventName::StickMoved(side));
        }
        names
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventName::ButtonPressed(b) => write!(f, "{}_pressed", b),
            EventName::ButtonReleased(b) => write!(f, "{}_released", b),
            EventName::TriggerPressed(s) => write!(f, "{}_trigger_pressed", s),
            EventName::TriggerReleased(s) => write!(f, "{}_trigger_released", s),
            EventName::StickMoved(s) => write!(f, "{}_stick_moved", s),
        }
    }
}

impl FromStr for EventName {
    type Err = JoypadError;

    /// Parse a name from the string vocabulary.
    ///
    /// Names outside the vocabulary are rejected rather than silently
    /// accepted, so a typo never produces a handler that can never fire.
    fn from_str(s: &str) -> Result<Self> {
        EventName::all()
            .into_iter()
            .find(|name| name.to_string() == s)
            .ok_or_else(|| JoypadError::UnknownEventName(s.to_string()))
    }
}

/// Payload carried by a semantic event.
///
/// Button edges carry nothing, trigger edges carry the normalized intensity
/// in [0, 1], stick movement carries both axes normalized to [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventPayload {
    None,
    Trigger { value: f32 },
    Stick { x: f32, y: f32 },
}

/// A semantic event: name plus payload. Ephemeral, scoped to one iteration
/// of the run loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemanticEvent {
    pub name: EventName,
    pub payload: EventPayload,
}

impl SemanticEvent {
    #[must_use]
    pub fn new(name: EventName, payload: EventPayload) -> Self {
        Self { name, payload }
    }
}
