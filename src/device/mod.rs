//! # Device Module
//!
//! The input boundary of the engine.
//!
//! This module handles:
//! - The [`RawEvent`] data model (kind, code, value)
//! - The [`RawEventSource`] trait abstracting a blocking event stream
//! - Conversion from `evdev` input events
//! - Gamepad detection and reading via evdev ([`xbox`])
//!
//! The engine only ever consumes a [`RawEventSource`], so tests (and hosts
//! with their own input plumbing) can inject a synthetic source instead of
//! real hardware.

pub mod xbox;

use crate::error::Result;

/// Raw event kind, mirroring the Linux input-event type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawEventKind {
    /// Digital button report (EV_KEY)
    Key,
    /// Absolute axis sample (EV_ABS)
    AbsoluteAxis,
    /// Batch marker (EV_SYN)
    Sync,
}

/// A single low-level hardware input report.
///
/// `code` is opaque at this layer; the mapping table resolves it to a
/// logical control. `value` is 0/1 for buttons and a device-dependent range
/// for axes and triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub kind: RawEventKind,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    #[must_use]
    pub fn new(kind: RawEventKind, code: u16, value: i32) -> Self {
        Self { kind, code, value }
    }

    /// Convert an evdev event into a [`RawEvent`].
    ///
    /// Returns `None` for event types the engine never consumes
    /// (relative axes, misc, LED, force feedback, ...).
    #[must_use]
    pub fn from_input_event(event: &evdev::InputEvent) -> Option<Self> {
        match event.kind() {
            evdev::InputEventKind::Key(key) => {
                Some(Self::new(RawEventKind::Key, key.code(), event.value()))
            }
            evdev::InputEventKind::AbsAxis(axis) => {
                Some(Self::new(RawEventKind::AbsoluteAxis, axis.0, event.value()))
            }
            evdev::InputEventKind::Synchronization(_) => {
                Some(Self::new(RawEventKind::Sync, event.code(), event.value()))
            }
            _ => None,
        }
    }
}

/// Trait for a blocking stream of raw input events.
///
/// The read is the only blocking operation in the engine: it blocks until
/// the device yields the next report or the device goes away.
pub trait RawEventSource {
    /// Block until the next event is available.
    ///
    /// Returns `Ok(Some(event))` for the next report, `Ok(None)` when the
    /// source is cleanly exhausted, and `Err` when the device is lost.
    fn next_event(&mut self) -> Result<Option<RawEvent>>;
}


#[cfg(test)]
mod tests {
    use super::*;
    use evdev::{AbsoluteAxisType, EventType, InputEvent, Key};

    #[test]
    fn test_from_key_event() {
        let event = InputEvent::new(EventType::KEY, Key::BTN_SOUTH.code(), 1);
        let raw = RawEvent::from_input_event(&event).unwrap();
        assert_eq!(raw.kind, RawEventKind::Key);
        assert_eq!(raw.code, Key::BTN_SOUTH.code());
        assert_eq!(raw.value, 1);
    }

    #[test]
    fn test_from_axis_event() {
        let event = InputEvent::new(EventType::ABSOLUTE, AbsoluteAxisType::ABS_X.0, -12000);
        let raw = RawEvent::from_input_event(&event).unwrap();
        assert_eq!(raw.kind, RawEventKind::AbsoluteAxis);
        assert_eq!(raw.code, AbsoluteAxisType::ABS_X.0);
        assert_eq!(raw.value, -12000);
    }

    #[test]
    fn test_from_sync_event() {
        let event = InputEvent::new(EventType::SYNCHRONIZATION, 0, 0);
        let raw = RawEvent::from_input_event(&event).unwrap();
        assert_eq!(raw.kind, RawEventKind::Sync);
    }

    #[test]
    fn test_from_unhandled_event_type() {
        // Relative axes (mouse-style) are not part of the gamepad model
        let event = InputEvent::new(EventType::RELATIVE, 0, 5);
        assert!(RawEvent::from_input_event(&event).is_none());
    }
}
