//! # Control Mapping Module
//!
//! Resolves raw (event kind, code) pairs to logical controls.
//!
//! ## Default code assignments (Linux `xpad` driver)
//!
//! | Control | evdev Code |
//! |---------|------------|
//! | A | BTN_SOUTH |
//! | B | BTN_EAST |
//! | X | BTN_NORTH |
//! | Y | BTN_WEST |
//! | Left/Right bumper | BTN_TL / BTN_TR |
//! | Left/Right stick press | BTN_THUMBL / BTN_THUMBR |
//! | Start / Back | BTN_START / BTN_SELECT |
//! | Left stick | ABS_X / ABS_Y |
//! | Right stick | ABS_RX / ABS_RY |
//! | Left/Right trigger | ABS_Z / ABS_RZ |
//! | D-Pad | ABS_HAT0X / ABS_HAT0Y (or BTN_DPAD_*) |
//!
//! The table is the single point of adaptation for hardware with different
//! code assignments: configuration overrides replace individual entries
//! without touching the decoder.

use evdev::{AbsoluteAxisType, Key};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::config::MappingConfig;
use crate::device::RawEventKind;
use crate::error::{JoypadError, Result};

/// Left/right pair selector for sticks and triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// A physical button, independent of hardware code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    LeftBumper,
    RightBumper,
    LeftStick,
    RightStick,
    Start,
    Back,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
}

impl Button {
    /// All buttons, in vocabulary order.
    pub const ALL: [Button; 14] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::LeftBumper,
        Button::RightBumper,
        Button::LeftStick,
        Button::RightStick,
        Button::Start,
        Button::Back,
        Button::DpadUp,
        Button::DpadDown,
        Button::DpadLeft,
        Button::DpadRight,
    ];

    /// Control-vocabulary name. D-pad directions are unprefixed, everything
    /// else carries the `button_` prefix (matching the event vocabulary).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Button::A => "button_a",
            Button::B => "button_b",
            Button::X => "button_x",
            Button::Y => "button_y",
            Button::LeftBumper => "button_left_bumper",
            Button::RightBumper => "button_right_bumper",
            Button::LeftStick => "button_left_stick",
            Button::RightStick => "button_right_stick",
            Button::Start => "button_start",
            Button::Back => "button_back",
            Button::DpadUp => "dpad_up",
            Button::DpadDown => "dpad_down",
            Button::DpadLeft => "dpad_left",
            Button::DpadRight => "dpad_right",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Button {
    type Err = JoypadError;

    fn from_str(s: &str) -> Result<Self> {
        Button::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| JoypadError::UnknownControl(s.to_string()))
    }
}

/// An analog (or hat) axis, independent of hardware code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    LeftTrigger,
    RightTrigger,
    DpadX,
    DpadY,
}

impl Axis {
    /// All axes, in vocabulary order.
    pub const ALL: [Axis; 8] = [
        Axis::LeftStickX,
        Axis::LeftStickY,
        Axis::RightStickX,
        Axis::RightStickY,
        Axis::LeftTrigger,
        Axis::RightTrigger,
        Axis::DpadX,
        Axis::DpadY,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Axis::LeftStickX => "left_stick_x",
            Axis::LeftStickY => "left_stick_y",
            Axis::RightStickX => "right_stick_x",
            Axis::RightStickY => "right_stick_y",
            Axis::LeftTrigger => "left_trigger",
            Axis::RightTrigger => "right_trigger",
            Axis::DpadX => "dpad_x",
            Axis::DpadY => "dpad_y",
        }
    }

    /// The stick this axis belongs to, if it is a stick axis.
    #[must_use]
    pub fn stick_side(&self) -> Option<Side> {
        match self {
            Axis::LeftStickX | Axis::LeftStickY => Some(Side::Left),
            Axis::RightStickX | Axis::RightStickY => Some(Side::Right),
            _ => None,
        }
    }

    /// The trigger this axis belongs to, if it is a trigger.
    #[must_use]
    pub fn trigger_side(&self) -> Option<Side> {
        match self {
            Axis::LeftTrigger => Some(Side::Left),
            Axis::RightTrigger => Some(Side::Right),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_trigger(&self) -> bool {
        self.trigger_side().is_some()
    }

    #[must_use]
    pub fn is_hat(&self) -> bool {
        matches!(self, Axis::DpadX | Axis::DpadY)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = JoypadError;

    fn from_str(s: &str) -> Result<Self> {
        Axis::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| JoypadError::UnknownControl(s.to_string()))
    }
}

/// A named physical input element: button or axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalControl {
    Button(Button),
    Axis(Axis),
}

impl LogicalControl {
    #[must_use]
    pub fn is_button(&self) -> bool {
        matches!(self, LogicalControl::Button(_))
    }

    #[must_use]
    pub fn is_axis(&self) -> bool {
        matches!(self, LogicalControl::Axis(_))
    }
}

impl fmt::Display for LogicalControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalControl::Button(b) => b.fmt(f),
            LogicalControl::Axis(a) => a.fmt(f),
        }
    }
}

impl FromStr for LogicalControl {
    type Err = JoypadError;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(button) = s.parse::<Button>() {
            return Ok(LogicalControl::Button(button));
        }
        s.parse::<Axis>().map(LogicalControl::Axis)
    }
}

/// Lookup table from raw (event kind, code) to logical control.
///
/// Pure and stateless after construction. Codes without an entry resolve to
/// `None` and are silently dropped by the engine; sync markers never appear
/// in the table.
#[derive(Debug, Clone)]
pub struct MappingTable {
    entries: HashMap<(RawEventKind, u16), LogicalControl>,
}

impl MappingTable {
    /// Build the default xpad table.
    #[must_use]
    pub fn new() -> Self {
        let mut entries = HashMap::new();

        let keys: [(Key, Button); 14] = [
            (Key::BTN_SOUTH, Button::A),
            (Key::BTN_EAST, Button::B),
            // xpad reports X on BTN_NORTH and Y on BTN_WEST
            (Key::BTN_NORTH, Button::X),
            (Key::BTN_WEST, Button::Y),
            (Key::BTN_TL, Button::LeftBumper),
            (Key::BTN_TR, Button::RightBumper),
            (Key::BTN_THUMBL, Button::LeftStick),
            (Key::BTN_THUMBR, Button::RightStick),
            (Key::BTN_START, Button::Start),
            (Key::BTN_SELECT, Button::Back),
            (Key::BTN_DPAD_UP, Button::DpadUp),
            (Key::BTN_DPAD_DOWN, Button::DpadDown),
            (Key::BTN_DPAD_LEFT, Button::DpadLeft),
            (Key::BTN_DPAD_RIGHT, Button::DpadRight),
        ];
        for (key, button) in keys {
            entries.insert(
                (RawEventKind::Key, key.code()),
                LogicalControl::Button(button),
            );
        }

        let axes: [(AbsoluteAxisType, Axis); 8] = [
            (AbsoluteAxisType::ABS_X, Axis::LeftStickX),
            (AbsoluteAxisType::ABS_Y, Axis::LeftStickY),
            (AbsoluteAxisType::ABS_RX, Axis::RightStickX),
            (AbsoluteAxisType::ABS_RY, Axis::RightStickY),
            (AbsoluteAxisType::ABS_Z, Axis::LeftTrigger),
            (AbsoluteAxisType::ABS_RZ, Axis::RightTrigger),
            (AbsoluteAxisType::ABS_HAT0X, Axis::DpadX),
            (AbsoluteAxisType::ABS_HAT0Y, Axis::DpadY),
        ];
        for (abs, axis) in axes {
            entries.insert(
                (RawEventKind::AbsoluteAxis, abs.0),
                LogicalControl::Axis(axis),
            );
        }

        Self { entries }
    }

    /// Build the default table with configuration overrides applied.
    ///
    /// # Errors
    ///
    /// Returns `UnknownControl` if an override names a control outside the
    /// vocabulary, or `Config` if the event kind is invalid.
    pub fn with_overrides(config: &MappingConfig) -> Result<Self> {
        let mut table = Self::new();

        for entry in &config.overrides {
            let kind = match entry.event.as_str() {
                "key" => RawEventKind::Key,
                "axis" => RawEventKind::AbsoluteAxis,
                other => {
                    return Err(JoypadError::UnknownControl(format!(
                        "invalid override event kind {:?}",
                        other
                    )))
                }
            };
            let control: LogicalControl = entry.control.parse()?;
            table.entries.insert((kind, entry.code), control);
        }

        Ok(table)
    }

    /// Resolve a raw (kind, code) pair to its logical control.
    #[must_use]
    pub fn resolve(&self, kind: RawEventKind, code: u16) -> Option<LogicalControl> {
        self.entries.get(&(kind, code)).copied()
    }
}

impl Default for MappingTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MappingOverride;

    #[test]
    fn test_default_button_mapping() {
        let table = MappingTable::new();

        assert_eq!(
            table.resolve(RawEventKind::Key, Key::BTN_SOUTH.code()),
            Some(LogicalControl::Button(Button::A))
        );
        assert_eq!(
            table.resolve(RawEventKind::Key, Key::BTN_EAST.code()),
            Some(LogicalControl::Button(Button::B))
        );
        assert_eq!(
            table.resolve(RawEventKind::Key, Key::BTN_NORTH.code()),
            Some(LogicalControl::Button(Button::X))
        );
        assert_eq!(
            table.resolve(RawEventKind::Key, Key::BTN_WEST.code()),
            Some(LogicalControl::Button(Button::Y))
        );
        assert_eq!(
            table.resolve(RawEventKind::Key, Key::BTN_SELECT.code()),
            Some(LogicalControl::Button(Button::Back))
        );
    }

    #[test]
    fn test_default_axis_mapping() {
        let table = MappingTable::new();

        assert_eq!(
            table.resolve(RawEventKind::AbsoluteAxis, AbsoluteAxisType::ABS_X.0),
            Some(LogicalControl::Axis(Axis::LeftStickX))
        );
        assert_eq!(
            table.resolve(RawEventKind::AbsoluteAxis, AbsoluteAxisType::ABS_RZ.0),
            Some(LogicalControl::Axis(Axis::RightTrigger))
        );
        assert_eq!(
            table.resolve(RawEventKind::AbsoluteAxis, AbsoluteAxisType::ABS_HAT0Y.0),
            Some(LogicalControl::Axis(Axis::DpadY))
        );
    }

    #[test]
    fn test_sync_never_resolves() {
        let table = MappingTable::new();
        assert_eq!(table.resolve(RawEventKind::Sync, 0), None);
    }

    #[test]
    fn test_unknown_code_unmapped() {
        let table = MappingTable::new();
        // ABS_MISC has no entry
        assert_eq!(
            table.resolve(RawEventKind::AbsoluteAxis, AbsoluteAxisType::ABS_MISC.0),
            None
        );
        assert_eq!(table.resolve(RawEventKind::Key, Key::KEY_ESC.code()), None);
    }

    #[test]
    fn test_override_replaces_entry() {
        let config = MappingConfig {
            overrides: vec![MappingOverride {
                event: "key".to_string(),
                code: Key::BTN_SOUTH.code(),
                control: "button_b".to_string(),
            }],
        };
        let table = MappingTable::with_overrides(&config).unwrap();

        assert_eq!(
            table.resolve(RawEventKind::Key, Key::BTN_SOUTH.code()),
            Some(LogicalControl::Button(Button::B))
        );
        // Untouched entries survive
        assert_eq!(
            table.resolve(RawEventKind::Key, Key::BTN_EAST.code()),
            Some(LogicalControl::Button(Button::B))
        );
    }

    #[test]
    fn test_override_adds_entry() {
        let config = MappingConfig {
            overrides: vec![MappingOverride {
                event: "axis".to_string(),
                code: AbsoluteAxisType::ABS_BRAKE.0,
                control: "left_trigger".to_string(),
            }],
        };
        let table = MappingTable::with_overrides(&config).unwrap();

        assert_eq!(
            table.resolve(RawEventKind::AbsoluteAxis, AbsoluteAxisType::ABS_BRAKE.0),
            Some(LogicalControl::Axis(Axis::LeftTrigger))
        );
    }

    #[test]
    fn test_override_unknown_control_fails() {
        let config = MappingConfig {
            overrides: vec![MappingOverride {
                event: "key".to_string(),
                code: 304,
                control: "button_q".to_string(),
            }],
        };
        assert!(matches!(
            MappingTable::with_overrides(&config),
            Err(JoypadError::UnknownControl(_))
        ));
    }

    #[test]
    fn test_control_name_round_trip() {
        for button in Button::ALL {
            let parsed: LogicalControl = button.name().parse().unwrap();
            assert_eq!(parsed, LogicalControl::Button(button));
        }
        for axis in Axis::ALL {
            let parsed: LogicalControl = axis.name().parse().unwrap();
            assert_eq!(parsed, LogicalControl::Axis(axis));
        }
    }

    #[test]
    fn test_axis_sides() {
        assert_eq!(Axis::LeftStickX.stick_side(), Some(Side::Left));
        assert_eq!(Axis::RightStickY.stick_side(), Some(Side::Right));
        assert_eq!(Axis::LeftTrigger.stick_side(), None);
        assert_eq!(Axis::RightTrigger.trigger_side(), Some(Side::Right));
        assert!(Axis::DpadX.is_hat());
        assert!(!Axis::LeftStickX.is_hat());
    }
}
