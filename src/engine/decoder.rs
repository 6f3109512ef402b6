//! # Semantic Event Decoder
//!
//! Turns tracked state transitions and raw axis samples into semantic
//! events.
//!
//! Decode rules:
//! - Buttons: one `pressed` on the inactive->active edge, one `released` on
//!   the active->inactive edge, nothing on repeated identical reports.
//! - Triggers: same edge rule, with the normalized intensity attached to
//!   both edges.
//! - Sticks: every raw sample produces a movement event carrying both axes,
//!   pairing the fresh axis with the last-known value of its partner (axes
//!   arrive as separate samples; the decoder never waits for both).
//! - Hat axes: the d-pad arrives as -1/0/1 samples on two axes; sign
//!   transitions become directional press/release edges.
//! - Sync markers: consumed with no decode action.

use crate::config::AxesConfig;
use crate::engine::event::{EventName, EventPayload, SemanticEvent};
use crate::engine::mapping::{Axis, Button, LogicalControl, Side};
use crate::engine::state::{ControlStateTracker, StateTransition};

/// Device axis ranges used for normalization.
#[derive(Debug, Clone, Copy)]
pub struct AxisLimits {
    /// Maximum stick axis magnitude.
    pub stick_max: i32,
    /// Maximum trigger value.
    pub trigger_max: i32,
}

impl AxisLimits {
    #[must_use]
    pub fn from_config(config: &AxesConfig) -> Self {
        Self {
            stick_max: config.stick_max,
            trigger_max: config.trigger_max,
        }
    }

    /// Normalize a stick sample to [-1, 1].
    #[must_use]
    pub fn normalize_stick(&self, value: i32) -> f32 {
        (value as f32 / self.stick_max as f32).clamp(-1.0, 1.0)
    }

    /// Normalize a trigger sample to [0, 1].
    #[must_use]
    pub fn normalize_trigger(&self, value: i32) -> f32 {
        (value as f32 / self.trigger_max as f32).clamp(0.0, 1.0)
    }
}

/// Decode one tracked update into zero or more semantic events.
///
/// `tracker` has already absorbed the update, so paired stick axes read
/// their partner's last-known value from it.
#[must_use]
pub fn decode(
    control: LogicalControl,
    transition: StateTransition,
    tracker: &ControlStateTracker,
    limits: &AxisLimits,
) -> Vec<SemanticEvent> {
    match control {
        LogicalControl::Button(button) => decode_button(button, transition),
        LogicalControl::Axis(axis) => decode_axis(axis, transition, tracker, limits),
    }
}

fn decode_button(button: Button, transition: StateTransition) -> Vec<SemanticEvent> {
    if transition.is_press() {
        vec![SemanticEvent::new(
            EventName::ButtonPressed(button),
            EventPayload::None,
        )]
    } else if transition.is_release() {
        vec![SemanticEvent::new(
            EventName::ButtonReleased(button),
            EventPayload::None,
        )]
    } else {
        Vec::new()
    }
}

fn decode_axis(
    axis: Axis,
    transition: StateTransition,
    tracker: &ControlStateTracker,
    limits: &AxisLimits,
) -> Vec<SemanticEvent> {
    if let Some(side) = axis.trigger_side() {
        let payload = EventPayload::Trigger {
            value: limits.normalize_trigger(transition.current.last_value),
        };
        return if transition.is_press() {
            vec![SemanticEvent::new(EventName::TriggerPressed(side), payload)]
        } else if transition.is_release() {
            vec![SemanticEvent::new(EventName::TriggerReleased(side), payload)]
        } else {
            Vec::new()
        };
    }

    if let Some(side) = axis.stick_side() {
        // Movement is not edge-triggered: every sample is reported.
        let (x_axis, y_axis) = match side {
            Side::Left => (Axis::LeftStickX, Axis::LeftStickY),
            Side::Right => (Axis::RightStickX, Axis::RightStickY),
        };
        return vec![SemanticEvent::new(
            EventName::StickMoved(side),
            EventPayload::Stick {
                x: limits.normalize_stick(tracker.last_axis_value(x_axis)),
                y: limits.normalize_stick(tracker.last_axis_value(y_axis)),
            },
        )];
    }

    // Hat axes: -1/0/1 samples decoded into directional edges.
    decode_hat(axis, transition)
}

fn decode_hat(axis: Axis, transition: StateTransition) -> Vec<SemanticEvent> {
    let direction = |value: i32| -> Option<Button> {
        match (axis, value.signum()) {
            (Axis::DpadX, -1) => Some(Button::DpadLeft),
            (Axis::DpadX, 1) => Some(Button::DpadRight),
            (Axis::DpadY, -1) => Some(Button::DpadUp),
            (Axis::DpadY, 1) => Some(Button::DpadDown),
            _ => None,
        }
    };

    let previous = direction(transition.previous.last_value);
    let current = direction(transition.current.last_value);
    if previous == current {
        return Vec::new();
    }

    let mut events = Vec::with_capacity(2);
    if let Some(released) = previous {
        events.push(SemanticEvent::new(
            EventName::ButtonReleased(released),
            EventPayload::None,
        ));
    }
    if let Some(pressed) = current {
        events.push(SemanticEvent::new(
            EventName::ButtonPressed(pressed),
            EventPayload::None,
        ));
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mapping::Side;

    const TRIGGER_THRESHOLD: i32 = 511;

    fn limits() -> AxisLimits {
        AxisLimits {
            stick_max: 32767,
            trigger_max: 1023,
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    /// Run one raw value through tracker + decoder.
    fn step(
        tracker: &mut ControlStateTracker,
        control: LogicalControl,
        value: i32,
    ) -> Vec<SemanticEvent> {
        let transition = tracker.update(control, value);
        decode(control, transition, tracker, &limits())
    }

    #[test]
    fn test_button_press_release_once() {
        let mut tracker = ControlStateTracker::new(TRIGGER_THRESHOLD);
        let control = LogicalControl::Button(Button::A);

        let mut all = Vec::new();
        for value in [0, 0, 1, 1, 0] {
            all.extend(step(&mut tracker, control, value));
        }

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, EventName::ButtonPressed(Button::A));
        assert_eq!(all[1].name, EventName::ButtonReleased(Button::A));
        assert_eq!(all[0].payload, EventPayload::None);
    }

    #[test]
    fn test_trigger_below_threshold_never_fires() {
        let mut tracker = ControlStateTracker::new(TRIGGER_THRESHOLD);
        let control = LogicalControl::Axis(Axis::LeftTrigger);

        for value in [0, 100, 300, 511] {
            assert!(step(&mut tracker, control, value).is_empty());
        }
    }

    #[test]
    fn test_trigger_edge_carries_normalized_value() {
        let mut tracker = ControlStateTracker::new(TRIGGER_THRESHOLD);
        let control = LogicalControl::Axis(Axis::LeftTrigger);

        let events = step(&mut tracker, control, 512);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, EventName::TriggerPressed(Side::Left));
        match events[0].payload {
            EventPayload::Trigger { value } => assert!(approx(value, 512.0 / 1023.0)),
            _ => panic!("expected trigger payload"),
        }

        // Held beyond threshold: no duplicate
        assert!(step(&mut tracker, control, 1023).is_empty());

        // Release carries the value at release
        let events = step(&mut tracker, control, 0);
        assert_eq!(events[0].name, EventName::TriggerReleased(Side::Left));
        match events[0].payload {
            EventPayload::Trigger { value } => assert!(approx(value, 0.0)),
            _ => panic!("expected trigger payload"),
        }
    }

    #[test]
    fn test_stick_normalization() {
        let mut tracker = ControlStateTracker::new(TRIGGER_THRESHOLD);

        // X arrives first: partner Y defaults to 0
        let events = step(&mut tracker, LogicalControl::Axis(Axis::LeftStickX), 16383);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, EventName::StickMoved(Side::Left));
        match events[0].payload {
            EventPayload::Stick { x, y } => {
                assert!(approx(x, 0.5));
                assert!(approx(y, 0.0));
            }
            _ => panic!("expected stick payload"),
        }

        // Y arrives: movement event pairs it with the buffered X
        let events = step(&mut tracker, LogicalControl::Axis(Axis::LeftStickY), -16383);
        match events[0].payload {
            EventPayload::Stick { x, y } => {
                assert!(approx(x, 0.5));
                assert!(approx(y, -0.5));
            }
            _ => panic!("expected stick payload"),
        }
    }

    #[test]
    fn test_stick_center_normalizes_to_zero() {
        let mut tracker = ControlStateTracker::new(TRIGGER_THRESHOLD);

        let events = step(&mut tracker, LogicalControl::Axis(Axis::RightStickX), 0);
        match events[0].payload {
            EventPayload::Stick { x, y } => {
                assert_eq!(x, 0.0);
                assert_eq!(y, 0.0);
            }
            _ => panic!("expected stick payload"),
        }
    }

    #[test]
    fn test_stick_every_sample_reported() {
        let mut tracker = ControlStateTracker::new(TRIGGER_THRESHOLD);
        let control = LogicalControl::Axis(Axis::LeftStickX);

        // Identical repeated samples still produce movement events
        assert_eq!(step(&mut tracker, control, 1000).len(), 1);
        assert_eq!(step(&mut tracker, control, 1000).len(), 1);
    }

    #[test]
    fn test_stick_clamps_out_of_range() {
        let limits = AxisLimits {
            stick_max: 32767,
            trigger_max: 1023,
        };
        assert_eq!(limits.normalize_stick(-40000), -1.0);
        assert_eq!(limits.normalize_stick(40000), 1.0);
        assert_eq!(limits.normalize_trigger(2000), 1.0);
    }

    #[test]
    fn test_hat_press_and_release() {
        let mut tracker = ControlStateTracker::new(TRIGGER_THRESHOLD);
        let control = LogicalControl::Axis(Axis::DpadY);

        let events = step(&mut tracker, control, -1);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, EventName::ButtonPressed(Button::DpadUp));

        let events = step(&mut tracker, control, 0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, EventName::ButtonReleased(Button::DpadUp));
    }

    #[test]
    fn test_hat_direct_flip() {
        let mut tracker = ControlStateTracker::new(TRIGGER_THRESHOLD);
        let control = LogicalControl::Axis(Axis::DpadX);

        step(&mut tracker, control, -1);

        // -1 -> +1 without passing through 0: release left, press right
        let events = step(&mut tracker, control, 1);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, EventName::ButtonReleased(Button::DpadLeft));
        assert_eq!(events[1].name, EventName::ButtonPressed(Button::DpadRight));
    }

    #[test]
    fn test_hat_repeated_sample_no_duplicate() {
        let mut tracker = ControlStateTracker::new(TRIGGER_THRESHOLD);
        let control = LogicalControl::Axis(Axis::DpadX);

        assert_eq!(step(&mut tracker, control, 1).len(), 1);
        assert!(step(&mut tracker, control, 1).is_empty());
    }
}
