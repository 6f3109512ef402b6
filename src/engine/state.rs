//! # Control State Tracker
//!
//! Per-control last-known state, used by the decoder to detect edges.
//!
//! State transitions for a given control are processed in raw-event arrival
//! order; the tracker never reorders.

use std::collections::HashMap;

use crate::engine::mapping::{Axis, LogicalControl};

/// Last-known state of one logical control.
///
/// `last_value` is the raw device value (0/1 for buttons, device range for
/// axes). `is_active` is derived: buttons are active while pressed, triggers
/// while beyond the activation threshold. For stick axes `is_active` is
/// always false; only `last_value` matters, since movement events are not
/// edge-triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    pub last_value: i32,
    pub is_active: bool,
}

/// Previous/current state pair produced by one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub previous: ControlState,
    pub current: ControlState,
}

impl StateTransition {
    /// Inactive -> active edge.
    #[must_use]
    pub fn is_press(&self) -> bool {
        !self.previous.is_active && self.current.is_active
    }

    /// Active -> inactive edge.
    #[must_use]
    pub fn is_release(&self) -> bool {
        self.previous.is_active && !self.current.is_active
    }
}

/// Holds last-known value and active state per logical control.
///
/// Owned exclusively by the engine; mutated only by the decode step.
#[derive(Debug)]
pub struct ControlStateTracker {
    states: HashMap<LogicalControl, ControlState>,
    /// Trigger activation threshold in raw device units.
    trigger_threshold: i32,
}

impl ControlStateTracker {
    #[must_use]
    pub fn new(trigger_threshold: i32) -> Self {
        Self {
            states: HashMap::new(),
            trigger_threshold,
        }
    }

    /// Record a raw value for a control and return the transition.
    ///
    /// Controls start at value 0, inactive; the first update transitions
    /// from that default.
    pub fn update(&mut self, control: LogicalControl, value: i32) -> StateTransition {
        let previous = self.states.get(&control).copied().unwrap_or_default();

        let is_active = match control {
            LogicalControl::Axis(axis) if axis.is_trigger() => value > self.trigger_threshold,
            // Stick axes carry no active state
            LogicalControl::Axis(axis) if axis.stick_side().is_some() => false,
            // Buttons and hat axes are digital
            _ => value != 0,
        };

        let current = ControlState {
            last_value: value,
            is_active,
        };
        self.states.insert(control, current);

        StateTransition { previous, current }
    }

    /// Last raw value recorded for a control (0 if never seen).
    #[must_use]
    pub fn last_value(&self, control: LogicalControl) -> i32 {
        self.states
            .get(&control)
            .map(|s| s.last_value)
            .unwrap_or(0)
    }

    /// Convenience accessor for axis controls.
    #[must_use]
    pub fn last_axis_value(&self, axis: Axis) -> i32 {
        self.last_value(LogicalControl::Axis(axis))
    }
}
