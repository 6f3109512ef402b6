//! # Joypad Events Library
//!
//! Turn raw Linux gamepad input into named semantic events.
//!
//! This library reads low-level input-device reports (button codes, analog
//! axis samples) and decodes them into a small, stable vocabulary of
//! semantic events — press/release edges for buttons and triggers,
//! continuous movement events for sticks — delivered to caller-registered
//! handlers, either on the caller's thread or on a background thread.

pub mod config;
pub mod device;
pub mod engine;
pub mod error;

pub use config::Config;
pub use engine::event::{EventName, EventPayload, SemanticEvent};
pub use engine::{ExitReason, Joystick, JoystickHandle, StopHandle};
pub use error::{JoypadError, Result};
