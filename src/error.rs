//! # Error Types
//!
//! Custom error types for joypad-events using `thiserror`.

use thiserror::Error;

/// Main error type for joypad-events
#[derive(Debug, Error)]
pub enum JoypadError {
    /// No matching gamepad device was found on the system
    #[error("no gamepad device found")]
    DeviceNotFound,

    /// Device-level errors (open, read, disconnect)
    #[error("device error: {0}")]
    Device(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// An event name outside the semantic-event vocabulary
    #[error("unknown event name: {0:?}")]
    UnknownEventName(String),

    /// A control name outside the logical-control vocabulary
    /// (from a mapping override)
    #[error("unknown control name: {0:?}")]
    UnknownControl(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for joypad-events
pub type Result<T> = std::result::Result<T, JoypadError>;
