//! # Xbox Gamepad Module
//!
//! Gamepad detection, connection, and input reading via the Linux evdev
//! interface.
//!
//! ## Detection
//!
//! Gamepads are identified by a case-insensitive substring match against the
//! device name ("pad" by default), which catches "Microsoft X-Box 360 pad",
//! "Xbox Wireless Controller", "Generic Gamepad", and friends. An explicit
//! device path in the configuration bypasses detection.
//!
//! ## Reported ranges (xpad driver)
//!
//! - Sticks: ABS_X/ABS_Y (left), ABS_RX/ABS_RY (right), -32768..32767
//! - Triggers: ABS_Z (left), ABS_RZ (right), 0..1023
//! - D-Pad: ABS_HAT0X/ABS_HAT0Y, -1/0/1

use evdev::Device;
use std::collections::VecDeque;
use std::path::Path;
use tracing::{debug, info};

use crate::config::DeviceConfig;
use crate::device::{RawEvent, RawEventSource};
use crate::error::{JoypadError, Result};

/// Handle to a connected gamepad.
///
/// Wraps the evdev device and exposes it as a [`RawEventSource`]. Reads
/// block until the device yields at least one report.
pub struct XboxController {
    device: Device,
    device_path: String,
    pending: VecDeque<RawEvent>,
}

impl XboxController {
    /// Detect and open the first available gamepad.
    ///
    /// Honors `config.path` when set; otherwise scans `/dev/input/event*`
    /// in sorted order and opens the first device whose name contains
    /// `config.name_match` (case-insensitive).
    ///
    /// # Errors
    ///
    /// - `DeviceNotFound`: no matching gamepad on the system
    /// - `Device`: the configured path could not be opened
    pub fn open(config: &DeviceConfig) -> Result<Self> {
        if !config.path.is_empty() {
            return Self::open_path(&config.path);
        }

        let input_dir = Path::new("/dev/input");
        if !input_dir.exists() {
            return Err(JoypadError::Device(
                "/dev/input directory not found".to_string(),
            ));
        }

        let mut entries: Vec<_> = std::fs::read_dir(input_dir)
            .map_err(|e| JoypadError::Device(format!("Failed to read /dev/input: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| JoypadError::Device(format!("Failed to read directory entry: {}", e)))?;

        // Sorted scan keeps device selection deterministic when several
        // controllers are connected
        entries.sort_by_key(|entry| entry.path());

        let needle = config.name_match.to_lowercase();

        for entry in entries {
            let path = entry.path();

            // Only check event* devices
            if let Some(filename) = path.file_name() {
                if !filename.to_string_lossy().starts_with("event") {
                    continue;
                }
            } else {
                continue;
            }

            match Device::open(&path) {
                Ok(device) => {
                    let name = device.name().unwrap_or("").to_string();
                    debug!("Found input device: {} ({})", path.display(), name);

                    if name.to_lowercase().contains(&needle) {
                        let device_path = path.to_string_lossy().to_string();
                        info!("Found gamepad \"{}\" at: {}", name, device_path);

                        return Ok(XboxController {
                            device,
                            device_path,
                            pending: VecDeque::new(),
                        });
                    }
                }
                Err(e) => {
                    // Permission denied or other errors - skip device
                    debug!("Could not open {}: {}", path.display(), e);
                }
            }
        }

        Err(JoypadError::DeviceNotFound)
    }

    /// Open a gamepad at an explicit device path.
    pub fn open_path(path: &str) -> Result<Self> {
        let device = Device::open(path)
            .map_err(|e| JoypadError::Device(format!("Failed to open {}: {}", path, e)))?;

        info!(
            "Opened gamepad \"{}\" at: {}",
            device.name().unwrap_or("unknown"),
            path
        );

        Ok(XboxController {
            device,
            device_path: path.to_string(),
            pending: VecDeque::new(),
        })
    }

    /// The `/dev/input/eventX` path this controller was opened from.
    #[must_use]
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Human-readable device name from evdev.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.device.name()
    }
}

impl RawEventSource for XboxController {
    fn next_event(&mut self) -> Result<Option<RawEvent>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }

            // Blocks until the device yields at least one report. A fetch
            // failure means the device is gone.
            let events = self
                .device
                .fetch_events()
                .map_err(|e| JoypadError::Device(format!("Failed to fetch events: {}", e)))?;

            for event in events {
                if let Some(raw) = RawEvent::from_input_event(&event) {
                    self.pending.push_back(raw);
                }
            }
        }
    }
}
