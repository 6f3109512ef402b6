//! # Joypad Events
//!
//! Dump every semantic event from the first detected gamepad.
//!
//! This binary is the smallest useful consumer of the library: it registers
//! a logging handler for the entire event vocabulary, starts the engine on
//! a background thread, and waits for Ctrl+C.
//!
//! # Usage
//!
//! ```bash
//! joypad-events [config.toml]
//! ```
//!
//! Expected output:
//! ```text
//! INFO joypad_events: joypad-events v0.1.0 starting...
//! INFO joypad_events::device::xbox: Found gamepad "Microsoft X-Box 360 pad" at: /dev/input/event5
//! INFO joypad_events: button_a_pressed
//! INFO joypad_events: left_stick_moved x=0.50 y=-0.50
//! ```

use anyhow::Result;
use tracing::info;
use tracing_subscriber;

mod config;
mod device;
mod engine;
mod error;

use config::Config;
use engine::event::{EventName, EventPayload};
use engine::Joystick;

/// Main entry point
///
/// 1. **Initialization**: set up logging, load configuration (optional
///    first argument, defaults otherwise), detect and open the gamepad.
/// 2. **Session**: register a logging handler for every event name and run
///    the engine in the background.
/// 3. **Shutdown**: Ctrl+C requests the stop and the process exits. A
///    device disconnect also ends the session gracefully.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("joypad-events v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            Config::load(&path)?
        }
        None => Config::default(),
    };

    let mut joystick = Joystick::open(&config)?;

    // Log every decodable event
    for name in EventName::all() {
        joystick.register_event_handler(name, move |payload| match payload {
            EventPayload::None => info!("{}", name),
            EventPayload::Trigger { value } => info!("{} value={:.2}", name, value),
            EventPayload::Stick { x, y } => info!("{} x={:.2} y={:.2}", name, x, y),
        });
    }

    let handle = joystick.start();
    info!("Listening for input, press Ctrl+C to exit");

    tokio::signal::ctrl_c().await?;
    info!("Received Ctrl+C, shutting down...");

    // The device read blocks until the next report, so request the stop
    // and let process exit tear the session down rather than joining.
    handle.stop();

    Ok(())
}
