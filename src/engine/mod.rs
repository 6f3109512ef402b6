//! # Engine Module
//!
//! The input normalization and event-dispatch engine.
//!
//! This module handles:
//! - Resolving raw events to logical controls ([`mapping`])
//! - Tracking per-control state for edge detection ([`state`])
//! - Decoding state transitions into semantic events ([`decoder`])
//! - Dispatching events to registered handlers ([`dispatch`])
//! - The run loop: blocking `run()`, background `start()`, `stop()`
//!
//! Data flows one way per raw event, synchronously, before the next raw
//! event is pulled: source -> mapping -> state tracker -> decoder ->
//! dispatch. That single-threaded pipeline is what guarantees in-order
//! delivery of semantic events relative to raw arrival.

pub mod decoder;
pub mod dispatch;
pub mod event;
pub mod mapping;
pub mod state;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::device::xbox::XboxController;
use crate::device::{RawEvent, RawEventSource};
use crate::error::Result;
use self::decoder::AxisLimits;
use self::dispatch::HandlerRegistry;
use self::event::{EventName, EventPayload};
use self::mapping::MappingTable;
use self::state::ControlStateTracker;

/// Why the run loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `stop()` was requested; the in-flight event finished dispatching.
    Stopped,
    /// The source was cleanly exhausted.
    EndOfStream,
    /// The device was lost mid-session.
    Disconnected,
}

/// Cloneable stop signal, usable from any thread.
///
/// Stopping takes effect between raw events: the event currently being
/// dispatched always completes, and no further events are pulled. A read
/// already blocked on the device is not interrupted; the loop exits once
/// that read yields.
#[derive(Debug, Clone)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request the run loop to stop.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

/// The joystick engine.
///
/// Construction wires a raw event source to the decode pipeline and an
/// empty handler registry. Handlers are registered before the loop starts;
/// `start()` consumes the engine, so late registration is unrepresentable.
///
/// # Examples
///
/// ```no_run
/// use joypad_events::config::Config;
/// use joypad_events::engine::Joystick;
/// use joypad_events::engine::event::EventName;
/// use joypad_events::engine::mapping::Button;
///
/// let mut joystick = Joystick::open(&Config::default())?;
/// joystick.register_event_handler(EventName::ButtonPressed(Button::A), |_| {
///     println!("Button A pressed!");
/// });
/// let handle = joystick.start();
/// // ... host does its own work ...
/// handle.stop();
/// handle.join();
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Joystick<S: RawEventSource> {
    source: S,
    mapping: MappingTable,
    tracker: ControlStateTracker,
    limits: AxisLimits,
    registry: HandlerRegistry,
    stop: Arc<AtomicBool>,
}

impl Joystick<XboxController> {
    /// Open the first detected gamepad and build an engine around it.
    ///
    /// # Errors
    ///
    /// Fails fast on invalid configuration or when no gamepad is found;
    /// nothing is dispatched before a successful construction.
    pub fn open(config: &Config) -> Result<Self> {
        let controller = XboxController::open(&config.device)?;
        Self::with_source(controller, config)
    }
}

impl<S: RawEventSource> Joystick<S> {
    /// Build an engine around an injected raw event source.
    ///
    /// This is the seam for testing and for hosts with their own input
    /// plumbing.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if validation or a mapping override
    /// fails.
    pub fn with_source(source: S, config: &Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            source,
            mapping: MappingTable::with_overrides(&config.mapping)?,
            tracker: ControlStateTracker::new(config.trigger_threshold_raw()),
            limits: AxisLimits::from_config(&config.axes),
            registry: HandlerRegistry::new(),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Register a handler for a semantic event.
    ///
    /// Handlers for one name run in registration order; duplicates are
    /// invoked once per registration.
    pub fn register_event_handler<F>(&mut self, name: EventName, handler: F)
    where
        F: FnMut(&EventPayload) + Send + 'static,
    {
        self.registry.register(name, handler);
    }

    /// Register a handler by its string event name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEventName` for names outside the vocabulary, rather
    /// than accepting a handler that could never fire.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use joypad_events::config::Config;
    /// # use joypad_events::engine::Joystick;
    /// # let mut joystick = Joystick::open(&Config::default())?;
    /// joystick.register_event_handler_named("button_a_pressed", |_| {
    ///     println!("Button A pressed!");
    /// })?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn register_event_handler_named<F>(&mut self, name: &str, handler: F) -> Result<()>
    where
        F: FnMut(&EventPayload) + Send + 'static,
    {
        let name: EventName = name.parse()?;
        self.registry.register(name, handler);
        Ok(())
    }

    /// A stop signal for this engine, cloneable and usable from any thread.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            flag: self.stop.clone(),
        }
    }

    /// Run the pipeline on the calling thread until stopped or the source
    /// ends.
    ///
    /// The stop flag is latched: once this engine has been stopped, calling
    /// `run()` again returns [`ExitReason::Stopped`] immediately. A new
    /// session means a new engine.
    pub fn run(&mut self) -> ExitReason {
        info!("Run loop starting");

        let reason = loop {
            if self.stop.load(Ordering::SeqCst) {
                break ExitReason::Stopped;
            }

            match self.source.next_event() {
                Ok(Some(raw)) => self.process_raw(&raw),
                Ok(None) => break ExitReason::EndOfStream,
                Err(e) => {
                    warn!("Device lost: {}", e);
                    break ExitReason::Disconnected;
                }
            }
        };

        info!("Run loop ended: {:?}", reason);
        reason
    }

    /// One full pipeline pass: mapping -> state tracker -> decoder ->
    /// dispatch.
    fn process_raw(&mut self, raw: &RawEvent) {
        let Some(control) = self.mapping.resolve(raw.kind, raw.code) else {
            // Unmapped raw events (sync markers included) are dropped
            debug!("Dropping unmapped raw event: {:?}", raw);
            return;
        };

        let transition = self.tracker.update(control, raw.value);
        let events = decoder::decode(control, transition, &self.tracker, &self.limits);
        for event in &events {
            self.registry.dispatch(event);
        }
    }
}

impl<S: RawEventSource + Send + 'static> Joystick<S> {
    /// Run the pipeline on a dedicated background thread.
    ///
    /// Decoding and dispatch behave identically to [`Joystick::run`]; only
    /// the execution context differs. The engine is consumed; the returned
    /// handle stops and joins the session.
    #[must_use]
    pub fn start(self) -> JoystickHandle {
        let stop = self.stop_handle();
        let mut engine = self;
        let thread = thread::spawn(move || engine.run());

        JoystickHandle { stop, thread }
    }
}

impl<S: RawEventSource> std::fmt::Debug for Joystick<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Joystick")
            .field("limits", &self.limits)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Handle to a background session started with [`Joystick::start`].
pub struct JoystickHandle {
    stop: StopHandle,
    thread: thread::JoinHandle<ExitReason>,
}

impl JoystickHandle {
    /// Request the background loop to stop.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// A cloneable stop signal for this session.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Wait for the background loop to exit and return why it ended.
    pub fn join(self) -> ExitReason {
        match self.thread.join() {
            Ok(reason) => reason,
            Err(_) => {
                // Handler panics are isolated, so this only fires on an
                // engine bug
                error!("Run loop thread panicked");
                ExitReason::Disconnected
            }
        }
    }
}
