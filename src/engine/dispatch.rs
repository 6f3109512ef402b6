//! # Event Dispatch Registry
//!
//! Ordered handler lists per event name, invoked synchronously on the
//! decode thread.
//!
//! A failing (panicking) handler is isolated: the panic is caught, reported
//! via `tracing`, and neither later handlers for the same event nor later
//! events are affected.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::warn;

use crate::engine::event::{EventName, EventPayload, SemanticEvent};

/// Boxed handler callback. Handlers run on the engine's read thread, so
/// they must be `Send` to support the background run mode.
pub type Handler = Box<dyn FnMut(&EventPayload) + Send>;

/// Mapping from semantic event name to its registered handlers.
///
/// Insertion order determines invocation order. Duplicate registrations are
/// allowed and invoked once per occurrence.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<EventName, Vec<Handler>>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler to the list for `name`.
    pub fn register<F>(&mut self, name: EventName, handler: F)
    where
        F: FnMut(&EventPayload) + Send + 'static,
    {
        self.handlers
            .entry(name)
            .or_default()
            .push(Box::new(handler));
    }

    /// Invoke every handler registered for the event's name, in
    /// registration order. Names with no handlers dispatch to nobody.
    pub fn dispatch(&mut self, event: &SemanticEvent) {
        let Some(list) = self.handlers.get_mut(&event.name) else {
            return;
        };

        for (index, handler) in list.iter_mut().enumerate() {
            let result = catch_unwind(AssertUnwindSafe(|| handler(&event.payload)));
            if result.is_err() {
                warn!(
                    "Handler {} for {} panicked; continuing dispatch",
                    index, event.name
                );
            }
        }
    }

    /// Number of handlers registered for a name.
    #[must_use]
    pub fn handler_count(&self, name: EventName) -> usize {
        self.handlers.get(&name).map(Vec::len).unwrap_or(0)
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("event_names", &self.handlers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
