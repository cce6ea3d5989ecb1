//! Ordered handler lists.
//!
//! A [`Signal<Args>`] holds callbacks that are invoked, in the order they
//! were connected, whenever the signal is emitted. Dockyard is single
//! threaded and synchronous, so handlers run immediately on the emitting
//! call stack and may capture non-`Send` state.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use dockyard_core::Signal;
//!
//! let hits = Rc::new(Cell::new(0));
//! let mut clicked = Signal::<bool>::new();
//!
//! let counter = hits.clone();
//! clicked.connect(move |is_set| {
//!     if *is_set {
//!         counter.set(counter.get() + 1);
//!     }
//! });
//!
//! clicked.emit(&true);
//! clicked.emit(&false);
//! assert_eq!(hits.get(), 1);
//! ```

use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a connected handler.
    ///
    /// Use this ID to remove a handler via [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Handler<Args> = Box<dyn FnMut(&Args)>;

/// An ordered list of handlers invoked on emit.
pub struct Signal<Args> {
    /// All active handlers.
    handlers: SlotMap<ConnectionId, Handler<Args>>,
    /// Connection order; slot map iteration order is not insertion order.
    order: Vec<ConnectionId>,
    /// Whether emission is temporarily blocked.
    blocked: bool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.order.len())
            .field("blocked", &self.blocked)
            .finish()
    }
}

impl<Args> Signal<Args> {
    /// Create a new signal with no handlers.
    pub fn new() -> Self {
        Self {
            handlers: SlotMap::with_key(),
            order: Vec::new(),
            blocked: false,
        }
    }

    /// Connect a handler. It runs after every handler connected before it.
    pub fn connect<F>(&mut self, handler: F) -> ConnectionId
    where
        F: FnMut(&Args) + 'static,
    {
        let id = self.handlers.insert(Box::new(handler));
        self.order.push(id);
        id
    }

    /// Disconnect a handler by its connection ID.
    ///
    /// Returns `true` if the handler was found and removed.
    pub fn disconnect(&mut self, id: ConnectionId) -> bool {
        if self.handlers.remove(id).is_none() {
            return false;
        }
        self.order.retain(|&other| other != id);
        true
    }

    /// Disconnect every handler.
    pub fn disconnect_all(&mut self) {
        self.handlers.clear();
        self.order.clear();
    }

    /// Get the number of connected handlers.
    pub fn connection_count(&self) -> usize {
        self.order.len()
    }

    /// Block emission temporarily.
    ///
    /// While blocked, calls to [`emit`](Self::emit) do nothing.
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    /// Check if emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Invoke every handler in connection order.
    pub fn emit(&mut self, args: &Args) {
        if self.blocked {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        tracing::trace!(target: targets::SIGNAL, connection_count = self.order.len(), "emitting signal");
        for id in &self.order {
            if let Some(handler) = self.handlers.get_mut(*id) {
                handler(args);
            }
        }
    }
}
