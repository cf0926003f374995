//! Popup events and listener registry.
//!
//! Every state change of a window is announced as a [`PopupEvent`]. Listeners
//! subscribe through an [`EventName`] filter and run synchronously, in
//! registration order, inside the call that caused the change.
//!
//! # Usage
//!
//! ```ignore
//! use rune_popup::{EventName, PopupEvent};
//!
//! popup.on(EventName::AnyResize, |event| {
//!     if let PopupEvent::Resize { handle, content, .. } = event {
//!         println!("{} -> {}x{}", handle.name(), content.width, content.height);
//!     }
//! });
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Size;
use crate::handles::HandleId;

/// Event emitted by a popup window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PopupEvent {
    /// The window has been attached and is visible.
    Open {
        /// Outer size without the shadow ring.
        frame: Size,
        /// Content size derived from the outer bounds.
        content: Size,
    },
    /// The window has been torn down. Fired exactly once.
    Close,
    /// The window was expanded from its title bar.
    ZoomIn,
    /// The window was collapsed to its title bar.
    ZoomOut,
    /// A resize handle committed new bounds.
    Resize {
        handle: HandleId,
        frame: Size,
        content: Size,
    },
    /// The title bar moved the window.
    Move { top: i32, left: i32 },
    /// Fill mode was toggled or refitted to the viewport.
    Fill { active: bool, content: Size },
}

impl PopupEvent {
    /// Event name as hosts see it: `open`, `close`, `zoomIn`, `zoomOut`,
    /// the handle name for resizes, `move` and `fill`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open { .. } => "open",
            Self::Close => "close",
            Self::ZoomIn => "zoomIn",
            Self::ZoomOut => "zoomOut",
            Self::Resize { handle, .. } => handle.name(),
            Self::Move { .. } => "move",
            Self::Fill { .. } => "fill",
        }
    }
}

/// Subscription filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    Open,
    Close,
    ZoomIn,
    ZoomOut,
    /// Resize events of one handle.
    Resize(HandleId),
    /// Resize events of every handle.
    AnyResize,
    Move,
    Fill,
    /// Every event.
    Any,
}

impl EventName {
    pub fn matches(&self, event: &PopupEvent) -> bool {
        match (self, event) {
            (EventName::Any, _) => true,
            (EventName::Open, PopupEvent::Open { .. }) => true,
            (EventName::Close, PopupEvent::Close) => true,
            (EventName::ZoomIn, PopupEvent::ZoomIn) => true,
            (EventName::ZoomOut, PopupEvent::ZoomOut) => true,
            (EventName::Resize(wanted), PopupEvent::Resize { handle, .. }) => wanted == handle,
            (EventName::AnyResize, PopupEvent::Resize { .. }) => true,
            (EventName::Move, PopupEvent::Move { .. }) => true,
            (EventName::Fill, PopupEvent::Fill { .. }) => true,
            _ => false,
        }
    }
}

/// Handle returned by [`EventEmitter::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

type Callback = Box<dyn FnMut(&PopupEvent)>;

struct Listener {
    id: ListenerId,
    filter: EventName,
    once: bool,
    callback: Callback,
}

/// Ordered listener registry.
#[derive(Default)]
pub struct EventEmitter {
    listeners: Vec<Listener>,
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every event matching `filter`.
    pub fn on<F>(&mut self, filter: EventName, callback: F) -> ListenerId
    where
        F: FnMut(&PopupEvent) + 'static,
    {
        self.push(filter, false, Box::new(callback))
    }

    /// Subscribe to the next event matching `filter` only.
    pub fn once<F>(&mut self, filter: EventName, callback: F) -> ListenerId
    where
        F: FnMut(&PopupEvent) + 'static,
    {
        self.push(filter, true, Box::new(callback))
    }

    fn push(&mut self, filter: EventName, once: bool, callback: Callback) -> ListenerId {
        let id = ListenerId::next();
        self.listeners.push(Listener {
            id,
            filter,
            once,
            callback,
        });
        id
    }

    /// Remove a listener. Returns false when it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to matching listeners in registration order.
    ///
    /// Returns the number of listeners invoked.
    pub fn emit(&mut self, event: &PopupEvent) -> usize {
        let mut delivered = 0;
        for listener in self.listeners.iter_mut() {
            if listener.filter.matches(event) {
                (listener.callback)(event);
                delivered += 1;
            }
        }
        self.listeners
            .retain(|l| !(l.once && l.filter.matches(event)));
        delivered
    }

    /// Drop every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
