//! Floating popup windows: geometry and interaction state machine.
//!
//! This crate provides:
//! - **Chrome metrics**: box-model math between content size and window bounds
//! - **Drag handles**: edge/corner resize and title-bar move
//! - **Lifecycle**: open, collapse/expand, auto-dismiss, close with mask fade
//! - **Fill mode**: bounds that track the viewport, debounced on resize
//!
//! # Architecture
//!
//! ```text
//! PopupWindow<H: PopupHost>
//!   ├── ChromeConfig          (compute_outer_bounds / compute_inner_size)
//!   ├── DragHandleController  (HandleId -> HandleRule)
//!   ├── ResponsiveLayout      (fill mode)
//!   ├── Scheduler             (virtual-clock timers)
//!   └── EventEmitter          (PopupEvent listeners)
//! ```
//!
//! Elements are never created here: the [`PopupHost`] attaches, moves, binds
//! and detaches them on request.

pub mod chrome;
pub mod error;
pub mod events;
pub mod geometry;
pub mod handles;
pub mod host;
pub mod layering;
pub mod responsive;
pub mod scheduler;
pub mod window;

pub use chrome::{
    ChromeConfig, collapsed_height, compute_inner_size, compute_outer_bounds, fill_bounds,
    frame_size,
};
pub use error::{PopupError, Result};
pub use events::{EventEmitter, EventName, ListenerId, PopupEvent};
pub use geometry::{ContentSize, OuterBounds, Placement, Point, Size};
pub use handles::{DragHandleController, DragOutcome, HandleId, HandleRule, apply_delta};
pub use host::{AttachRequest, ElementName, EventResult, HostCall, PopupHost, RecordingHost};
pub use layering::{BASE_LAYER, GlobalLayers, LayerAllocator, Layers, LocalLayers};
pub use responsive::ResponsiveLayout;
pub use scheduler::{Scheduler, TimerId, TimerKind};
pub use window::{PopupId, PopupWindow, WindowState};

pub use rune_config::PopupConfig;
