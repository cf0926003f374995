//! rune-window: winit event integration for rune popups.
//!
//! Responsibilities:
//! - Translate winit window events into [`RuneWindowEvent`]s in viewport pixels.
//! - Hit-test the cursor against a popup's shadow ring and title bar.
//! - Act as the draggable primitive: cumulative offsets per drag session.
//! - Route presses, releases, moves and resizes to a `PopupWindow`.

pub mod events;
pub mod pointer;
pub mod router;

pub use events::{RuneWindowEvent, translate_window_event};
pub use pointer::{DragTracker, hit_test};
pub use router::PopupRouter;
