//! Drag handles: the eight resize zones of the shadow ring plus the title bar.
//!
//! Every handle maps to a [`HandleRule`] describing which bounds components a
//! pointer delta touches. The [`DragHandleController`] runs one drag session
//! at a time and turns cumulative pointer offsets into committed bounds.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::{OuterBounds, Point};

/// Grab zone identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleId {
    Left,
    Right,
    Top,
    Bottom,
    LeftTop,
    RightTop,
    LeftBottom,
    RightBottom,
    Title,
}

impl HandleId {
    /// All handles, resize zones first.
    pub const ALL: [HandleId; 9] = [
        HandleId::Left,
        HandleId::Right,
        HandleId::Top,
        HandleId::Bottom,
        HandleId::LeftTop,
        HandleId::RightTop,
        HandleId::LeftBottom,
        HandleId::RightBottom,
        HandleId::Title,
    ];

    /// Event name emitted after a committed tick on this handle.
    pub fn name(&self) -> &'static str {
        match self {
            HandleId::Left => "Left",
            HandleId::Right => "Right",
            HandleId::Top => "Top",
            HandleId::Bottom => "Bottom",
            HandleId::LeftTop => "LeftTop",
            HandleId::RightTop => "RightTop",
            HandleId::LeftBottom => "LeftBottom",
            HandleId::RightBottom => "RightBottom",
            HandleId::Title => "Title",
        }
    }

    pub fn is_resize(&self) -> bool {
        !matches!(self, HandleId::Title)
    }

    pub fn rule(&self) -> HandleRule {
        match self {
            HandleId::Right => HandleRule::resize(1, 0, false, false),
            HandleId::Bottom => HandleRule::resize(0, 1, false, false),
            HandleId::RightBottom => HandleRule::resize(1, 1, false, false),
            HandleId::LeftBottom => HandleRule::resize(-1, 1, true, false),
            HandleId::RightTop => HandleRule::resize(1, -1, false, true),
            HandleId::Left => HandleRule::resize(-1, 0, true, false),
            HandleId::Top => HandleRule::resize(0, -1, false, true),
            HandleId::LeftTop => HandleRule::resize(-1, -1, true, true),
            HandleId::Title => HandleRule::TRANSLATE,
        }
    }
}

/// How a pointer delta (dx, dy) changes the bounds for one handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleRule {
    /// Multiplier of dx applied to the width (-1, 0 or 1).
    pub width_sign: i32,
    /// Multiplier of dy applied to the height (-1, 0 or 1).
    pub height_sign: i32,
    /// Move `left` by dx so the right edge stays put.
    pub shift_left: bool,
    /// Move `top` by dy so the bottom edge stays put.
    pub shift_top: bool,
    /// Pure translation, no resize.
    pub translate: bool,
}

impl HandleRule {
    const TRANSLATE: HandleRule = HandleRule {
        width_sign: 0,
        height_sign: 0,
        shift_left: true,
        shift_top: true,
        translate: true,
    };

    const fn resize(width_sign: i32, height_sign: i32, shift_left: bool, shift_top: bool) -> Self {
        Self {
            width_sign,
            height_sign,
            shift_left,
            shift_top,
            translate: false,
        }
    }

    /// Apply a delta to `bounds`.
    ///
    /// Returns `None` when the resulting width or height would be <= 0; the
    /// caller must then leave the bounds untouched.
    pub fn apply(&self, bounds: OuterBounds, dx: i32, dy: i32) -> Option<OuterBounds> {
        if self.translate {
            return Some(OuterBounds {
                top: bounds.top + dy,
                left: bounds.left + dx,
                ..bounds
            });
        }

        let width = bounds.width + self.width_sign * dx;
        let height = bounds.height + self.height_sign * dy;
        if width <= 0 || height <= 0 {
            return None;
        }

        Some(OuterBounds {
            top: if self.shift_top { bounds.top + dy } else { bounds.top },
            left: if self.shift_left { bounds.left + dx } else { bounds.left },
            width,
            height,
        })
    }
}

/// Apply one delta for `handle` to `bounds`. See [`HandleRule::apply`].
pub fn apply_delta(bounds: OuterBounds, handle: HandleId, dx: i32, dy: i32) -> Option<OuterBounds> {
    handle.rule().apply(bounds, dx, dy)
}

/// Result of feeding one pointer offset to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// No session is active.
    Idle,
    /// The offset did not move since the last committed tick.
    Unchanged,
    /// The tick would invert or zero the window and was discarded.
    Rejected,
    /// The window ignores this handle in its current state.
    Suppressed,
    /// New bounds to commit.
    Committed(OuterBounds),
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    handle: HandleId,
    /// Offset of the last committed tick, relative to the session start.
    anchor: Point,
}

/// Runs drag sessions for a single window.
///
/// The draggable primitive reports offsets cumulative from the session start.
/// Each tick is measured against the offset of the last committed tick, so a
/// rejected tick leaves no drift behind.
#[derive(Debug, Default)]
pub struct DragHandleController {
    session: Option<DragSession>,
}

impl DragHandleController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session on `handle`. Refused while another session is active.
    pub fn begin(&mut self, handle: HandleId) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(DragSession {
            handle,
            anchor: Point::default(),
        });
        true
    }

    /// Feed the cumulative pointer offset of the current session.
    pub fn tick(&mut self, bounds: &OuterBounds, offset: Point) -> DragOutcome {
        let Some(session) = self.session.as_mut() else {
            return DragOutcome::Idle;
        };

        let delta = offset - session.anchor;
        if delta == Point::default() {
            return DragOutcome::Unchanged;
        }

        match apply_delta(*bounds, session.handle, delta.x, delta.y) {
            Some(next) => {
                session.anchor = offset;
                DragOutcome::Committed(next)
            }
            None => {
                trace!(
                    "{} tick ({}, {}) rejected for {}x{}",
                    session.handle.name(),
                    delta.x,
                    delta.y,
                    bounds.width,
                    bounds.height
                );
                DragOutcome::Rejected
            }
        }
    }

    /// End the current session, returning its handle.
    pub fn end(&mut self) -> Option<HandleId> {
        self.session.take().map(|s| s.handle)
    }

    pub fn active_handle(&self) -> Option<HandleId> {
        self.session.map(|s| s.handle)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }
}
