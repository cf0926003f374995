//! Host interface: the collaborator that owns the actual elements.
//!
//! A window never builds markup or touches a document itself. It addresses
//! its parts by [`ElementName`] and asks the [`PopupHost`] to attach, move,
//! bind and detach them.

use crate::geometry::{OuterBounds, Size};
use crate::handles::HandleId;
use crate::layering::Layers;

/// Logical element of a popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementName {
    /// Full-viewport mask of a modal window.
    Mask,
    /// The window chrome, shadow ring included.
    Frame,
    /// A grab zone. `Handle(HandleId::Title)` is the title bar.
    Handle(HandleId),
    /// Close icon.
    Close,
    /// Collapse/expand toggle.
    Zoom,
    /// Content pane.
    Content,
}

impl ElementName {
    pub const TITLE: ElementName = ElementName::Handle(HandleId::Title);
}

/// Everything the host needs to create the elements of one window.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachRequest {
    /// Container to attach into; the document body when `None`.
    pub pool: Option<String>,
    pub layers: Layers,
    pub bounds: OuterBounds,
    pub content: Size,
    /// Initial mask opacity, present only for modal windows.
    pub mask_opacity: Option<i32>,
    /// Starts collapsed to the title bar.
    pub collapsed: bool,
    /// Handles get resize cursors.
    pub draggable: bool,
    pub zoom_button: bool,
}

/// Result of routing an input event to a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventResult {
    /// Event was handled and should not propagate
    Handled,
    /// Event was not handled, continue propagation
    Ignored,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Handled)
    }
}

/// Element collaborator of a popup window.
pub trait PopupHost {
    /// Create and show every element described by `request`.
    fn attach(&mut self, request: &AttachRequest);

    /// Move the frame and resize the content pane.
    ///
    /// While collapsed the window follows up with
    /// [`set_visible_height`](Self::set_visible_height) to restore the clip.
    fn apply_geometry(&mut self, bounds: &OuterBounds, content: Size);

    /// Clip the frame to `frame_height`; `body_visible` is false while
    /// collapsed to the title bar.
    fn set_visible_height(&mut self, frame_height: i32, body_visible: bool);

    /// Show the expand (collapsed) or collapse (expanded) indicator.
    fn set_zoom_indicator(&mut self, expanded: bool) {
        let _ = expanded;
    }

    /// Mask opacity in percent.
    fn set_mask_opacity(&mut self, opacity: i32);

    /// Start delivering input for `element`.
    fn bind(&mut self, element: ElementName);

    /// Stop delivering input for `element`.
    fn unbind(&mut self, element: ElementName);

    /// Remove `element` from its container.
    fn detach(&mut self, element: ElementName);

    /// Drop title and content text.
    fn clear_text(&mut self) {}
}

/// One recorded host call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Attach(AttachRequest),
    ApplyGeometry { bounds: OuterBounds, content: Size },
    SetVisibleHeight { frame_height: i32, body_visible: bool },
    SetZoomIndicator { expanded: bool },
    SetMaskOpacity(i32),
    Bind(ElementName),
    Unbind(ElementName),
    Detach(ElementName),
    ClearText,
}

/// Host that records every call, for tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the log empty.
    pub fn take(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Index of the first call equal to `call`.
    pub fn position(&self, call: &HostCall) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }

    /// Mask opacities in the order they were set.
    pub fn mask_opacities(&self) -> Vec<i32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::SetMaskOpacity(o) => Some(*o),
                _ => None,
            })
            .collect()
    }

    /// Most recent geometry applied.
    pub fn last_geometry(&self) -> Option<(OuterBounds, Size)> {
        self.calls.iter().rev().find_map(|c| match c {
            HostCall::ApplyGeometry { bounds, content } => Some((*bounds, *content)),
            _ => None,
        })
    }
}

impl PopupHost for RecordingHost {
    fn attach(&mut self, request: &AttachRequest) {
        self.calls.push(HostCall::Attach(request.clone()));
    }

    fn apply_geometry(&mut self, bounds: &OuterBounds, content: Size) {
        self.calls.push(HostCall::ApplyGeometry {
            bounds: *bounds,
            content,
        });
    }

    fn set_visible_height(&mut self, frame_height: i32, body_visible: bool) {
        self.calls.push(HostCall::SetVisibleHeight {
            frame_height,
            body_visible,
        });
    }

    fn set_zoom_indicator(&mut self, expanded: bool) {
        self.calls.push(HostCall::SetZoomIndicator { expanded });
    }

    fn set_mask_opacity(&mut self, opacity: i32) {
        self.calls.push(HostCall::SetMaskOpacity(opacity));
    }

    fn bind(&mut self, element: ElementName) {
        self.calls.push(HostCall::Bind(element));
    }

    fn unbind(&mut self, element: ElementName) {
        self.calls.push(HostCall::Unbind(element));
    }

    fn detach(&mut self, element: ElementName) {
        self.calls.push(HostCall::Detach(element));
    }

    fn clear_text(&mut self) {
        self.calls.push(HostCall::ClearText);
    }
}
