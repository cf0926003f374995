//! Routes translated window events to one popup.

use rune_popup::{ElementName, EventResult, PopupHost, PopupWindow, WindowState};
use tracing::trace;
use winit::event::MouseButton;

use crate::events::RuneWindowEvent;
use crate::pointer::{DragTracker, hit_test};

/// Pointer state machine in front of a [`PopupWindow`].
///
/// A left press on a grab zone starts a drag session; a press and release on
/// the same element without moving is a click.
#[derive(Debug)]
pub struct PopupRouter<H: PopupHost> {
    window: PopupWindow<H>,
    tracker: DragTracker,
    cursor: [f32; 2],
    pressed: Option<ElementName>,
}

impl<H: PopupHost> PopupRouter<H> {
    pub fn new(window: PopupWindow<H>) -> Self {
        Self {
            window,
            tracker: DragTracker::new(),
            cursor: [0.0, 0.0],
            pressed: None,
        }
    }

    pub fn window(&self) -> &PopupWindow<H> {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut PopupWindow<H> {
        &mut self.window
    }

    pub fn into_window(self) -> PopupWindow<H> {
        self.window
    }

    /// Element under the cursor. Outside the frame a modal window reports
    /// its mask.
    pub fn element_at(&self, position: [f32; 2]) -> Option<ElementName> {
        let window = &self.window;
        if !window.state().is_open() {
            return None;
        }
        let visible_height = if window.state() == WindowState::Collapsed {
            window.chrome().collapsed_height()
        } else {
            window.bounds().height
        };
        let hit = hit_test(
            &window.bounds(),
            window.chrome(),
            window.options().zoom_button,
            visible_height,
            position[0].floor() as i32,
            position[1].floor() as i32,
        );
        match hit {
            None if window.options().modal => Some(ElementName::Mask),
            other => other,
        }
    }

    pub fn handle_event(&mut self, event: &RuneWindowEvent) -> EventResult {
        match event {
            RuneWindowEvent::Resized(size) => {
                self.window.viewport_resized(*size);
                EventResult::Handled
            }
            RuneWindowEvent::CursorMoved { position } => {
                self.cursor = *position;
                match self.tracker.offset(*position) {
                    Some(offset) => {
                        self.window.drag_to(offset);
                        EventResult::Handled
                    }
                    None => EventResult::Ignored,
                }
            }
            RuneWindowEvent::MousePressed(MouseButton::Left) => self.press(),
            RuneWindowEvent::MouseReleased(MouseButton::Left) => self.release(),
            RuneWindowEvent::CloseRequested => {
                if self.window.close() {
                    EventResult::Handled
                } else {
                    EventResult::Ignored
                }
            }
            _ => EventResult::Ignored,
        }
    }

    fn press(&mut self) -> EventResult {
        let Some(element) = self.element_at(self.cursor) else {
            return EventResult::Ignored;
        };
        self.pressed = Some(element);

        if let ElementName::Handle(handle) = element {
            if self.window.begin_drag(handle) {
                self.tracker.start(handle, self.cursor);
            }
        }
        EventResult::Handled
    }

    fn release(&mut self) -> EventResult {
        let pressed = self.pressed.take();
        let dragged = self.tracker.moved();
        if let Some(handle) = self.tracker.finish() {
            self.window.end_drag();
            trace!("drag on {} released", handle.name());
        }

        let Some(pressed) = pressed else {
            return EventResult::Ignored;
        };
        if dragged || self.element_at(self.cursor) != Some(pressed) {
            return EventResult::Handled;
        }
        self.window.click(pressed)
    }
}
