use rune_popup::Size;
use winit::event::MouseButton;

/// Window events the popup layer reacts to, in viewport pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum RuneWindowEvent {
    Resized(Size),
    ScaleFactorChanged(f64),
    CursorMoved { position: [f32; 2] },
    MousePressed(MouseButton),
    MouseReleased(MouseButton),
    RedrawRequested,
    CloseRequested,
}
